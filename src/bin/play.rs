use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process;

use clap::{ArgAction, Parser};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unobot::{
    Bot, CpuBot, FirstPlayer, Game, GameStatus, HumanBot, Role, describe_event, describe_phase,
};

#[derive(Parser, Debug)]
#[command(name = "play", about = "Play UNO against CPU opponents in the terminal.")]
struct Args {
    /// Total number of players, you included (2-10)
    #[arg(short = 'p', long = "players", default_value_t = 4)]
    players: usize,

    /// Shuffle one Swap or Shuffle card into the deck
    #[arg(long = "extra-cards", action = ArgAction::SetTrue)]
    extra_cards: bool,

    /// Keep score across rounds and play to 500
    #[arg(long = "score", action = ArgAction::SetTrue)]
    score: bool,

    /// You deal and go first (otherwise a random CPU starts)
    #[arg(long = "deal", action = ArgAction::SetTrue)]
    deal: bool,

    /// Seed for shuffling and CPU decisions (random when omitted)
    #[arg(long = "seed")]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut wins = 0usize;
    let mut match_index = 0u64;
    loop {
        let seed = args
            .seed
            .map(|seed| seed.wrapping_add(match_index))
            .unwrap_or_else(rand::random);
        if play_match(&args, seed)? {
            wins += 1;
        }
        match_index += 1;
        if !ask_yes_no("\nDo you want to play again? (Y/N)")? {
            break;
        }
        println!("Starting another game.");
    }
    println!(
        "\n ~~~ Game complete! You won {wins} {}. ~~~",
        if wins == 1 { "time" } else { "times" }
    );
    Ok(())
}

/// Plays one match to the end. Returns whether the human won it.
fn play_match(args: &Args, seed: u64) -> Result<bool, Box<dyn Error>> {
    let first_player = if args.deal {
        FirstPlayer::You
    } else {
        FirstPlayer::RandomCpu
    };
    let mut game = Game::builder(args.players)?
        .with_seed(seed)
        .with_extra_cards(args.extra_cards)
        .with_scoring(args.score)
        .with_first_player(first_player)
        .build()?;

    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(args.players);
    for seat in 0..args.players {
        let view = game.state_view(seat)?;
        if view.players[seat].role == Role::You {
            bots.push(Box::new(HumanBot::new("You")));
        } else {
            bots.push(Box::new(CpuBot::new(StdRng::seed_from_u64(
                seed ^ ((seat as u64 + 1) * 0x9E37_79B9),
            ))));
        }
        if seat > 0 {
            println!("{} joined you.", view.players[seat].name);
        }
    }

    let view = game.state_view(0)?;
    for event in game.opening_events() {
        println!(">> {}", describe_event(&view, event));
    }
    println!("Let's start the game...");

    while !game.is_finished() {
        let seat = game.active_player();
        let state = game.state_view(seat)?;
        if state.players[seat].role == Role::Cpu {
            println!("\n{}", describe_phase(&state));
        }
        let legal = game.legal_actions(seat)?;
        let action = bots[seat].select_action(&state, &legal);
        let events = game.apply_action(seat, action)?;
        let after = game.state_view(0)?;
        for event in &events {
            println!(">> {}", describe_event(&after, event));
        }
    }

    Ok(matches!(game.status(), GameStatus::Finished { winner: 0 }))
}

fn ask_yes_no(question: &str) -> Result<bool, Box<dyn Error>> {
    let stdin = io::stdin();
    loop {
        println!("{question}");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim().to_ascii_uppercase().as_str() {
            "Y" | "YES" => return Ok(true),
            "N" | "NO" => return Ok(false),
            _ => println!("Answer the question. (Y/N)"),
        }
    }
}
