use std::collections::BTreeMap;
use std::error::Error;
use std::process;

use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unobot::{Bot, FirstPlayer, Game, GameStatus, describe_action, describe_event, render_state};
use unobot::{create_bot_from_spec, label_for_spec};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Run CPU-only matches and report per-seat results."
)]
struct Args {
    /// Number of matches to simulate
    #[arg(short = 'g', long = "games", default_value_t = 100)]
    games: usize,

    /// Base RNG seed (deck + bot RNGs are derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Shuffle one Swap or Shuffle card into each deck
    #[arg(long = "extra-cards", action = ArgAction::SetTrue)]
    extra_cards: bool,

    /// Keep score across rounds and play to 500
    #[arg(long = "score", action = ArgAction::SetTrue)]
    score: bool,

    /// Safety cap on actions per match; longer matches are aborted
    #[arg(long = "max-actions", default_value_t = 20_000)]
    max_actions: usize,

    /// Print every state and event (best with --games 1)
    #[arg(long = "visualize", action = ArgAction::SetTrue)]
    visualize: bool,

    /// Emit the summary as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Player bot specs: e.g., cpu cpu random (2-10 total)
    bots: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    games: usize,
    wins: BTreeMap<String, usize>,
    draws: usize,
    aborted: usize,
    rounds: usize,
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
    let specs = if args.bots.is_empty() {
        vec![String::from("cpu"), String::from("cpu"), String::from("cpu")]
    } else {
        args.bots.clone()
    };
    if specs.len() < 2 || specs.len() > 10 {
        return Err(format!("expected between 2 and 10 players, received {}", specs.len()).into());
    }
    // A human seat would block waiting for input.
    if specs.iter().any(|s| label_for_spec(s) == "human") {
        return Err("human players are not supported in simulations".into());
    }

    let mut summary = Summary {
        games: args.games,
        ..Summary::default()
    };
    for game_index in 0..args.games {
        let seed = args.seed.wrapping_add(game_index as u64);
        let mut game = Game::builder(specs.len())?
            .with_seed(seed)
            .with_extra_cards(args.extra_cards)
            .with_scoring(args.score)
            .with_first_player(FirstPlayer::RandomCpu)
            .build()?;
        let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            bots.push(create_bot_from_spec(spec, index, seed)?);
        }

        let mut actions = 0usize;
        while !game.is_finished() && actions < args.max_actions {
            let seat = game.active_player();
            let state = game.state_view(seat)?;
            let legal = game.legal_actions(seat)?;
            let action = bots[seat].select_action(&state, &legal);
            if args.visualize {
                println!("{}", render_state(&state));
                println!("Chosen action: {}\n", describe_action(&state, &action));
            }
            let events = game.apply_action(seat, action)?;
            if args.visualize {
                let after = game.state_view(seat)?;
                for event in &events {
                    println!(">> {}", describe_event(&after, event));
                }
            }
            actions += 1;
        }

        summary.rounds += game.round();
        match game.status() {
            GameStatus::Finished { winner } => {
                let label = format!("{}:{}", winner, label_for_spec(&specs[winner]));
                *summary.wins.entry(label).or_default() += 1;
            }
            GameStatus::Draw => summary.draws += 1,
            GameStatus::Ongoing => {
                warn!(game = game_index, actions, "match aborted at action cap");
                summary.aborted += 1;
            }
        }
    }
    info!(games = summary.games, "simulation complete");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Matches: {}  |  Rounds: {}", summary.games, summary.rounds);
        for (label, wins) in &summary.wins {
            let rate = *wins as f64 / summary.games.max(1) as f64 * 100.0;
            println!("  seat {label:<12} {wins:>6} wins ({rate:.1}%)");
        }
        println!("Draws: {}  |  Aborted: {}", summary.draws, summary.aborted);
    }
    Ok(())
}
