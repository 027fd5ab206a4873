use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::action::Action;
use crate::bot::Bot;
use crate::card::Suit;
use crate::state::{GameStateView, TurnPhase};
use crate::visualize::{VisualOptions, describe_action, render_state_with_options};

/// What a line of input asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Act(Action),
    /// The chosen card exists but cannot be played on the current discard.
    Illegal,
    /// A draw was asked for but both piles are spent.
    NothingToDraw,
    Help,
    Quit,
    Unrecognized,
}

/// Interprets one line typed by the human for the current phase.
///
/// Cards are numbered from 1 as rendered by `render_hand`. Besides a card
/// number the action phase accepts `draw`/`add`, `quickadd` and
/// `end`/`pass`. Colours are typed by name and swap targets by the number
/// shown next to the player.
pub fn parse_selection(input: &str, state: &GameStateView, legal_actions: &[Action]) -> Selection {
    let trimmed = input.trim().to_ascii_lowercase();
    match trimmed.as_str() {
        "q" | "quit" => return Selection::Quit,
        "help" | "?" => return Selection::Help,
        _ => {}
    }
    let candidate = match state.phase {
        TurnPhase::AwaitingAction => match trimmed.as_str() {
            "draw" | "add" => Some(Action::Draw),
            "quickadd" => Some(Action::DrawUntilPlayable),
            "end" | "pass" => Some(Action::Pass),
            other => match other.parse::<usize>() {
                Ok(position) if position >= 1 && position <= state.hand.len() => {
                    Some(Action::Play {
                        hand_index: position - 1,
                    })
                }
                _ => None,
            },
        },
        TurnPhase::AwaitingColor { .. } => Suit::parse_color(&trimmed).map(Action::ChooseColor),
        TurnPhase::AwaitingSwapTarget { .. } => trimmed
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .map(Action::ChooseSwapTarget),
        TurnPhase::GameOver => None,
    };
    match candidate {
        Some(action) if legal_actions.contains(&action) => Selection::Act(action),
        Some(Action::Play { .. }) => Selection::Illegal,
        Some(Action::Draw | Action::DrawUntilPlayable) => Selection::NothingToDraw,
        _ => Selection::Unrecognized,
    }
}

/// Interactive bot that queries a human via standard input.
pub struct HumanBot<I: BufRead = StdinLock<'static>, O: Write = Stdout> {
    name: String,
    input: I,
    output: O,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_io(name, io::stdin().lock(), io::stdout())
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("You")
    }
}

impl<I: BufRead, O: Write> HumanBot<I, O> {
    pub fn with_io(name: impl Into<String>, input: I, output: O) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    fn prompt(&mut self, state: &GameStateView, highlight_legal: bool) {
        let options = VisualOptions {
            highlight_legal,
            ..VisualOptions::default()
        };
        let _ = writeln!(self.output, "\n=== {}'s turn ===", self.name);
        let _ = write!(self.output, "{}", render_state_with_options(state, options));
        let text = match state.phase {
            TurnPhase::AwaitingColor { .. } => String::from(
                "What color should the next player put down? (Red, Blue, Green, Yellow)",
            ),
            TurnPhase::AwaitingSwapTarget { .. } => {
                let mut lines = vec![String::from("Whose hand do you want?")];
                for player in state.players.iter().filter(|p| p.id != state.self_player) {
                    lines.push(format!(
                        "  [{}] {} ({} cards)",
                        player.id + 1,
                        player.name,
                        player.hand_size
                    ));
                }
                lines.join("\n")
            }
            _ => String::from("What will you do? (card number, 'add', 'quickadd' or 'end')"),
        };
        let _ = writeln!(self.output, "{text}");
        let _ = write!(self.output, "Selection: ");
        if self.output.flush().is_err() {
            eprintln!("failed to flush stdout");
        }
    }
}

impl<I: BufRead, O: Write> Bot for HumanBot<I, O> {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "at least one legal action must exist"
        );
        let mut highlight = false;
        loop {
            self.prompt(state, highlight);
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    let _ = writeln!(self.output, "\nInput closed. Exiting game.");
                    std::process::exit(0);
                }
                Ok(_) => {}
                Err(_) => {
                    eprintln!("failed to read input");
                    continue;
                }
            }
            match parse_selection(&line, state, legal_actions) {
                Selection::Act(action) => {
                    let _ = writeln!(
                        self.output,
                        "You selected: {}",
                        describe_action(state, &action)
                    );
                    return action;
                }
                Selection::Illegal => {
                    let _ = writeln!(
                        self.output,
                        "Can't play that one; doesn't match either the last card's color or number."
                    );
                    highlight = true;
                }
                Selection::NothingToDraw => {
                    let _ = writeln!(
                        self.output,
                        "There are no more cards that can be pulled..."
                    );
                }
                Selection::Help => {
                    let _ = writeln!(self.output, "Type the number next to a card to play it.");
                    let _ = writeln!(
                        self.output,
                        "'add' draws one card, 'quickadd' draws until something fits,"
                    );
                    let _ = writeln!(self.output, "'end' passes the turn and 'q' quits.");
                }
                Selection::Quit => {
                    let _ = writeln!(self.output, "Exiting game at user's request.");
                    std::process::exit(0);
                }
                Selection::Unrecognized => {
                    let _ = writeln!(self.output, "Invalid input: '{}'.", line.trim());
                }
            }
        }
    }
}
