use std::fmt::Write;

use crate::action::{Action, PlayerId};
use crate::card::Card;
use crate::effect::GameEvent;
use crate::state::{GameStateView, GameStatus, Role, TurnPhase};
use crate::turn::Direction;

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    /// Mark the cards that can be played right now.
    pub highlight_legal: bool,
    pub show_scores: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            highlight_legal: false,
            show_scores: true,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Ongoing => format!("Round {}", state.round),
        GameStatus::Finished { winner } => {
            format!("Finished (winner: {})", player_name(state, winner))
        }
        GameStatus::Draw => String::from("Finished (draw)"),
    };
    let _ = writeln!(out, "Game status: {status}");
    let top = state
        .top_discard
        .map(|card| card.label())
        .unwrap_or_else(|| String::from("--"));
    let color = state
        .current_color
        .map(|suit| suit.to_string())
        .unwrap_or_else(|| String::from("unassigned"));
    let _ = writeln!(
        out,
        "Discard pile: {top} ({})  |  Color: {color}",
        state.discard_pile_count
    );
    let arrow = match state.direction {
        Direction::Forward => "->",
        Direction::Reverse => "<-",
    };
    let _ = writeln!(out, "Draw pile: {}  |  Order: {arrow}", state.draw_pile_count);
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let current_tag = if player.is_current { " <- current" } else { "" };
        let score = if options.show_scores && state.settings.keep_score {
            format!(", {} pts", player.score)
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "  {} - {} card{}{score}{current_tag}",
            player.name,
            player.hand_size,
            if player.hand_size == 1 { "" } else { "s" }
        );
    }
    let _ = writeln!(out, "{}", render_hand(state, options.highlight_legal));
    out
}

/// Renders the perspective player's hand with 1-based positions. Legal
/// cards are wrapped in `*` when `highlight_legal` is set.
pub fn render_hand(state: &GameStateView, highlight_legal: bool) -> String {
    if state.hand.is_empty() {
        return String::from("Hand: (empty)");
    }
    let entries: Vec<String> = state
        .hand
        .iter()
        .enumerate()
        .map(|(idx, card)| {
            if highlight_legal && state.is_playable(card) {
                format!("({}) *{}*", idx + 1, card.label())
            } else {
                format!("({}) {}", idx + 1, card.label())
            }
        })
        .collect();
    format!("Hand: {}", entries.join(" || "))
}

pub fn describe_action(state: &GameStateView, action: &Action) -> String {
    match action {
        Action::Play { hand_index } => {
            let card = state
                .hand
                .get(*hand_index)
                .map(Card::label)
                .unwrap_or_else(|| String::from("--"));
            format!("Play ({}) {card}", hand_index + 1)
        }
        Action::Draw => String::from("Draw a card"),
        Action::DrawUntilPlayable => String::from("Draw until a card can be played"),
        Action::Pass => String::from("End turn"),
        Action::ChooseColor(color) => format!("Choose {color}"),
        Action::ChooseSwapTarget(target) => {
            format!("Swap hands with {}", player_name(state, *target))
        }
    }
}

/// One line of table talk for an event.
pub fn describe_event(state: &GameStateView, event: &GameEvent) -> String {
    let name = |id: PlayerId| player_name(state, id);
    match event {
        GameEvent::OpeningCard { card } => format!("{} added to the discard pile.", card.label()),
        GameEvent::Played {
            player,
            card,
            remaining,
        } => format!("{} ({remaining}): played {}.", name(*player), card.label()),
        GameEvent::Uno { player } => format!(
            "{} {} UNO!",
            name(*player),
            verb(state, *player, "have", "has")
        ),
        GameEvent::Skipped { player } => {
            format!("{} turn was skipped!", possessive(state, *player))
        }
        GameEvent::Reversed => String::from("Play order reversed!"),
        GameEvent::Drew { player, count } => format!(
            "{} drew {count} card{}. Card count is now {}.",
            name(*player),
            if *count == 1 { "" } else { "s" },
            state.hand_size_of(*player)
        ),
        GameEvent::NothingToDraw { .. } => {
            String::from("There are no more cards that can be pulled...")
        }
        GameEvent::Recycled { count } => {
            format!("The discard pile was shuffled back into the deck ({count} cards).")
        }
        GameEvent::ColorChosen { player, color } => {
            format!("{} chose {color}. The new color is {color}.", name(*player))
        }
        GameEvent::HandsSwapped { player, target } => {
            format!("{} swapped hands with {}!", name(*player), name(*target))
        }
        GameEvent::HandsReshuffled { dealer } => {
            format!("{} shuffled every hand together and dealt them back out!", name(*dealer))
        }
        GameEvent::TurnVoided { player } => {
            format!("{} can't play at all this turn.", name(*player))
        }
        GameEvent::RoundWon { winner, points } => {
            if *points > 0 {
                format!("{} won the round and scored {points} points.", name(*winner))
            } else {
                format!("{} won the round.", name(*winner))
            }
        }
        GameEvent::RoundStalled => {
            String::from("Since no one can play their cards, the round ends in a draw.")
        }
        GameEvent::NewRound {
            round,
            first_player,
        } => format!("Round {round} begins. {} goes first.", name(*first_player)),
        GameEvent::MatchWon { winner } => format!("GAME OVER! {} won.", name(*winner)),
        GameEvent::MatchDrawn => {
            let count = state.players.len();
            if count > 2 {
                format!("GAME OVER! The game ends in a {count}-way draw.")
            } else {
                String::from("GAME OVER! The game ends in a draw.")
            }
        }
    }
}

/// One-line prompt describing what the engine waits for.
pub fn describe_phase(state: &GameStateView) -> String {
    match state.phase {
        TurnPhase::AwaitingAction => {
            format!("{} to play.", player_name(state, state.current_player))
        }
        TurnPhase::AwaitingColor { player } => {
            format!("{} must choose a color.", player_name(state, player))
        }
        TurnPhase::AwaitingSwapTarget { player } => {
            format!("{} must choose a hand to swap with.", player_name(state, player))
        }
        TurnPhase::GameOver => String::from("Game over."),
    }
}

fn player_name(state: &GameStateView, id: PlayerId) -> String {
    state
        .players
        .get(id)
        .map(|player| player.name.clone())
        .unwrap_or_else(|| format!("Player {}", id + 1))
}

fn is_you(state: &GameStateView, id: PlayerId) -> bool {
    state
        .players
        .get(id)
        .is_some_and(|player| player.role == Role::You)
}

fn verb(
    state: &GameStateView,
    id: PlayerId,
    you: &'static str,
    other: &'static str,
) -> &'static str {
    if is_you(state, id) { you } else { other }
}

fn possessive(state: &GameStateView, id: PlayerId) -> String {
    if is_you(state, id) {
        String::from("Your")
    } else {
        format!("{}'s", player_name(state, id))
    }
}
