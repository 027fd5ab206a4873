use serde::{Deserialize, Serialize};

use crate::card::Suit;

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Action available to an agent. Which variants are legal depends on the
/// current turn phase.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play the card at `hand_index` onto the discard pile.
    Play { hand_index: usize },
    /// Draw a single card; the turn stays with the player.
    Draw,
    /// Keep drawing until a playable card arrives or nothing is left.
    DrawUntilPlayable,
    /// End the turn without playing. Counts as a void turn.
    Pass,
    /// Name the colour after a colorless card.
    ChooseColor(Suit),
    /// Pick whose hand to take after a Swap card.
    ChooseSwapTarget(PlayerId),
}

impl Action {
    /// Returns the hand index if the action is a play.
    pub fn hand_index(&self) -> Option<usize> {
        match self {
            Action::Play { hand_index } => Some(*hand_index),
            _ => None,
        }
    }

    pub fn is_play(&self) -> bool {
        matches!(self, Action::Play { .. })
    }
}
