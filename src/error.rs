use thiserror::Error;

use crate::action::PlayerId;
use crate::card::Suit;

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("game is already over")]
    GameOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of rejected actions. None of these change the game state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("card does not match the current color or number")]
    IllegalCard,
    #[error("there are no more cards that can be drawn")]
    NothingToDraw,
    #[error("action is not allowed in the current phase")]
    WrongPhase,
    #[error("{0} is not a color that can be chosen")]
    InvalidColor(Suit),
    #[error("player {0} cannot be swapped with")]
    InvalidSwapTarget(PlayerId),
}
