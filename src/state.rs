use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, Suit};
use crate::error::GameError;
use crate::turn::{Direction, next_index};

/// Whether a seat is driven by the person at the keyboard or by the engine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    You,
    Cpu,
}

/// Who takes the first turn of every round.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FirstPlayer {
    /// The human seat (0) deals and goes first.
    #[default]
    You,
    /// A uniformly random CPU seat goes first.
    RandomCpu,
    Seat(PlayerId),
}

/// Global constants for a running match.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub hand_size: usize,
    pub include_extra_cards: bool,
    pub keep_score: bool,
    pub first_player: FirstPlayer,
}

impl GameSettings {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 2 and 10",
            ));
        }
        Ok(Self {
            num_players,
            hand_size: HAND_SIZE,
            include_extra_cards: false,
            keep_score: false,
            first_player: FirstPlayer::You,
        })
    }
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub hand_size: usize,
    pub score: u32,
    pub is_current: bool,
}

/// Status of the whole match.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
    Draw,
}

/// What the engine is waiting for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    /// The current player plays, draws or passes.
    AwaitingAction,
    /// `player` must name the colour after a colorless card.
    AwaitingColor { player: PlayerId },
    /// `player` must pick whose hand to take after a Swap.
    AwaitingSwapTarget { player: PlayerId },
    GameOver,
}

/// Game state snapshot tailored for bots and the console front end.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub round: usize,
    pub self_player: PlayerId,
    /// Seat whose turn it is.
    pub current_player: PlayerId,
    pub direction: Direction,
    /// `None` until the first colour is known.
    pub current_color: Option<Suit>,
    pub current_number: i8,
    pub top_discard: Option<Card>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub stalled_turns: usize,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}

impl GameStateView {
    /// Whether `card` may be played on the current discard state.
    pub fn is_playable(&self, card: &Card) -> bool {
        card.matches(self.current_color, self.current_number)
    }

    /// Seat that follows `seat` in the current direction.
    pub fn seat_after(&self, seat: PlayerId) -> PlayerId {
        next_index(seat, self.direction, self.players.len())
    }

    pub fn hand_size_of(&self, seat: PlayerId) -> usize {
        self.players
            .get(seat)
            .map(|player| player.hand_size)
            .unwrap_or_default()
    }
}
