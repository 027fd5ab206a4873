//! UNO-style card-matching engine for one human and a table of CPU opponents.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod effect;
pub mod error;
pub mod game;
pub mod piles;
pub mod score;
pub mod state;
pub mod turn;
pub mod visualize;

pub use crate::action::{Action, PlayerId};
pub use crate::bot::Bot;
pub use crate::bots::registry::{create_bot_from_spec, label_for_spec};
pub use crate::bots::{CpuBot, HumanBot, RandomBot};
pub use crate::card::{Card, Kind, Suit};
pub use crate::effect::{EffectPlan, GameEvent, plan_effect};
pub use crate::error::{GameError, InvalidAction};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::piles::Piles;
pub use crate::score::{MATCH_TARGET, match_winner, round_points};
pub use crate::state::{
    FirstPlayer, GameSettings, GameStateView, GameStatus, PlayerPublicState, Role, TurnPhase,
};
pub use crate::turn::{Direction, TurnOrder, next_index};
pub use crate::visualize::{
    VisualOptions, describe_action, describe_event, describe_phase, render_hand, render_state,
};
