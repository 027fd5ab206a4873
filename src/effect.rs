//! Consequences of playing a card, described without touching any state.
//!
//! [`plan_effect`] decides what a play does to the table; the game engine
//! carries the plan out and reports what happened as [`GameEvent`]s.

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Kind, Suit};

/// What must happen after a card leaves a hand, on top of the single turn
/// advance every non-final play gets.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct EffectPlan {
    /// Flip direction before advancing.
    pub reverse: bool,
    /// Advance one extra seat after any forced draw.
    pub skip_next: bool,
    /// Cards the next player is forced to draw.
    pub forced_draw: usize,
    /// The player who played must pick a swap target.
    pub swap_hands: bool,
    /// Every hand is collected and redealt.
    pub reshuffle_hands: bool,
    /// The player who played must name the next colour.
    pub choose_color: bool,
    /// The hand is empty: nothing above applies.
    pub ends_round: bool,
}

/// Plans the consequence of `kind` being played.
///
/// `last_card` suppresses every downstream effect so a player's final card
/// can never block the win. With two players a Reverse acts as a Skip.
pub fn plan_effect(kind: Kind, player_count: usize, last_card: bool) -> EffectPlan {
    let reverse = kind == Kind::Reverse;
    if last_card {
        return EffectPlan {
            reverse,
            ends_round: true,
            ..EffectPlan::default()
        };
    }
    let mut plan = EffectPlan {
        reverse,
        ..EffectPlan::default()
    };
    match kind {
        Kind::Numbered => {}
        Kind::Skip => plan.skip_next = true,
        Kind::Reverse => plan.skip_next = player_count == 2,
        Kind::DrawTwo => {
            plan.forced_draw = 2;
            plan.skip_next = true;
        }
        Kind::DrawFour => {
            plan.forced_draw = 4;
            plan.skip_next = true;
            plan.choose_color = true;
        }
        Kind::Wild => plan.choose_color = true,
        Kind::Swap => {
            plan.swap_hands = true;
            plan.choose_color = true;
        }
        Kind::Shuffle => {
            plan.reshuffle_hands = true;
            plan.choose_color = true;
        }
    }
    plan
}

/// Something that happened at the table, in the order it happened.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    OpeningCard { card: Card },
    Played { player: PlayerId, card: Card, remaining: usize },
    Uno { player: PlayerId },
    Skipped { player: PlayerId },
    Reversed,
    Drew { player: PlayerId, count: usize },
    NothingToDraw { player: PlayerId },
    Recycled { count: usize },
    ColorChosen { player: PlayerId, color: Suit },
    HandsSwapped { player: PlayerId, target: PlayerId },
    HandsReshuffled { dealer: PlayerId },
    TurnVoided { player: PlayerId },
    RoundWon { winner: PlayerId, points: u32 },
    RoundStalled,
    NewRound { round: usize, first_player: PlayerId },
    MatchWon { winner: PlayerId },
    MatchDrawn,
}
