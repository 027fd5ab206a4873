//! Scoring utilities for the point-keeping mode.
//!
//! Current scoring rule (winner-only):
//!   points = sum of the point values of every card left in every hand
//! The round winner is credited; nobody else scores.
//! The match ends the first time a cumulative score reaches 500.
//! Stalled rounds award no points.

use crate::action::PlayerId;
use crate::card::Card;

/// Cumulative score that ends a match.
pub const MATCH_TARGET: u32 = 500;

/// Sum of the point values held across all hands.
pub fn round_points<H: AsRef<[Card]>>(hands: &[H]) -> u32 {
    hands
        .iter()
        .flat_map(|hand| hand.as_ref().iter())
        .map(|card| card.points)
        .sum()
}

/// First seat whose score has reached [`MATCH_TARGET`], if any.
pub fn match_winner(scores: &[u32]) -> Option<PlayerId> {
    scores.iter().position(|score| *score >= MATCH_TARGET)
}
