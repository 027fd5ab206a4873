use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::{Action, PlayerId};
use crate::bot::Bot;
use crate::card::{Card, Kind, Suit};
use crate::state::{GameStateView, TurnPhase};

/// Hand size at or below which an opponent is considered close to winning.
pub const LOW_CARD_THRESHOLD: usize = 5;

/// Order in which colorless cards are spent when no rule singles one out.
const COLORLESS_FALLBACK: [Kind; 4] = [Kind::Wild, Kind::DrawFour, Kind::Shuffle, Kind::Swap];

/// The computer opponent.
///
/// In plain English:
/// - Match the colour or number whenever possible and save colorless cards
///   for when nothing matches. When points are kept, play the matching card
///   with the lowest point value; otherwise pick any matching card at random.
/// - With only colorless cards, hit a nearly-empty next player with Draw 4,
///   or steal a nearly-empty hand with Swap when that does not grow our own
///   hand; otherwise play a plain Wild.
/// - With nothing to play, draw one card at a time; pass once the piles are dry.
/// - Name the colour we hold most of; pick the smallest hand to swap with.
pub struct CpuBot<R: Rng> {
    rng: R,
}

impl<R: Rng> CpuBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn choose_play(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Option<Action> {
        let plays: Vec<(usize, Card)> = legal_actions
            .iter()
            .filter_map(Action::hand_index)
            .filter_map(|idx| state.hand.get(idx).map(|card| (idx, *card)))
            .collect();
        if plays.is_empty() {
            return None;
        }

        let colored: Vec<(usize, Card)> = plays
            .iter()
            .copied()
            .filter(|(_, card)| !card.is_colorless())
            .collect();
        if !colored.is_empty() {
            let pick = if state.settings.keep_score {
                colored.iter().min_by_key(|(_, card)| card.points).copied()
            } else {
                colored.choose(&mut self.rng).copied()
            };
            return pick.map(|(hand_index, _)| Action::Play { hand_index });
        }

        let find = |kind: Kind| {
            plays
                .iter()
                .find(|(_, card)| card.kind == kind)
                .map(|(idx, _)| *idx)
        };
        let next = state.seat_after(state.self_player);
        if state.hand_size_of(next) <= LOW_CARD_THRESHOLD {
            if let Some(hand_index) = find(Kind::DrawFour) {
                return Some(Action::Play { hand_index });
            }
        }
        if let Some(hand_index) = find(Kind::Swap) {
            if Self::swap_is_worthwhile(state) {
                return Some(Action::Play { hand_index });
            }
        }
        COLORLESS_FALLBACK
            .into_iter()
            .find_map(find)
            .map(|hand_index| Action::Play { hand_index })
    }

    /// Some other hand is small, and taking the smallest one would not leave
    /// us holding more cards than we would after playing the Swap.
    fn swap_is_worthwhile(state: &GameStateView) -> bool {
        let Some(target) = swap_target(state) else {
            return false;
        };
        let target_size = state.hand_size_of(target);
        let own_after_play = state.hand.len().saturating_sub(1);
        target_size <= LOW_CARD_THRESHOLD && target_size <= own_after_play
    }

    fn choose_color(&mut self, hand: &[Card]) -> Suit {
        recommend_color(hand)
            .or_else(|| Suit::COLORS.choose(&mut self.rng).copied())
            .unwrap_or(Suit::Red)
    }
}

/// Colour with the most cards in `hand`, ties going to the earlier colour.
/// `None` when the hand holds no coloured card.
pub fn recommend_color(hand: &[Card]) -> Option<Suit> {
    let mut counts = [0usize; 4];
    for card in hand {
        if let Some(slot) = Suit::COLORS.iter().position(|suit| *suit == card.suit) {
            counts[slot] += 1;
        }
    }
    let mut best: Option<(Suit, usize)> = None;
    for (suit, count) in Suit::COLORS.into_iter().zip(counts) {
        if count == 0 {
            continue;
        }
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((suit, count));
        }
    }
    best.map(|(suit, _)| suit)
}

/// Other player with the fewest cards, lowest seat on ties.
pub fn swap_target(state: &GameStateView) -> Option<PlayerId> {
    state
        .players
        .iter()
        .filter(|player| player.id != state.self_player)
        .min_by_key(|player| (player.hand_size, player.id))
        .map(|player| player.id)
}

impl<R: Rng> Bot for CpuBot<R> {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "cpu bot requires at least one legal action"
        );
        let chosen = match state.phase {
            TurnPhase::AwaitingAction => self.choose_play(state, legal_actions).or_else(|| {
                legal_actions
                    .iter()
                    .find(|action| matches!(action, Action::Draw))
                    .or_else(|| legal_actions.iter().find(|action| matches!(action, Action::Pass)))
                    .copied()
            }),
            TurnPhase::AwaitingColor { .. } => {
                Some(Action::ChooseColor(self.choose_color(&state.hand)))
            }
            TurnPhase::AwaitingSwapTarget { .. } => {
                swap_target(state).map(Action::ChooseSwapTarget)
            }
            TurnPhase::GameOver => None,
        };
        chosen
            .filter(|action| legal_actions.contains(action))
            .unwrap_or(legal_actions[0])
    }
}
