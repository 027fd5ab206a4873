use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::state::GameStateView;

/// Baseline bot that plays a random legal card when it has one.
///
/// Drawing and passing are only sampled when no card can be played, which
/// keeps random tables from stalling on purpose.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(&mut self, _state: &GameStateView, legal_actions: &[Action]) -> Action {
        let plays: Vec<Action> = legal_actions
            .iter()
            .copied()
            .filter(|action| action.is_play())
            .collect();
        if let Some(action) = plays.choose(&mut self.rng) {
            return *action;
        }
        if legal_actions.contains(&Action::Draw) {
            return Action::Draw;
        }
        legal_actions
            .choose(&mut self.rng)
            .copied()
            .expect("at least one legal action must be available")
    }
}
