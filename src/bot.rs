use crate::action::Action;
use crate::state::GameStateView;

/// Interface for anything that can take a seat at the table.
///
/// The engine asks for a card (or draw/pass) while the phase is
/// `AwaitingAction`, for a colour while it is `AwaitingColor`, and for a
/// swap target while it is `AwaitingSwapTarget`. `legal_actions` only ever
/// contains actions valid for that phase and is never empty.
pub trait Bot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action;
}
