use crate::action::Action;
use crate::state::GameStateView;

/// Interface shared by every decision maker at the table.
///
/// `state` is the acting player's view: own hand and chips plus the pool.
/// `legal_actions` is never empty and contains only `Take` when passing is
/// not allowed.
pub trait Policy {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        (**self).select_action(state, legal_actions)
    }
}
