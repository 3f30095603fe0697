use crate::action::Action;
use crate::policy::Policy;
use crate::state::GameStateView;

/// Adapter for decision makers living outside the crate, such as a learned
/// value function. The closure's answer is passed to the engine unchanged, so
/// an illegal pass surfaces as an error instead of being rewritten.
pub struct ExternalPolicy<F> {
    decide: F,
}

impl<F> ExternalPolicy<F>
where
    F: FnMut(&GameStateView, &[Action]) -> Action,
{
    pub fn new(decide: F) -> Self {
        Self { decide }
    }
}

impl<F> Policy for ExternalPolicy<F>
where
    F: FnMut(&GameStateView, &[Action]) -> Action,
{
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        (self.decide)(state, legal_actions)
    }
}
