use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::policy::Policy;
use crate::state::GameStateView;

/// Baseline policy that samples uniformly from the legal action set.
pub struct RandomPolicy<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Policy for RandomPolicy<R> {
    fn select_action(&mut self, _state: &GameStateView, legal_actions: &[Action]) -> Action {
        legal_actions
            .choose(&mut self.rng)
            .copied()
            .expect("at least one legal action must be available")
    }
}
