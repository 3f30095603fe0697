use burn::tensor::backend::Backend;

use crate::action::Action;
use crate::ml::QNetwork;
use crate::policy::Policy;
use crate::state::GameStateView;

/// Greedy policy over a value network's estimates, restricted to legal actions.
pub struct QNetworkPolicy<B: Backend> {
    network: QNetwork<B>,
}

impl<B: Backend> QNetworkPolicy<B> {
    pub fn new(network: QNetwork<B>) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &QNetwork<B> {
        &self.network
    }
}

impl<B> Policy for QNetworkPolicy<B>
where
    B: Backend,
    B::Device: Default,
{
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "network policy requires at least one legal action"
        );
        let Some(values) = self.network.q_values(state) else {
            return legal_actions[0];
        };
        legal_actions
            .iter()
            .copied()
            .max_by(|a, b| values[a.index()].total_cmp(&values[b.index()]))
            .unwrap_or(legal_actions[0])
    }
}
