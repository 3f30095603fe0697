use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation::relu;
use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};

use crate::action::Action;
use crate::state::GameStateView;

use super::encoding::{OBSERVATION_FEATURES, ObservationEncoder};

pub const DEFAULT_HIDDEN: usize = 64;
pub const DEFAULT_TRUNK: usize = 2;

/// Dueling action-value network: a shared trunk feeding a state-value head and
/// an advantage head, recombined as `Q = V + A - mean(A)`. Outputs are indexed
/// by `Action::index`; higher is better.
#[derive(Module, Debug)]
pub struct QNetwork<B: Backend> {
    trunk: Vec<Linear<B>>,
    value: Linear<B>,
    advantage: Linear<B>,
}

impl<B> QNetwork<B>
where
    B: Backend,
    B::Device: Default,
{
    pub fn new(hidden: usize, trunk_depth: usize) -> Self {
        assert!(trunk_depth > 0, "trunk depth must be positive");
        let device = B::Device::default();
        let trunk = (0..trunk_depth)
            .map(|layer| {
                let input = if layer == 0 { OBSERVATION_FEATURES } else { hidden };
                LinearConfig::new(input, hidden).init(&device)
            })
            .collect();
        Self {
            trunk,
            value: LinearConfig::new(hidden, 1).init(&device),
            advantage: LinearConfig::new(hidden, Action::COUNT).init(&device),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_HIDDEN, DEFAULT_TRUNK)
    }

    /// `[batch, OBSERVATION_FEATURES]` in, `[batch, Action::COUNT]` out.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let features = self
            .trunk
            .iter()
            .fold(input, |activations, layer| relu(layer.forward(activations)));
        let value = self.value.forward(features.clone());
        let advantage = self.advantage.forward(features);
        // [batch, 1] terms broadcast across the action axis.
        let centered = advantage.clone() - advantage.mean_dim(1);
        value + centered
    }

    /// Runs a batch of environment observations through the network.
    pub fn forward_observations(
        &self,
        observations: &[[f32; OBSERVATION_FEATURES]],
    ) -> Tensor<B, 2> {
        let flat: Vec<f32> = observations.iter().flatten().copied().collect();
        let data = TensorData::new(flat, [observations.len(), OBSERVATION_FEATURES]);
        self.forward(Tensor::from_data(data, &B::Device::default()))
    }

    pub fn forward_state(&self, state: &GameStateView) -> Tensor<B, 1> {
        let batch = ObservationEncoder::encode_tensor::<B>(state);
        self.forward(batch).reshape([Action::COUNT])
    }

    /// Q-values as plain floats, `None` if the backend cannot read them back.
    pub fn q_values(&self, state: &GameStateView) -> Option<[f32; Action::COUNT]> {
        let values = self.forward_state(state).into_data().to_vec::<f32>().ok()?;
        values.try_into().ok()
    }
}
