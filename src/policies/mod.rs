pub mod external;
pub mod heuristic;
pub mod human;
pub mod qnet;
pub mod random;
pub mod registry;

pub use external::ExternalPolicy;
pub use heuristic::{Evaluation, HeuristicPolicy, HeuristicWeights, decide, evaluate};
pub use human::HumanPolicy;
pub use qnet::QNetworkPolicy;
pub use random::RandomPolicy;
pub use registry::{create_policy_from_spec, label_for_spec};
