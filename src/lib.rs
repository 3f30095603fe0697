//! No Thanks! game engine with a step-wise environment for reinforcement learning.

pub mod action;
pub mod card;
pub mod deck;
pub mod env;
pub mod error;
pub mod game;
pub mod ml;
pub mod player;
pub mod policies;
pub mod policy;
pub mod score;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, PlayerId};
pub use crate::card::{Card, GameSettings};
pub use crate::deck::Deck;
pub use crate::env::{EnvConfig, NoThanksEnv, Observation, Step, StepInfo};
pub use crate::error::{GameError, InvalidAction};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::ml::{OBSERVATION_FEATURES, ObservationEncoder, QNetwork};
pub use crate::player::Player;
pub use crate::policies::{
    ExternalPolicy, HeuristicPolicy, HeuristicWeights, HumanPolicy, QNetworkPolicy, RandomPolicy,
    create_policy_from_spec, label_for_spec,
};
pub use crate::policy::Policy;
pub use crate::score::{card_points, collapse_runs, score, winners};
pub use crate::state::{GameEvent, GameStateView, GameStatus, PlayerPublicState, Pool, TurnPhase};
pub use crate::visualize::{
    VisualOptions, describe_action, describe_event, format_cards, render_state,
    render_state_with_options,
};
