pub mod encoding;
pub mod qnet;

pub use encoding::{OBSERVATION_FEATURES, ObservationEncoder};
pub use qnet::{DEFAULT_HIDDEN, DEFAULT_TRUNK, QNetwork};
