use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::policies::{HeuristicPolicy, HumanPolicy, RandomPolicy};
use crate::policy::Policy;

/// Returns a normalized label for a policy spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a policy instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - heuristic
pub fn create_policy_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Policy>, Box<dyn Error>> {
    match label_for_spec(spec).as_str() {
        "human" => {
            let name = spec
                .split_once(':')
                .map(|(_, name)| name.trim().to_string())
                .unwrap_or_else(|| format!("Human {index}"));
            Ok(Box::new(HumanPolicy::new(name)))
        }
        "random" => {
            let custom_seed = spec
                .split_once(':')
                .and_then(|(_, value)| value.trim().parse::<u64>().ok())
                .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
            Ok(Box::new(RandomPolicy::new(StdRng::seed_from_u64(custom_seed))))
        }
        "heuristic" => Ok(Box::new(HeuristicPolicy::new())),
        _ => Err(format!("unrecognized policy spec: {spec}").into()),
    }
}
