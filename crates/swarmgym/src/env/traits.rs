//! Core environment trait and step types.

use super::Reward;
use crate::spaces::DynSpace;
use crate::Result;
use ndarray::ArrayD;

/// Structured observation.
///
/// Combined-mode environments return a single array; non-combined multi-actor
/// environments return one entry per actor.
#[derive(Clone, Debug, PartialEq)]
pub enum Observation {
    /// Flat numeric observation
    Array(ArrayD<f64>),
    /// Ordered per-actor observations
    Tuple(Vec<Observation>),
}

impl Observation {
    /// Build a flat observation from raw values
    pub fn from_values(values: Vec<f64>) -> Self {
        let n = values.len();
        Observation::Array(ArrayD::from_shape_vec(ndarray::IxDyn(&[n]), values).unwrap())
    }

    /// Top-level length: array elements, or number of actors
    pub fn len(&self) -> usize {
        match self {
            Observation::Array(a) => a.len(),
            Observation::Tuple(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Underlying array, when this observation is flat
    pub fn as_array(&self) -> Option<&ArrayD<f64>> {
        match self {
            Observation::Array(a) => Some(a),
            Observation::Tuple(_) => None,
        }
    }

    /// Sub-observation of one actor, when per-actor structured
    pub fn component(&self, idx: usize) -> Option<&Observation> {
        match self {
            Observation::Array(_) => None,
            Observation::Tuple(list) => list.get(idx),
        }
    }

    /// Depth-first flattened values
    pub fn values(&self) -> Vec<f64> {
        match self {
            Observation::Array(a) => a.iter().copied().collect(),
            Observation::Tuple(list) => list.iter().flat_map(|o| o.values()).collect(),
        }
    }
}

/// Structured action, mirroring the space taxonomy
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Single index into a `Discrete` space
    Discrete(usize),
    /// One index per dimension of a `MultiDiscrete` space
    MultiDiscrete(Vec<usize>),
    /// Values for a `Box` space
    Continuous(Vec<f64>),
    /// Ordered sub-actions for a `Tuple` space
    Tuple(Vec<Action>),
}

impl Action {
    /// Short variant name, used in validation errors
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Discrete(_) => "Discrete",
            Action::MultiDiscrete(_) => "MultiDiscrete",
            Action::Continuous(_) => "Continuous",
            Action::Tuple(_) => "Tuple",
        }
    }
}

/// Information returned from environment steps
#[derive(Clone, Debug, Default)]
pub struct EnvInfo {
    /// Episode return (if done)
    pub episode_return: Option<f64>,
    /// Episode length (if done)
    pub episode_length: Option<u64>,
    /// Custom metrics (kept minimal)
    pub extra: smallvec::SmallVec<[(&'static str, f64); 4]>,
}

impl EnvInfo {
    /// Create empty info
    pub fn new() -> Self {
        Self::default()
    }

    /// Add episode stats
    pub fn with_episode_stats(mut self, ret: f64, len: u64) -> Self {
        self.episode_return = Some(ret);
        self.episode_length = Some(len);
        self
    }

    /// Add a custom metric (use rarely)
    pub fn with_extra(mut self, key: &'static str, value: f64) -> Self {
        self.extra.push((key, value));
        self
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "episode_return" => self.episode_return,
            "episode_length" => self.episode_length.map(|l| l as f64),
            _ => self.extra.iter().find(|(k, _)| k == &key).map(|(_, v)| *v),
        }
    }
}

/// Result from a single environment step
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Observation after the step
    pub observation: Observation,
    /// Reward received
    pub reward: Reward,
    /// Whether episode terminated (goal reached, failure, etc.)
    pub terminated: bool,
    /// Whether episode truncated (time limit, etc.)
    pub truncated: bool,
    /// Additional info
    pub info: EnvInfo,
}

impl StepResult {
    /// Check if episode is done (terminated or truncated)
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Core trait for swarmgym environments.
///
/// Action and observation spaces are fixed at construction; `reset` starts a
/// fresh episode and `close` is idempotent.
pub trait SimEnv: Send {
    /// Get the observation space
    fn observation_space(&self) -> DynSpace;

    /// Get the action space
    fn action_space(&self) -> DynSpace;

    /// Reset the environment and return the initial observation
    fn reset(&mut self) -> Result<Observation>;

    /// Advance one simulation tick with the given action
    fn step(&mut self, action: &Action) -> Result<StepResult>;

    /// Release simulator resources; safe to call more than once
    fn close(&mut self);

    /// Optional: render the current state
    fn render(&self) -> Option<String> {
        None
    }

    /// Number of controlled actors
    fn num_actors(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_observation_len() {
        let flat = Observation::from_values(vec![0.0, 0.0]);
        assert_eq!(flat.len(), 2);

        let per_actor = Observation::Tuple(vec![
            Observation::from_values(vec![0.0]),
            Observation::from_values(vec![0.0]),
        ]);
        assert_eq!(per_actor.len(), 2);
        assert_eq!(per_actor.component(1).unwrap().values(), vec![0.0]);
    }

    #[test]
    fn test_observation_values_flatten() {
        let nested = Observation::Tuple(vec![
            Observation::from_values(vec![1.0, 2.0]),
            Observation::Array(ArrayD::from_elem(IxDyn(&[1]), 3.0)),
        ]);
        assert_eq!(nested.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_env_info_get() {
        let info = EnvInfo::new()
            .with_episode_stats(4.0, 200)
            .with_extra("on_station", 1.0);
        assert_eq!(info.get("episode_return"), Some(4.0));
        assert_eq!(info.get("episode_length"), Some(200.0));
        assert_eq!(info.get("on_station"), Some(1.0));
        assert_eq!(info.get("missing"), None);
    }
}
