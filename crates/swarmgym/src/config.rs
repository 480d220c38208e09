//! Environment construction arguments.

use crate::mission::WORKING_MISSION_FILE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Arguments every environment is constructed with.
///
/// `timeout` is carried opaquely to the environment; nothing at this layer
/// enforces it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Enable rendering
    pub enable_gui: bool,
    /// Merge per-actor action/observation spaces into one joint space
    pub combine_actors: bool,
    /// Simulator session timeout, seconds
    pub timeout: f64,
    /// Working mission file consumed at construction
    pub mission_file: PathBuf,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            enable_gui: false,
            combine_actors: false,
            timeout: 600.0,
            mission_file: PathBuf::from(WORKING_MISSION_FILE),
        }
    }
}
