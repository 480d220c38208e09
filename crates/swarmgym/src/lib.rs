//! # swarmgym
//!
//! A gym-style environment contract for mission-driven multi-vehicle
//! simulations.
//!
//! ## Overview
//!
//! swarmgym provides:
//! - Typed observation/action spaces (`Discrete`, `MultiDiscrete`, `Box`,
//!   `Tuple`) with per-variant action validation
//! - The `SimEnv` trait for step-based environments plus structured
//!   observation, action, and reward types
//! - A mission-configuration document model and builder (XML templates)
//! - An explicit, caller-owned environment registry
//! - A scripted-scenario driver with metric logging
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swarmgym::prelude::*;
//!
//! let mut registry = EnvRegistry::new();
//! let episode = run_scenario(
//!     &mut registry,
//!     "orbit-v0",
//!     || my_registry_entry(),
//!     200,
//!     |i| Action::Discrete(if i < 100 { 1 } else { 0 }),
//!     &NoOpLogger,
//! )?;
//! assert_eq!(episode.total_reward, 4.0);
//! ```

pub mod config;
pub mod driver;
pub mod env;
pub mod log;
pub mod mission;
pub mod registry;
pub mod spaces;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::EnvConfig;
    pub use crate::driver::{run_scenario, Episode};
    pub use crate::env::{Action, EnvInfo, Observation, Reward, SimEnv, StepResult};
    pub use crate::log::{CompositeLogger, ConsoleLogger, MetricLogger, NoOpLogger};
    pub use crate::mission::{find_mission, AutonomyFlags, MissionBuilder, MissionDoc};
    pub use crate::registry::{EnvRegistry, RegistryEntry};
    pub use crate::spaces::*;
    pub use crate::{Result, SwarmError};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum SwarmError {
    #[error("unknown environment id: {0}")]
    UnknownEnv(String),

    #[error("mission error: {0}")]
    Mission(String),

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("environment error: {0}")]
    Env(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, SwarmError>;
