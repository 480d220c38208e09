//! Caller-owned environment registry.
//!
//! Maps string identifiers to a constructor plus fixed configuration. The
//! registry is an explicit object handed to the driver by reference; there is
//! no process-wide state.

use crate::config::EnvConfig;
use crate::env::SimEnv;
use crate::{Result, SwarmError};
use std::collections::HashMap;

/// Boxed environment constructor
pub type EnvFactory = Box<dyn Fn(&EnvConfig) -> Result<Box<dyn SimEnv>> + Send + Sync>;

/// Everything registered under one identifier
pub struct RegistryEntry {
    /// Constructor entry point
    pub factory: EnvFactory,
    /// Construction arguments
    pub config: EnvConfig,
    /// Episode step cap
    pub max_episode_steps: u64,
    /// Reward threshold considered solved
    pub reward_threshold: f64,
}

/// Registry of environment identifiers
#[derive(Default)]
pub struct EnvRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl EnvRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identifier.
    ///
    /// Idempotent: an already-registered identifier keeps its existing entry
    /// untouched and `false` is returned.
    pub fn register(&mut self, id: impl Into<String>, entry: RegistryEntry) -> bool {
        let id = id.into();
        if self.entries.contains_key(&id) {
            tracing::debug!(id = %id, "environment already registered, keeping existing entry");
            return false;
        }
        tracing::info!(id = %id, "environment registered");
        self.entries.insert(id, entry);
        true
    }

    /// Whether an identifier is registered
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered entry for an identifier
    pub fn entry(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    /// Number of registered identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Construct an environment for a registered identifier
    pub fn make(&self, id: &str) -> Result<Box<dyn SimEnv>> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| SwarmError::UnknownEnv(id.to_string()))?;
        (entry.factory)(&entry.config)
    }
}
