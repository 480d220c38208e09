//! Built-in environments for swarmgym.
//!
//! Provides `OrbitEnv`, a deterministic planar-vehicle simulation driven by
//! mission-configuration files: one vehicle per mission entity, velocity
//! commands on up to two axes, and a station-keeping reward band.

mod orbit;
mod vehicle;

pub use orbit::OrbitEnv;
