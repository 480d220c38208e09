//! Scripted-scenario driver.
//!
//! Runs one fixed-length episode against a registered environment: look the
//! identifier up (registering it once on a miss), reset, feed scripted
//! actions, accumulate reward, close. Environment faults propagate.

use crate::env::{Action, Observation, SimEnv};
use crate::log::MetricLogger;
use crate::registry::{EnvRegistry, RegistryEntry};
use crate::{Result, SwarmError};

/// Everything a finished scenario hands back for assertions
pub struct Episode {
    /// The environment, with its space descriptors intact
    pub env: Box<dyn SimEnv>,
    /// Reset observation first, then one observation per step
    pub observations: Vec<Observation>,
    /// Sum of `Reward::total()` over all steps
    pub total_reward: f64,
}

/// Run a scripted episode.
///
/// `entry` supplies the registration for `id` and is consulted only when the
/// registry does not know the identifier yet. `action` maps the step index to
/// the action for that step.
pub fn run_scenario<E, A>(
    registry: &mut EnvRegistry,
    id: &str,
    entry: E,
    steps: usize,
    mut action: A,
    logger: &dyn MetricLogger,
) -> Result<Episode>
where
    E: FnOnce() -> RegistryEntry,
    A: FnMut(usize) -> Action,
{
    let mut env = match registry.make(id) {
        Ok(env) => env,
        Err(SwarmError::UnknownEnv(_)) => {
            registry.register(id, entry());
            registry.make(id)?
        }
        Err(e) => return Err(e),
    };

    let mut observations = Vec::with_capacity(steps + 1);
    observations.push(env.reset()?);

    let mut total_reward = 0.0;
    for i in 0..steps {
        let result = env.step(&action(i))?;
        total_reward += result.reward.total();
        observations.push(result.observation);
    }

    env.close();

    logger.log_metrics(
        &[
            ("episode/total_reward", total_reward),
            ("episode/steps", steps as f64),
        ],
        steps as u64,
    );
    tracing::info!(id = %id, steps = steps as u64, total_reward, "scenario finished");

    Ok(Episode {
        env,
        observations,
        total_reward,
    })
}
