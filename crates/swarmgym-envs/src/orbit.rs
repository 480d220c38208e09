//! Mission-driven planar orbit environment.

use crate::vehicle::Vehicle;
use std::time::Duration;
use swarmgym::config::EnvConfig;
use swarmgym::env::{Action, EnvInfo, Observation, Reward, SimEnv, StepResult};
use swarmgym::mission::MissionDoc;
use swarmgym::spaces::{DynSpace, Tuple};
use swarmgym::{Result, SwarmError};

/// Deterministic multi-vehicle environment.
///
/// One vehicle per mission entity. With `combine_actors` the per-vehicle
/// spaces are concatenated into joint spaces and rewards are summed into a
/// scalar; otherwise spaces are `Tuple`-typed and rewards stay per-actor.
pub struct OrbitEnv {
    vehicles: Vec<Vehicle>,
    combine_actors: bool,
    enable_gui: bool,
    timeout: Duration,
    action_space: DynSpace,
    observation_space: DynSpace,
    tick: u64,
    closed: bool,
}

impl OrbitEnv {
    /// Construct from configuration, reading the working mission file
    pub fn new(config: &EnvConfig) -> Result<Self> {
        let doc = MissionDoc::parse_file(&config.mission_file)?;
        Self::from_mission(&doc, config)
    }

    /// Construct from an already-parsed mission document
    pub fn from_mission(doc: &MissionDoc, config: &EnvConfig) -> Result<Self> {
        let count = doc.entity_count();
        if count == 0 {
            return Err(SwarmError::Mission("mission has no entity nodes".into()));
        }

        if !config.timeout.is_finite() || config.timeout < 0.0 {
            return Err(SwarmError::Env(format!(
                "invalid timeout: {}",
                config.timeout
            )));
        }

        let dt = doc.run_timestep();
        let vehicles = (0..count)
            .map(|i| Ok(Vehicle::new(doc.entity_autonomy(i)?, dt)))
            .collect::<Result<Vec<Vehicle>>>()?;

        let (action_space, observation_space) = declare_spaces(&vehicles, config.combine_actors);

        tracing::debug!(
            vehicles = count as u64,
            combine_actors = config.combine_actors,
            action_space = action_space.kind(),
            "orbit environment constructed"
        );

        Ok(Self {
            vehicles,
            combine_actors: config.combine_actors,
            enable_gui: config.enable_gui,
            timeout: Duration::from_secs_f64(config.timeout),
            action_space,
            observation_space,
            tick: 0,
            closed: false,
        })
    }

    /// Session timeout carried from construction arguments
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn observe(&self) -> Observation {
        if self.vehicles.len() == 1 || self.combine_actors {
            let values: Vec<f64> = self.vehicles.iter().flat_map(|v| v.observe()).collect();
            Observation::from_values(values)
        } else {
            Observation::Tuple(
                self.vehicles
                    .iter()
                    .map(|v| Observation::from_values(v.observe()))
                    .collect(),
            )
        }
    }

    /// Split a joint action into one command per vehicle
    fn per_vehicle_actions(&self, action: &Action) -> Result<Vec<Action>> {
        if self.vehicles.len() == 1 {
            return Ok(vec![action.clone()]);
        }

        if !self.combine_actors {
            match action {
                Action::Tuple(list) => return Ok(list.clone()),
                other => {
                    return Err(SwarmError::InvalidAction(format!(
                        "expected one sub-action per actor, got {}",
                        other.kind()
                    )))
                }
            }
        }

        match action {
            Action::MultiDiscrete(v) => {
                let mut actions = Vec::with_capacity(self.vehicles.len());
                let mut offset = 0;
                for vehicle in &self.vehicles {
                    let len = vehicle.action_len();
                    let slice = &v[offset..offset + len];
                    actions.push(if len == 1 {
                        Action::Discrete(slice[0])
                    } else {
                        Action::MultiDiscrete(slice.to_vec())
                    });
                    offset += len;
                }
                Ok(actions)
            }
            Action::Continuous(v) => {
                let mut actions = Vec::with_capacity(self.vehicles.len());
                let mut offset = 0;
                for vehicle in &self.vehicles {
                    let len = vehicle.action_len();
                    actions.push(Action::Continuous(v[offset..offset + len].to_vec()));
                    offset += len;
                }
                Ok(actions)
            }
            // mixed per-vehicle spaces do not collapse into a joint space
            Action::Tuple(list) => Ok(list.clone()),
            other => Err(SwarmError::InvalidAction(format!(
                "{} action does not match the joint space",
                other.kind()
            ))),
        }
    }
}

impl SimEnv for OrbitEnv {
    fn observation_space(&self) -> DynSpace {
        self.observation_space.clone()
    }

    fn action_space(&self) -> DynSpace {
        self.action_space.clone()
    }

    fn reset(&mut self) -> Result<Observation> {
        for vehicle in &mut self.vehicles {
            vehicle.reset();
        }
        self.tick = 0;
        self.closed = false;
        Ok(self.observe())
    }

    fn step(&mut self, action: &Action) -> Result<StepResult> {
        if self.closed {
            return Err(SwarmError::Env("step on a closed environment".into()));
        }
        self.action_space.validate(action)?;

        let commands = self.per_vehicle_actions(action)?;
        for (vehicle, command) in self.vehicles.iter_mut().zip(commands) {
            vehicle.apply(&command)?;
        }
        self.tick += 1;

        let rewards: Vec<f64> = self.vehicles.iter().map(|v| v.reward()).collect();
        let reward = if self.vehicles.len() == 1 || self.combine_actors {
            Reward::Scalar(rewards.iter().sum())
        } else {
            Reward::PerActor(rewards)
        };

        Ok(StepResult {
            observation: self.observe(),
            reward,
            terminated: false,
            truncated: false,
            info: EnvInfo::new(),
        })
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            tracing::debug!(ticks = self.tick, "orbit environment closed");
        }
    }

    fn render(&self) -> Option<String> {
        if !self.enable_gui {
            return None;
        }
        let span = 10.0;
        let mut lines = Vec::with_capacity(self.vehicles.len());
        for vehicle in &self.vehicles {
            let cell = ((vehicle.x() + span) / (2.0 * span) * 20.0).clamp(0.0, 20.0) as usize;
            let mut strip = vec![' '; 21];
            strip[cell] = 'v';
            lines.push(format!("[{}]", strip.iter().collect::<String>()));
        }
        Some(lines.join("\n"))
    }

    fn num_actors(&self) -> usize {
        self.vehicles.len()
    }
}

fn declare_spaces(vehicles: &[Vehicle], combine_actors: bool) -> (DynSpace, DynSpace) {
    if vehicles.len() == 1 {
        return (vehicles[0].action_space(), vehicles[0].observation_space());
    }

    let action_parts: Vec<DynSpace> = vehicles.iter().map(|v| v.action_space()).collect();
    let obs_parts: Vec<DynSpace> = vehicles.iter().map(|v| v.observation_space()).collect();

    if combine_actors {
        (
            DynSpace::concat(&action_parts),
            DynSpace::concat(&obs_parts),
        )
    } else {
        (
            DynSpace::Tuple(Tuple::new(action_parts)),
            DynSpace::Tuple(Tuple::new(obs_parts)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarmgym::mission::MissionBuilder;
    use swarmgym::spaces::Space;

    fn mission(x_discrete: bool, y_discrete: bool, ctrl_y: bool, num_actors: usize) -> MissionDoc {
        let template = r#"
<mission>
  <run start="0" end="200" dt="1"/>
  <entity_common>
    <autonomy x_discrete="true" y_discrete="true" ctrl_y="false" radius="2"/>
  </entity_common>
  <entity team_id="1">
    <state x="0" y="0"/>
  </entity>
</mission>"#;
        let mut doc = MissionDoc::parse_str(template).unwrap();
        MissionBuilder {
            x_discrete,
            y_discrete,
            ctrl_y,
            num_actors,
        }
        .apply(&mut doc)
        .unwrap();
        doc
    }

    fn config(combine_actors: bool) -> EnvConfig {
        EnvConfig {
            combine_actors,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_actor_spaces() {
        let env = OrbitEnv::from_mission(&mission(true, true, false, 1), &config(false)).unwrap();
        assert!(matches!(env.action_space(), DynSpace::Discrete(d) if d.n == 2));
        assert!(matches!(env.observation_space(), DynSpace::Box(_)));
        assert_eq!(env.num_actors(), 1);
    }

    #[test]
    fn test_two_actor_combined_spaces() {
        let env = OrbitEnv::from_mission(&mission(true, false, false, 2), &config(true)).unwrap();
        assert!(
            matches!(env.action_space(), DynSpace::MultiDiscrete(m) if m.nvec == vec![2, 2])
        );
        assert!(matches!(env.observation_space(), DynSpace::Box(b) if b.shape() == [2]));
    }

    #[test]
    fn test_two_actor_tuple_spaces() {
        let env = OrbitEnv::from_mission(&mission(true, false, false, 2), &config(false)).unwrap();
        assert!(matches!(env.action_space(), DynSpace::Tuple(t) if t.len() == 2));
        assert!(matches!(env.observation_space(), DynSpace::Tuple(t) if t.len() == 2));
    }

    #[test]
    fn test_step_rewards_per_actor() {
        let mut env =
            OrbitEnv::from_mission(&mission(true, false, false, 2), &config(false)).unwrap();
        env.reset().unwrap();
        let result = env
            .step(&Action::Tuple(vec![Action::Discrete(1), Action::Discrete(0)]))
            .unwrap();
        // both vehicles moved one unit into the band, in opposite directions
        assert_eq!(result.reward, Reward::PerActor(vec![1.0, 1.0]));
        assert_eq!(result.observation.component(0).unwrap().values(), vec![1.0]);
        assert_eq!(
            result.observation.component(1).unwrap().values(),
            vec![-1.0]
        );
    }

    #[test]
    fn test_combined_step_sums_reward() {
        let mut env =
            OrbitEnv::from_mission(&mission(true, false, false, 2), &config(true)).unwrap();
        env.reset().unwrap();
        let result = env.step(&Action::MultiDiscrete(vec![1, 0])).unwrap();
        assert_eq!(result.reward, Reward::Scalar(2.0));
        assert_eq!(result.observation.values(), vec![1.0, -1.0]);
    }

    #[test]
    fn test_close_is_idempotent_and_reset_reopens() {
        let mut env = OrbitEnv::from_mission(&mission(true, true, false, 1), &config(false)).unwrap();
        env.reset().unwrap();
        env.close();
        env.close();
        assert!(env.step(&Action::Discrete(1)).is_err());

        env.reset().unwrap();
        assert!(env.step(&Action::Discrete(1)).is_ok());
    }

    #[test]
    fn test_render_respects_gui_flag() {
        let doc = mission(true, true, false, 1);
        let headless = OrbitEnv::from_mission(&doc, &config(false)).unwrap();
        assert!(headless.render().is_none());

        let gui = OrbitEnv::from_mission(
            &doc,
            &EnvConfig {
                enable_gui: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(gui.render().is_some());
    }

    #[test]
    fn test_mission_without_entities_is_rejected() {
        let doc = MissionDoc::parse_str(
            r#"<mission><entity_common><autonomy x_discrete="true" y_discrete="true" ctrl_y="false" radius="2"/></entity_common></mission>"#,
        )
        .unwrap();
        assert!(OrbitEnv::from_mission(&doc, &config(false)).is_err());
    }
}
