//! Single-vehicle command model.

use swarmgym::env::Action;
use swarmgym::mission::AutonomyFlags;
use swarmgym::spaces::{BoxSpace, Discrete, DynSpace, MultiDiscrete, Tuple};
use swarmgym::{Result, SwarmError};

/// One simulated vehicle: planar position driven by velocity commands.
///
/// The x axis is always commanded; the y axis only when `ctrl_y` is set. A
/// discrete command selects full forward (1) or full reverse (0) velocity on
/// its axis; a continuous command is the velocity itself.
#[derive(Clone, Debug)]
pub(crate) struct Vehicle {
    flags: AutonomyFlags,
    dt: f64,
    x: f64,
    y: f64,
}

impl Vehicle {
    pub fn new(flags: AutonomyFlags, dt: f64) -> Self {
        Self {
            flags,
            dt,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    /// Discreteness of each commanded axis, in order (x, then y if driven)
    fn axes(&self) -> Vec<bool> {
        let mut axes = vec![self.flags.x_discrete];
        if self.flags.ctrl_y {
            axes.push(self.flags.y_discrete);
        }
        axes
    }

    /// Number of commanded axes
    pub fn action_len(&self) -> usize {
        if self.flags.ctrl_y {
            2
        } else {
            1
        }
    }

    /// Action space derived from the autonomy flags
    pub fn action_space(&self) -> DynSpace {
        let axes = self.axes();
        if axes.iter().all(|&d| d) {
            if axes.len() == 1 {
                DynSpace::Discrete(Discrete::binary())
            } else {
                DynSpace::MultiDiscrete(MultiDiscrete::new(vec![2; axes.len()]))
            }
        } else if axes.iter().all(|&d| !d) {
            DynSpace::Box(BoxSpace::unbounded(&[axes.len()]))
        } else {
            DynSpace::Tuple(Tuple::new(
                axes.iter()
                    .map(|&d| {
                        if d {
                            DynSpace::Discrete(Discrete::binary())
                        } else {
                            DynSpace::Box(BoxSpace::unbounded(&[1]))
                        }
                    })
                    .collect(),
            ))
        }
    }

    /// The vehicle is observed through its x position
    pub fn observation_space(&self) -> DynSpace {
        DynSpace::Box(BoxSpace::unbounded(&[1]))
    }

    pub fn observe(&self) -> Vec<f64> {
        vec![self.x]
    }

    /// Decode a command and integrate one timestep
    pub fn apply(&mut self, action: &Action) -> Result<()> {
        self.action_space().validate(action)?;
        let vels = self.velocities(action)?;
        self.x += vels[0] * self.dt;
        if self.flags.ctrl_y {
            self.y += vels[1] * self.dt;
        }
        Ok(())
    }

    /// Reward for holding the orbit band around the origin
    pub fn reward(&self) -> f64 {
        let ring = self.x.abs().round();
        if ring > 0.0 && ring <= self.flags.radius {
            1.0
        } else {
            0.0
        }
    }

    fn velocities(&self, action: &Action) -> Result<Vec<f64>> {
        let axes = self.axes();
        match action {
            Action::Discrete(i) => Ok(vec![discrete_velocity(*i)]),
            Action::MultiDiscrete(v) => Ok(v.iter().map(|&i| discrete_velocity(i)).collect()),
            Action::Continuous(v) => Ok(v.clone()),
            Action::Tuple(list) => {
                let mut vels = Vec::with_capacity(axes.len());
                for (sub, &discrete) in list.iter().zip(axes.iter()) {
                    vels.push(match sub {
                        Action::Discrete(i) if discrete => discrete_velocity(*i),
                        Action::Continuous(v) if !discrete && v.len() == 1 => v[0],
                        other => {
                            return Err(SwarmError::InvalidAction(format!(
                                "{} sub-action does not fit axis command",
                                other.kind()
                            )))
                        }
                    });
                }
                Ok(vels)
            }
        }
    }
}

fn discrete_velocity(command: usize) -> f64 {
    if command == 1 {
        1.0
    } else {
        -1.0
    }
}
