//! Observation and action space types.
//!
//! A closed taxonomy of gym-compatible spaces. Every environment declares its
//! action and observation spaces as a [`DynSpace`], and incoming actions are
//! checked against the declared variant with [`DynSpace::validate`].

mod box_space;
mod discrete;
mod multi_discrete;
mod tuple;

pub use box_space::BoxSpace;
pub use discrete::Discrete;
pub use multi_discrete::MultiDiscrete;
pub use tuple::Tuple;

use crate::env::Action;
use crate::{Result, SwarmError};
use rand::Rng;

/// Trait for observation and action spaces
pub trait Space: Clone + Send + Sync {
    /// The type of samples from this space
    type Sample;

    /// Sample a random element from this space
    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Sample;

    /// Check if a value is contained in this space
    fn contains(&self, value: &Self::Sample) -> bool;

    /// Get the shape of samples from this space
    fn shape(&self) -> &[usize];

    /// Get the total number of elements in a flattened sample
    fn num_elements(&self) -> usize {
        self.shape().iter().product()
    }
}

/// Enum over the space variants, fixed at environment construction
#[derive(Clone, Debug)]
pub enum DynSpace {
    Discrete(Discrete),
    MultiDiscrete(MultiDiscrete),
    Box(BoxSpace),
    Tuple(Tuple),
}

impl DynSpace {
    /// Short variant name, used in validation errors
    pub fn kind(&self) -> &'static str {
        match self {
            DynSpace::Discrete(_) => "Discrete",
            DynSpace::MultiDiscrete(_) => "MultiDiscrete",
            DynSpace::Box(_) => "Box",
            DynSpace::Tuple(_) => "Tuple",
        }
    }

    /// Shape of a flattened sample
    pub fn shape(&self) -> Vec<usize> {
        match self {
            DynSpace::Discrete(s) => s.shape().to_vec(),
            DynSpace::MultiDiscrete(s) => s.shape().to_vec(),
            DynSpace::Box(s) => s.shape().to_vec(),
            DynSpace::Tuple(s) => s.shape().to_vec(),
        }
    }

    /// Number of scalars in a flattened sample
    pub fn flat_len(&self) -> usize {
        match self {
            DynSpace::Discrete(s) => s.num_elements(),
            DynSpace::MultiDiscrete(s) => s.num_elements(),
            DynSpace::Box(s) => s.num_elements(),
            DynSpace::Tuple(s) => s.num_elements(),
        }
    }

    /// Sample a valid action from this space
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Action {
        match self {
            DynSpace::Discrete(s) => Action::Discrete(s.sample(rng)),
            DynSpace::MultiDiscrete(s) => Action::MultiDiscrete(s.sample(rng)),
            DynSpace::Box(s) => Action::Continuous(s.sample(rng).into_iter().collect()),
            DynSpace::Tuple(s) => Action::Tuple(s.spaces.iter().map(|c| c.sample(rng)).collect()),
        }
    }

    /// Check an action against this space, naming the mismatch on failure
    pub fn validate(&self, action: &Action) -> Result<()> {
        match (self, action) {
            (DynSpace::Discrete(s), Action::Discrete(i)) => {
                if *i < s.n {
                    Ok(())
                } else {
                    Err(SwarmError::InvalidAction(format!(
                        "discrete action {} out of range 0..{}",
                        i, s.n
                    )))
                }
            }
            (DynSpace::MultiDiscrete(s), Action::MultiDiscrete(v)) => {
                if v.len() != s.nvec.len() {
                    return Err(SwarmError::InvalidAction(format!(
                        "expected {} action dimensions, got {}",
                        s.nvec.len(),
                        v.len()
                    )));
                }
                for (dim, (&val, &n)) in v.iter().zip(s.nvec.iter()).enumerate() {
                    if val >= n {
                        return Err(SwarmError::InvalidAction(format!(
                            "action {} out of range 0..{} in dimension {}",
                            val, n, dim
                        )));
                    }
                }
                Ok(())
            }
            (DynSpace::Box(s), Action::Continuous(v)) => {
                if v.len() != s.num_elements() {
                    return Err(SwarmError::InvalidAction(format!(
                        "expected {} continuous values, got {}",
                        s.num_elements(),
                        v.len()
                    )));
                }
                for (dim, ((&val, &lo), &hi)) in
                    v.iter().zip(s.low.iter()).zip(s.high.iter()).enumerate()
                {
                    if (lo.is_finite() && val < lo) || (hi.is_finite() && val > hi) {
                        return Err(SwarmError::InvalidAction(format!(
                            "value {} outside [{}, {}] in dimension {}",
                            val, lo, hi, dim
                        )));
                    }
                }
                Ok(())
            }
            (DynSpace::Tuple(s), Action::Tuple(list)) => {
                if list.len() != s.spaces.len() {
                    return Err(SwarmError::InvalidAction(format!(
                        "expected {} sub-actions, got {}",
                        s.spaces.len(),
                        list.len()
                    )));
                }
                for (child_space, child_action) in s.spaces.iter().zip(list.iter()) {
                    child_space.validate(child_action)?;
                }
                Ok(())
            }
            (space, action) => Err(SwarmError::InvalidAction(format!(
                "{} action does not match {} space",
                action.kind(),
                space.kind()
            ))),
        }
    }

    /// Concatenate spaces into a joint space.
    ///
    /// All-discrete inputs collapse to a single `MultiDiscrete`, all-box
    /// inputs to a single flat `Box`. Anything mixed stays a `Tuple`.
    pub fn concat(spaces: &[DynSpace]) -> DynSpace {
        let all_discrete = spaces
            .iter()
            .all(|s| matches!(s, DynSpace::Discrete(_) | DynSpace::MultiDiscrete(_)));
        if all_discrete {
            let mut nvec = Vec::new();
            for s in spaces {
                match s {
                    DynSpace::Discrete(d) => nvec.push(d.n),
                    DynSpace::MultiDiscrete(m) => nvec.extend_from_slice(&m.nvec),
                    _ => unreachable!(),
                }
            }
            return DynSpace::MultiDiscrete(MultiDiscrete::new(nvec));
        }

        let all_box = spaces.iter().all(|s| matches!(s, DynSpace::Box(_)));
        if all_box {
            let mut low = Vec::new();
            let mut high = Vec::new();
            for s in spaces {
                if let DynSpace::Box(b) = s {
                    low.extend(b.low.iter().copied());
                    high.extend(b.high.iter().copied());
                }
            }
            return DynSpace::Box(BoxSpace::from_bounds(low, high));
        }

        DynSpace::Tuple(Tuple::new(spaces.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_matching_variants() {
        let space = DynSpace::Discrete(Discrete::new(2));
        assert!(space.validate(&Action::Discrete(1)).is_ok());
        assert!(space.validate(&Action::Discrete(2)).is_err());
        assert!(space.validate(&Action::Continuous(vec![0.5])).is_err());
    }

    #[test]
    fn test_validate_tuple_recurses() {
        let space = DynSpace::Tuple(Tuple::new(vec![
            DynSpace::Discrete(Discrete::new(2)),
            DynSpace::Box(BoxSpace::symmetric(&[1])),
        ]));
        let good = Action::Tuple(vec![Action::Discrete(0), Action::Continuous(vec![0.3])]);
        let bad = Action::Tuple(vec![Action::Discrete(0), Action::Continuous(vec![7.0])]);
        assert!(space.validate(&good).is_ok());
        assert!(space.validate(&bad).is_err());
    }

    #[test]
    fn test_concat_all_discrete() {
        let joint = DynSpace::concat(&[
            DynSpace::Discrete(Discrete::new(2)),
            DynSpace::Discrete(Discrete::new(2)),
        ]);
        match joint {
            DynSpace::MultiDiscrete(m) => assert_eq!(m.nvec, vec![2, 2]),
            other => panic!("expected MultiDiscrete, got {}", other.kind()),
        }
    }

    #[test]
    fn test_concat_all_box() {
        let joint = DynSpace::concat(&[
            DynSpace::Box(BoxSpace::unbounded(&[1])),
            DynSpace::Box(BoxSpace::unbounded(&[1])),
        ]);
        match joint {
            DynSpace::Box(b) => assert_eq!(b.shape(), &[2]),
            other => panic!("expected Box, got {}", other.kind()),
        }
    }

    #[test]
    fn test_concat_mixed_stays_tuple() {
        let joint = DynSpace::concat(&[
            DynSpace::Discrete(Discrete::new(2)),
            DynSpace::Box(BoxSpace::unbounded(&[1])),
        ]);
        assert!(matches!(joint, DynSpace::Tuple(_)));
    }

    #[test]
    fn test_sample_is_valid() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let spaces = [
            DynSpace::Discrete(Discrete::new(3)),
            DynSpace::MultiDiscrete(MultiDiscrete::new(vec![2, 4])),
            DynSpace::Box(BoxSpace::symmetric(&[2])),
            DynSpace::Tuple(Tuple::new(vec![
                DynSpace::Discrete(Discrete::new(2)),
                DynSpace::Box(BoxSpace::unit(&[1])),
            ])),
        ];
        for space in &spaces {
            for _ in 0..20 {
                let action = space.sample(&mut rng);
                assert!(space.validate(&action).is_ok());
            }
        }
    }
}
