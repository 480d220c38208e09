//! Tuple observation/action space

use super::{DynSpace, Space};
use crate::env::Action;
use rand::Rng;

/// Tuple space containing an ordered list of sub-spaces.
///
/// Non-combined multi-actor environments declare one sub-space per actor.
#[derive(Clone, Debug)]
pub struct Tuple {
    /// Ordered sub-spaces
    pub spaces: Vec<DynSpace>,
    shape: Vec<usize>,
}

impl Tuple {
    /// Create a new tuple space
    pub fn new(spaces: Vec<DynSpace>) -> Self {
        let total: usize = spaces.iter().map(|s| s.flat_len()).sum();
        Self {
            spaces,
            shape: vec![total],
        }
    }

    /// Number of sub-spaces
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }
}

impl Space for Tuple {
    type Sample = Vec<Action>;

    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Sample {
        self.spaces.iter().map(|s| s.sample(rng)).collect()
    }

    fn contains(&self, value: &Self::Sample) -> bool {
        value.len() == self.spaces.len()
            && value
                .iter()
                .zip(self.spaces.iter())
                .all(|(v, s)| s.validate(v).is_ok())
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spaces::{BoxSpace, Discrete};

    #[test]
    fn test_tuple_creation() {
        let tuple = Tuple::new(vec![
            DynSpace::Discrete(Discrete::binary()),
            DynSpace::Box(BoxSpace::unit(&[2])),
        ]);
        assert_eq!(tuple.len(), 2);
        assert_eq!(tuple.shape(), &[3]); // 1 (discrete) + 2 (box)
    }

    #[test]
    fn test_tuple_contains() {
        let tuple = Tuple::new(vec![
            DynSpace::Discrete(Discrete::binary()),
            DynSpace::Discrete(Discrete::binary()),
        ]);
        assert!(tuple.contains(&vec![Action::Discrete(0), Action::Discrete(1)]));
        assert!(!tuple.contains(&vec![Action::Discrete(0)]));
        assert!(!tuple.contains(&vec![Action::Discrete(0), Action::Discrete(2)]));
    }
}
