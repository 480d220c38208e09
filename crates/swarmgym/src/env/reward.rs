//! Tagged reward variant with an explicit reduction.

/// Reward returned from a step: one scalar for the whole environment, or one
/// value per actor when actors are not combined.
#[derive(Clone, Debug, PartialEq)]
pub enum Reward {
    Scalar(f64),
    PerActor(Vec<f64>),
}

impl Reward {
    /// Reduce to a single value; the only place per-actor rewards are summed.
    pub fn total(&self) -> f64 {
        match self {
            Reward::Scalar(r) => *r,
            Reward::PerActor(rs) => rs.iter().sum(),
        }
    }

    /// Per-actor values, if this reward carries them
    pub fn per_actor(&self) -> Option<&[f64]> {
        match self {
            Reward::Scalar(_) => None,
            Reward::PerActor(rs) => Some(rs),
        }
    }
}

impl From<f64> for Reward {
    fn from(r: f64) -> Self {
        Reward::Scalar(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_total() {
        assert_eq!(Reward::Scalar(1.5).total(), 1.5);
        assert!(Reward::Scalar(1.5).per_actor().is_none());
    }

    #[test]
    fn test_per_actor_total() {
        let r = Reward::PerActor(vec![1.0, 0.0, 2.0]);
        assert_eq!(r.total(), 3.0);
        assert_eq!(r.per_actor(), Some(&[1.0, 0.0, 2.0][..]));
    }

    #[test]
    fn test_empty_per_actor() {
        assert_eq!(Reward::PerActor(Vec::new()).total(), 0.0);
    }
}
