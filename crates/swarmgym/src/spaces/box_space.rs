//! Box (continuous) observation/action space

use super::Space;
use ndarray::{ArrayD, IxDyn};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

/// Box space for continuous values with per-element bounds
#[derive(Clone, Debug)]
pub struct BoxSpace {
    /// Lower bound for each element
    pub low: ArrayD<f64>,
    /// Upper bound for each element
    pub high: ArrayD<f64>,
    shape: Vec<usize>,
}

impl BoxSpace {
    /// Create a new box space with given bounds
    pub fn new(low: ArrayD<f64>, high: ArrayD<f64>) -> Self {
        assert_eq!(
            low.shape(),
            high.shape(),
            "Low and high must have same shape"
        );
        let shape = low.shape().to_vec();
        Self { low, high, shape }
    }

    /// Create a 1-D box from bound vectors
    pub fn from_bounds(low: Vec<f64>, high: Vec<f64>) -> Self {
        let n = low.len();
        Self::new(
            ArrayD::from_shape_vec(IxDyn(&[n]), low).unwrap(),
            ArrayD::from_shape_vec(IxDyn(&[n]), high).unwrap(),
        )
    }

    /// Create a box space with uniform bounds
    pub fn uniform(shape: &[usize], low: f64, high: f64) -> Self {
        let low_arr = ArrayD::from_elem(IxDyn(shape), low);
        let high_arr = ArrayD::from_elem(IxDyn(shape), high);
        Self::new(low_arr, high_arr)
    }

    /// Create a box space from -inf to +inf (unbounded)
    pub fn unbounded(shape: &[usize]) -> Self {
        Self::uniform(shape, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Create a unit box [0, 1] for all elements
    pub fn unit(shape: &[usize]) -> Self {
        Self::uniform(shape, 0.0, 1.0)
    }

    /// Create a symmetric box [-1, 1] for all elements
    pub fn symmetric(shape: &[usize]) -> Self {
        Self::uniform(shape, -1.0, 1.0)
    }
}

impl Space for BoxSpace {
    type Sample = ArrayD<f64>;

    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Sample {
        let mut result = ArrayD::zeros(IxDyn(&self.shape));
        for ((&l, &h), r) in self.low.iter().zip(self.high.iter()).zip(result.iter_mut()) {
            *r = if !l.is_finite() || !h.is_finite() {
                // no finite interval to draw from
                StandardNormal.sample(rng)
            } else if l == h {
                l
            } else {
                Uniform::new(l, h).sample(rng)
            };
        }
        result
    }

    fn contains(&self, value: &Self::Sample) -> bool {
        if value.shape() != self.low.shape() {
            return false;
        }
        value
            .iter()
            .zip(self.low.iter())
            .zip(self.high.iter())
            .all(|((&v, &l), &h)| v >= l && v <= h)
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_box_sample() {
        let space = BoxSpace::uniform(&[3], -1.0, 1.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let sample = space.sample(&mut rng);
            assert!(space.contains(&sample));
            assert_eq!(sample.shape(), &[3]);
        }
    }

    #[test]
    fn test_box_contains() {
        let space = BoxSpace::unit(&[2]);
        let valid = ArrayD::from_shape_vec(IxDyn(&[2]), vec![0.5, 0.5]).unwrap();
        let invalid = ArrayD::from_shape_vec(IxDyn(&[2]), vec![1.5, 0.5]).unwrap();

        assert!(space.contains(&valid));
        assert!(!space.contains(&invalid));
    }

    #[test]
    fn test_unbounded_contains_everything() {
        let space = BoxSpace::unbounded(&[1]);
        let huge = ArrayD::from_elem(IxDyn(&[1]), 1.0e12);
        assert!(space.contains(&huge));
    }
}
