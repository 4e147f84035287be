use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::config::ConfigError;
use crate::numeric::Scalar;

/// Finite, immutable sequence of Gaussian samples.
///
/// Generated once from a seeded generator: the same seed, count, and
/// distribution parameters always reproduce the same sequence. Fixed-mode
/// streams convert each draw through `Scalar::from_f64` at generation
/// time, so the integer stream is exactly the truncation of the float
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseStream<S> {
    samples: Vec<S>,
}

impl<S: Scalar> NoiseStream<S> {
    /// Draws `count` samples from `Normal(mean, sigma)` seeded by `seed`.
    ///
    /// `sigma = 0` produces a constant stream equal to `mean`.
    pub fn generate(seed: u64, count: usize, mean: f64, sigma: f64) -> Result<Self, ConfigError> {
        let normal = Normal::new(mean, sigma).map_err(|_| {
            if mean.is_finite() {
                ConfigError::InvalidNoiseSigma(sigma)
            } else {
                ConfigError::InvalidTrueMean(mean)
            }
        })?;
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = (0..count)
            .map(|_| S::from_f64(normal.sample(&mut rng)))
            .collect();
        Ok(Self { samples })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn get(&self, step: usize) -> Option<S> {
        self.samples.get(step).copied()
    }

    #[inline]
    pub fn samples(&self) -> &[S] {
        &self.samples
    }
}
