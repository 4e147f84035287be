use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numeric domain the simulation runs in.
///
/// `Fixed16x16` keeps every estimator update in integer arithmetic, so
/// runs are bit-for-bit reproducible across platforms; `Floating` is
/// plain `f64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericMode {
    #[default]
    Floating,
    Fixed16x16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("seeds must not be empty")]
    EmptySeeds,

    #[error("step_count must be positive")]
    InvalidStepCount,

    #[error("learning_rate must be in (0, 1), got {0}")]
    InvalidLearningRate(f64),

    #[error("decay must be in (0, 1), got {0}")]
    InvalidDecay(f64),

    #[error("noise_sigma must be finite and non-negative, got {0}")]
    InvalidNoiseSigma(f64),

    #[error("alpha_floor must be positive and finite, got {0}")]
    InvalidAlphaFloor(f64),

    #[error("true_mean must be finite, got {0}")]
    InvalidTrueMean(f64),
}

/// Immutable simulation parameters, shared by every instance of an
/// ensemble.
///
/// Validation happens once, at construction of whatever consumes the
/// configuration; out-of-range values are rejected, never clamped. The
/// default is the reference five-seed experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// One estimator instance is created per seed, in order.
    pub seeds: Vec<u64>,
    pub step_count: usize,
    /// Base step size `eta` for both paths.
    pub learning_rate: f64,
    /// Geometric gain decay `gamma` of the adaptive path.
    pub decay: f64,
    /// Mean of the Gaussian signal both paths try to track.
    pub true_mean: f64,
    pub noise_sigma: f64,
    /// Lower bound the adaptive gain never falls below.
    pub alpha_floor: f64,
    pub numeric_mode: NumericMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seeds: vec![42, 7, 101, 2026, 99],
            step_count: 400,
            learning_rate: 0.12,
            decay: 0.985,
            true_mean: 3.5,
            noise_sigma: 1.2,
            alpha_floor: 0.005,
            numeric_mode: NumericMode::Floating,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seeds.is_empty() {
            return Err(ConfigError::EmptySeeds);
        }
        if self.step_count == 0 {
            return Err(ConfigError::InvalidStepCount);
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 || self.learning_rate >= 1.0
        {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if !self.decay.is_finite() || self.decay <= 0.0 || self.decay >= 1.0 {
            return Err(ConfigError::InvalidDecay(self.decay));
        }
        // `!(x >= 0.0)` also catches NaN.
        if !(self.noise_sigma >= 0.0) || !self.noise_sigma.is_finite() {
            return Err(ConfigError::InvalidNoiseSigma(self.noise_sigma));
        }
        if !self.alpha_floor.is_finite() || self.alpha_floor <= 0.0 {
            return Err(ConfigError::InvalidAlphaFloor(self.alpha_floor));
        }
        if !self.true_mean.is_finite() {
            return Err(ConfigError::InvalidTrueMean(self.true_mean));
        }
        Ok(())
    }
}
