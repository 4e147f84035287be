use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, SimulationConfig};
use crate::estimators::{AdaptiveRule, AdaptiveState, ReactiveRule};
use crate::noise::NoiseStream;
use crate::numeric::Scalar;

/// Raised when a caller advances past the configured horizon.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("cannot advance past the final step; all {step_count} samples were consumed")]
    OutOfRange { step_count: usize },
}

/// One independently seeded simulation: a private noise stream, both
/// estimator paths, and their recorded trajectories.
///
/// The stream is drawn once at construction and owned exclusively by
/// this instance; `advance` only ever reads it.
pub struct EstimatorInstance<S: Scalar> {
    seed: u64,
    config: Arc<SimulationConfig>,
    stream: NoiseStream<S>,
    reactive_rule: ReactiveRule<S>,
    adaptive_rule: AdaptiveRule<S>,
    reactive_theta: S,
    adaptive_state: AdaptiveState<S>,
    reactive_history: Vec<S>,
    adaptive_history: Vec<S>,
    step: usize,
}

impl<S: Scalar> EstimatorInstance<S> {
    /// Validates the configuration and builds a ready-to-run instance.
    pub fn new(seed: u64, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_shared_config(seed, Arc::new(config))
    }

    /// Construction path used by `Ensemble`, which validates once for
    /// all of its instances.
    pub(crate) fn with_shared_config(
        seed: u64,
        config: Arc<SimulationConfig>,
    ) -> Result<Self, ConfigError> {
        let stream = NoiseStream::generate(
            seed,
            config.step_count,
            config.true_mean,
            config.noise_sigma,
        )?;
        let reactive_rule = ReactiveRule::new(config.learning_rate);
        let adaptive_rule =
            AdaptiveRule::new(config.learning_rate, config.decay, config.alpha_floor);
        let step_count = config.step_count;

        Ok(Self {
            seed,
            config,
            stream,
            reactive_rule,
            adaptive_rule,
            reactive_theta: S::zero(),
            adaptive_state: AdaptiveState::initial(),
            reactive_history: Vec::with_capacity(step_count),
            adaptive_history: Vec::with_capacity(step_count),
            step: 0,
        })
    }

    /// Consumes the next sample and moves both paths one step.
    ///
    /// Each path updates from its own gradient; neither sees the other's
    /// state, nor any post-update value from the same step. Advancing a
    /// finished instance is a caller error, not a silent no-op.
    pub fn advance(&mut self) -> Result<(), StepError> {
        let Some(sample) = self.stream.get(self.step) else {
            return Err(StepError::OutOfRange {
                step_count: self.stream.len(),
            });
        };

        self.reactive_theta = self.reactive_rule.apply(self.reactive_theta, sample);
        self.adaptive_state = self.adaptive_rule.apply(self.adaptive_state, sample);

        self.reactive_history.push(self.reactive_theta);
        self.adaptive_history.push(self.adaptive_state.theta);
        self.step += 1;
        Ok(())
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of steps processed so far.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.step >= self.stream.len()
    }

    #[inline]
    pub fn reactive_theta(&self) -> S {
        self.reactive_theta
    }

    #[inline]
    pub fn adaptive_theta(&self) -> S {
        self.adaptive_state.theta
    }

    #[inline]
    pub fn adaptive_alpha(&self) -> S {
        self.adaptive_state.alpha
    }

    #[inline]
    pub fn reactive_history(&self) -> &[S] {
        &self.reactive_history
    }

    #[inline]
    pub fn adaptive_history(&self) -> &[S] {
        &self.adaptive_history
    }

    #[inline]
    pub fn stream(&self) -> &NoiseStream<S> {
        &self.stream
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Q16;
    use crate::testing::zero_noise_config;

    fn noisy_single_seed_config(step_count: usize) -> SimulationConfig {
        SimulationConfig {
            seeds: vec![42],
            step_count,
            ..Default::default()
        }
    }

    #[test]
    fn reactive_trace_matches_the_reference_recursion() {
        let mut instance =
            EstimatorInstance::<f64>::new(42, zero_noise_config(5, 0.2)).unwrap();
        while !instance.is_finished() {
            instance.advance().unwrap();
        }

        let expected = [0.7, 1.26, 1.708, 2.0664, 2.35312];
        assert_eq!(instance.reactive_history().len(), expected.len());
        for (got, want) in instance.reactive_history().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got={got}, want={want}");
        }
    }

    #[test]
    fn adaptive_trace_matches_the_closed_form_recursion() {
        let mut instance =
            EstimatorInstance::<f64>::new(42, zero_noise_config(5, 0.2)).unwrap();
        while !instance.is_finished() {
            instance.advance().unwrap();
        }

        let mut theta = 0.0f64;
        let mut alpha = 1.0f64;
        for &got in instance.adaptive_history() {
            let grad = theta - 3.5;
            theta -= (0.2 * alpha) * grad;
            alpha = f64::max(0.005, alpha * 0.985);
            assert_eq!(got, theta);
        }
        assert_eq!(instance.adaptive_alpha(), alpha);
    }

    #[test]
    fn fixed_first_step_matches_the_integer_recursion() {
        let mut instance =
            EstimatorInstance::<Q16>::new(7, zero_noise_config(3, 0.12)).unwrap();
        instance.advance().unwrap();
        // 0 - (7864 * -229376 >> 16) = 27524
        assert_eq!(instance.reactive_theta().raw(), 27524);
    }

    #[test]
    fn advancing_past_the_final_step_errors() {
        let mut instance =
            EstimatorInstance::<f64>::new(1, zero_noise_config(3, 0.2)).unwrap();
        for _ in 0..3 {
            instance.advance().unwrap();
        }
        assert!(instance.is_finished());
        assert_eq!(
            instance.advance(),
            Err(StepError::OutOfRange { step_count: 3 })
        );
    }

    #[test]
    fn histories_grow_one_entry_per_step() {
        let mut instance =
            EstimatorInstance::<f64>::new(5, zero_noise_config(10, 0.2)).unwrap();
        for expected in 1..=10 {
            instance.advance().unwrap();
            assert_eq!(instance.step(), expected);
            assert_eq!(instance.reactive_history().len(), expected);
            assert_eq!(instance.adaptive_history().len(), expected);
        }
    }

    #[test]
    fn identical_seeds_produce_identical_fixed_runs() {
        let config = noisy_single_seed_config(200);
        let mut a = EstimatorInstance::<Q16>::new(42, config.clone()).unwrap();
        let mut b = EstimatorInstance::<Q16>::new(42, config).unwrap();
        while !a.is_finished() {
            a.advance().unwrap();
            b.advance().unwrap();
        }
        assert_eq!(a.reactive_history(), b.reactive_history());
        assert_eq!(a.adaptive_history(), b.adaptive_history());
    }

    #[test]
    fn zero_noise_runs_converge_monotonically() {
        let mut instance =
            EstimatorInstance::<f64>::new(3, zero_noise_config(400, 0.12)).unwrap();
        while !instance.is_finished() {
            instance.advance().unwrap();
        }

        for history in [instance.reactive_history(), instance.adaptive_history()] {
            let mut previous = 0.0;
            for &theta in history {
                assert!(theta >= previous);
                assert!(theta <= 3.5);
                previous = theta;
            }
        }

        // At step 200 the reactive path is already inside 1e-3.
        assert!((instance.reactive_history()[199] - 3.5).abs() < 1e-3);
        assert!((instance.adaptive_theta() - 3.5).abs() < 1e-2);
    }
}
