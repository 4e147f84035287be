use std::sync::Arc;

use crate::config::{ConfigError, SimulationConfig};
use crate::numeric::Scalar;
use crate::simulation::instance::{EstimatorInstance, StepError};

/// Seed-ordered collection of independent instances advanced in
/// lockstep.
///
/// Instances share one validated configuration but own disjoint streams
/// and state; stepping order never changes the numbers, only the
/// iteration order of per-step aggregation.
pub struct Ensemble<S: Scalar> {
    config: Arc<SimulationConfig>,
    instances: Vec<EstimatorInstance<S>>,
}

impl<S: Scalar> Ensemble<S> {
    /// Validates the configuration once and builds one instance per
    /// seed, in seed order.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config = Arc::new(config);
        let instances = config
            .seeds
            .iter()
            .map(|&seed| EstimatorInstance::with_shared_config(seed, Arc::clone(&config)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { config, instances })
    }

    /// Advances every instance by one step.
    pub fn advance_all(&mut self) -> Result<(), StepError> {
        for instance in &mut self.instances {
            instance.advance()?;
        }
        Ok(())
    }

    /// Shared logical clock: steps processed so far.
    #[inline]
    pub fn step(&self) -> usize {
        self.instances[0].step()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.step() >= self.config.step_count
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[inline]
    pub fn instances(&self) -> &[EstimatorInstance<S>] {
        &self.instances
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current reactive estimates across instances, in seed order.
    pub fn reactive_estimates(&self) -> Vec<f64> {
        self.instances
            .iter()
            .map(|i| i.reactive_theta().to_f64())
            .collect()
    }

    /// Current adaptive estimates across instances, in seed order.
    pub fn adaptive_estimates(&self) -> Vec<f64> {
        self.instances
            .iter()
            .map(|i| i.adaptive_theta().to_f64())
            .collect()
    }

    /// Current adaptive gains across instances, in seed order.
    pub fn adaptive_gains(&self) -> Vec<f64> {
        self.instances
            .iter()
            .map(|i| i.adaptive_alpha().to_f64())
            .collect()
    }
}
