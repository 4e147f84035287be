use std::sync::mpsc::Sender;

use crate::config::{ConfigError, NumericMode, SimulationConfig};
use crate::metrics::{MetricsAggregator, MetricsCurve, MetricsSnapshot};
use crate::numeric::{Q16, Scalar};
use crate::simulation::ensemble::Ensemble;
use crate::simulation::instance::StepError;

/// Drives an ensemble through its configured horizon, recording one
/// metrics snapshot per step.
pub struct SimulationRunner<S: Scalar> {
    ensemble: Ensemble<S>,
    aggregator: MetricsAggregator,
    progress_tx: Option<Sender<MetricsSnapshot>>,
}

impl<S: Scalar> SimulationRunner<S> {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let true_mean = config.true_mean;
        Ok(Self {
            ensemble: Ensemble::new(config)?,
            aggregator: MetricsAggregator::new(true_mean),
            progress_tx: None,
        })
    }

    /// Streams each snapshot to `tx` as it is recorded. A disconnected
    /// receiver does not stop the run.
    pub fn with_progress(mut self, tx: Sender<MetricsSnapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Advances the ensemble one step and records the snapshot.
    pub fn step(&mut self) -> Result<MetricsSnapshot, StepError> {
        self.ensemble.advance_all()?;
        let snapshot = self.aggregator.observe(&self.ensemble);
        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(snapshot);
        }
        Ok(snapshot)
    }

    /// Runs every remaining step.
    pub fn run(&mut self) -> Result<(), StepError> {
        while !self.ensemble.is_finished() {
            self.step()?;
        }
        Ok(())
    }

    #[inline]
    pub fn ensemble(&self) -> &Ensemble<S> {
        &self.ensemble
    }

    #[inline]
    pub fn curve(&self) -> &MetricsCurve {
        self.aggregator.curve()
    }
}

/// Numeric-mode front door: one constructor, the arithmetic domain
/// chosen purely by configuration.
pub enum Simulation {
    Floating(SimulationRunner<f64>),
    Fixed(SimulationRunner<Q16>),
}

impl Simulation {
    pub fn from_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        match config.numeric_mode {
            NumericMode::Floating => Ok(Self::Floating(SimulationRunner::new(config)?)),
            NumericMode::Fixed16x16 => Ok(Self::Fixed(SimulationRunner::new(config)?)),
        }
    }

    pub fn run(&mut self) -> Result<(), StepError> {
        match self {
            Self::Floating(runner) => runner.run(),
            Self::Fixed(runner) => runner.run(),
        }
    }

    pub fn curve(&self) -> &MetricsCurve {
        match self {
            Self::Floating(runner) => runner.curve(),
            Self::Fixed(runner) => runner.curve(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        match self {
            Self::Floating(runner) => runner.ensemble().config(),
            Self::Fixed(runner) => runner.ensemble().config(),
        }
    }
}
