use crate::metrics::curve::MetricsCurve;
use crate::metrics::snapshot::{MetricsSnapshot, PathStats};
use crate::numeric::Scalar;
use crate::simulation::Ensemble;

/// Population statistics of `values` against the known target.
///
/// Empty input yields NaN across the board, mirroring an estimator that
/// has seen nothing yet.
pub fn path_stats(values: &[f64], true_mean: f64) -> PathStats {
    if values.is_empty() {
        return PathStats {
            mean: f64::NAN,
            std: f64::NAN,
            rmse: f64::NAN,
        };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    let rmse = (values.iter().map(|v| (v - true_mean).powi(2)).sum::<f64>() / n).sqrt();
    PathStats { mean, std, rmse }
}

/// First index whose value drops strictly below `threshold`, or `None`
/// when the series never crosses.
pub fn first_below(series: &[f64], threshold: f64) -> Option<usize> {
    series.iter().position(|&v| v < threshold)
}

/// Computes per-step cross-instance statistics and records them.
///
/// Reads the ensemble's current state; never mutates it.
pub struct MetricsAggregator {
    true_mean: f64,
    curve: MetricsCurve,
}

impl MetricsAggregator {
    pub fn new(true_mean: f64) -> Self {
        Self {
            true_mean,
            curve: MetricsCurve::default(),
        }
    }

    /// Takes one snapshot of the ensemble's current state and appends it
    /// to the recorded curve. Meant to be called once after each
    /// `advance_all`; the snapshot's step index is the step just
    /// processed.
    pub fn observe<S: Scalar>(&mut self, ensemble: &Ensemble<S>) -> MetricsSnapshot {
        let snapshot = MetricsSnapshot {
            step: ensemble.step().saturating_sub(1),
            reactive: path_stats(&ensemble.reactive_estimates(), self.true_mean),
            adaptive: path_stats(&ensemble.adaptive_estimates(), self.true_mean),
        };
        self.curve.push(snapshot);
        snapshot
    }

    #[inline]
    pub fn true_mean(&self) -> f64 {
        self.true_mean
    }

    #[inline]
    pub fn curve(&self) -> &MetricsCurve {
        &self.curve
    }

    pub fn into_curve(self) -> MetricsCurve {
        self.curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::testing::zero_noise_config;

    #[test]
    fn stats_match_hand_computed_values() {
        let stats = path_stats(&[1.0, 2.0, 3.0], 3.5);
        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.std - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((stats.rmse - (8.75f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn identical_values_have_zero_spread() {
        let stats = path_stats(&[0.75, 0.75, 0.75], 3.5);
        assert_eq!(stats.mean, 0.75);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.rmse, 2.75);
    }

    #[test]
    fn empty_values_yield_nan() {
        let stats = path_stats(&[], 3.5);
        assert!(stats.mean.is_nan());
        assert!(stats.std.is_nan());
        assert!(stats.rmse.is_nan());
    }

    #[test]
    fn first_below_is_strict_and_returns_the_earliest_index() {
        let series = [0.5, 0.3, 0.1, 0.05, 0.2];
        assert_eq!(first_below(&series, 0.2), Some(2));
        assert_eq!(first_below(&series, 0.05), None);
        assert_eq!(first_below(&series, 10.0), Some(0));
        assert_eq!(first_below(&[], 1.0), None);
    }

    #[test]
    fn observe_appends_one_snapshot_per_step() {
        let mut ensemble = Ensemble::<f64>::new(zero_noise_config(3, 0.2)).unwrap();
        let mut aggregator = MetricsAggregator::new(3.5);

        for expected_step in 0..3 {
            ensemble.advance_all().unwrap();
            let snapshot = aggregator.observe(&ensemble);
            assert_eq!(snapshot.step, expected_step);
        }
        assert_eq!(aggregator.curve().len(), 3);
    }

    #[test]
    fn quiet_ensembles_collapse_to_a_point() {
        // Zero noise and a shared configuration: every seed produces the
        // same trajectory, so the spread vanishes.
        let config = SimulationConfig {
            seeds: vec![1, 2, 3, 4],
            noise_sigma: 0.0,
            learning_rate: 0.2,
            step_count: 1,
            ..Default::default()
        };
        let mut ensemble = Ensemble::<f64>::new(config).unwrap();
        ensemble.advance_all().unwrap();

        let snapshot = MetricsAggregator::new(3.5).observe(&ensemble);
        assert!((snapshot.reactive.mean - 0.7).abs() < 1e-12);
        assert!(snapshot.reactive.std < 1e-12);
        assert!((snapshot.reactive.rmse - 2.8).abs() < 1e-12);
    }
}
