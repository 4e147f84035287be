use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

/// Which estimator path a statistic or series refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorPath {
    Reactive,
    Adaptive,
}

/// Cross-instance statistics for one path at one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathStats {
    pub mean: f64,
    /// Population standard deviation across instances.
    pub std: f64,
    /// Root-mean-square error against the configured true mean.
    pub rmse: f64,
}

/// Per-step metrics record covering both paths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub step: usize,
    pub reactive: PathStats,
    pub adaptive: PathStats,
}

impl MetricsSnapshot {
    #[inline]
    pub fn path(&self, path: EstimatorPath) -> PathStats {
        match path {
            EstimatorPath::Reactive => self.reactive,
            EstimatorPath::Adaptive => self.adaptive,
        }
    }
}

impl Display for MetricsSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "step={}, reactive(mean={:.6}, rmse={:.6}), adaptive(mean={:.6}, rmse={:.6})",
            self.step,
            self.reactive.mean,
            self.reactive.rmse,
            self.adaptive.mean,
            self.adaptive.rmse
        )
    }
}
