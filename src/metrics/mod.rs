mod aggregator;
mod curve;
mod snapshot;

pub use aggregator::{MetricsAggregator, first_below, path_stats};
pub use curve::{CurveFormat, MetricsCurve};
pub use snapshot::{EstimatorPath, MetricsSnapshot, PathStats};
