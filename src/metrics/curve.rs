use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::metrics::aggregator::first_below;
use crate::metrics::snapshot::{EstimatorPath, MetricsSnapshot};

pub enum CurveFormat {
    Csv,
    Tsv,
    Json,
}

/// Per-step metrics history of one simulation run.
///
/// Snapshots are appended in step order; consumers read series out of it
/// or export the whole table for the presentation layer.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsCurve {
    entries: Vec<MetricsSnapshot>,
}

impl MetricsCurve {
    pub fn push(&mut self, snapshot: MetricsSnapshot) {
        self.entries.push(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<MetricsSnapshot> {
        self.entries.last().copied()
    }

    pub fn entries(&self) -> &[MetricsSnapshot] {
        &self.entries
    }

    pub fn mean_series(&self, path: EstimatorPath) -> Vec<f64> {
        self.entries.iter().map(|s| s.path(path).mean).collect()
    }

    pub fn std_series(&self, path: EstimatorPath) -> Vec<f64> {
        self.entries.iter().map(|s| s.path(path).std).collect()
    }

    pub fn rmse_series(&self, path: EstimatorPath) -> Vec<f64> {
        self.entries.iter().map(|s| s.path(path).rmse).collect()
    }

    /// First step whose recorded RMSE drops strictly below `threshold`,
    /// or `None` when the path never converged within the run.
    pub fn convergence_step(&self, path: EstimatorPath, threshold: f64) -> Option<usize> {
        first_below(&self.rmse_series(path), threshold)
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: CurveFormat) -> Result<(), Error> {
        match fmt {
            CurveFormat::Csv => self.export_with_delimiter(path, ','),
            CurveFormat::Tsv => self.export_with_delimiter(path, '\t'),
            CurveFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(
            w,
            "step{d}reactive_mean{d}reactive_std{d}reactive_rmse{d}adaptive_mean{d}adaptive_std{d}adaptive_rmse",
            d = delimiter
        )?;
        for s in &self.entries {
            writeln!(
                w,
                "{}{d}{:.12}{d}{:.12}{d}{:.12}{d}{:.12}{d}{:.12}{d}{:.12}",
                s.step,
                s.reactive.mean,
                s.reactive.std,
                s.reactive.rmse,
                s.adaptive.mean,
                s.adaptive.std,
                s.adaptive.rmse,
                d = delimiter
            )?;
        }
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = File::create(path)?;
        serde_json::to_writer_pretty(&mut w, &self.entries).map_err(Error::other)?;
        writeln!(w)?;
        Ok(())
    }
}
