//! Observation hooks.
//!
//! The pipelines report a handful of checkpoints through [`Observer`] instead
//! of writing anywhere themselves. [`NoopObserver`] discards everything;
//! [`TracingObserver`] forwards to `tracing` so a host can route events with
//! its own subscriber.

use std::fmt;

use crate::loe::GridSpec;

/// Which metric a checkpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Naturalness,
    LightnessOrder,
}

impl Metric {
    /// Short lowercase name, used in logs and CLI output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Naturalness => "naturalness",
            Self::LightnessOrder => "lightness_order",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Checkpoint hooks called by the scoring pipelines.
///
/// All methods default to doing nothing. Implementations must be `Sync`
/// because the hooks may be called from pipelines that run on rayon.
pub trait Observer: Send + Sync {
    /// Patch tiling finished: `retained` of `total` patches passed the
    /// variance floor.
    fn patches_extracted(&self, _retained: usize, _total: usize) {}

    /// Lightness-order grid dimensions were chosen.
    fn grid_selected(&self, _grid: &GridSpec) {}

    /// The diagonal Mahalanobis distance was not finite and the Euclidean
    /// distance was used instead.
    fn distance_fallback(&self, _mahalanobis: f64, _euclidean: f64) {}

    /// A metric produced its final score.
    fn score_computed(&self, _metric: Metric, _score: f64) {}
}

/// Observer that ignores every checkpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Observer that emits `tracing` events.
///
/// Checkpoints are `debug`, the distance fallback is `warn`, final scores
/// are `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn patches_extracted(&self, retained: usize, total: usize) {
        tracing::debug!(retained, total, "naturalness patches extracted");
    }

    fn grid_selected(&self, grid: &GridSpec) {
        tracing::debug!(
            step = grid.step,
            rows = grid.rows,
            cols = grid.cols,
            "lightness-order grid selected"
        );
    }

    fn distance_fallback(&self, mahalanobis: f64, euclidean: f64) {
        tracing::warn!(
            mahalanobis,
            euclidean,
            "non-finite diagonal distance, using euclidean distance"
        );
    }

    fn score_computed(&self, metric: Metric, score: f64) {
        tracing::info!(metric = metric.name(), score, "score computed");
    }
}

impl<O: Observer + ?Sized> Observer for &O {
    fn patches_extracted(&self, retained: usize, total: usize) {
        (**self).patches_extracted(retained, total);
    }

    fn grid_selected(&self, grid: &GridSpec) {
        (**self).grid_selected(grid);
    }

    fn distance_fallback(&self, mahalanobis: f64, euclidean: f64) {
        (**self).distance_fallback(mahalanobis, euclidean);
    }

    fn score_computed(&self, metric: Metric, score: f64) {
        (**self).score_computed(metric, score);
    }
}
