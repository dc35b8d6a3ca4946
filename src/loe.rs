//! Lightness-order (LOE-style) scoring.
//!
//! Both images are reduced to their channel maximum, passed through the
//! local maximum filter, and point-sampled on a coarse grid whose stride
//! targets about 50 cells along the shorter side. For every ordered pair of
//! grid cells, including a cell paired with itself, the score counts whether
//! "cell B is at least as bright as cell A" holds in one image but not in the
//! other. The count is divided by the number of cells.
//!
//! The pairwise rule only compares truth values, so the score is the same
//! with the two images swapped, and it is zero for identical images.

use imgref::ImgRef;
use rayon::prelude::*;
use rgb::RGBA8;

use crate::gray::max_channel;
use crate::image::GrayMap;
use crate::local_max::local_max;
use crate::observe::{Metric, Observer};
use crate::{IqaError, LightnessOrderParams};

/// Downsampling grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Sampling stride in pixels.
    pub step: usize,
    /// Number of grid rows (`blkm`).
    pub rows: usize,
    /// Number of grid columns (`blkn`).
    pub cols: usize,
}

impl GridSpec {
    /// Chooses the grid for an image: `step = max(1, min(h, w) / target)`,
    /// `rows = h / step`, `cols = w / step`.
    ///
    /// # Errors
    /// Returns [`IqaError::DegenerateGrid`] if either grid dimension is zero.
    pub fn for_image(width: usize, height: usize, target_blocks: usize) -> Result<Self, IqaError> {
        let step = (width.min(height) / target_blocks.max(1)).max(1);
        let rows = height / step;
        let cols = width / step;
        if rows == 0 || cols == 0 {
            return Err(IqaError::DegenerateGrid { width, height });
        }
        Ok(Self { step, rows, cols })
    }

    /// Total number of grid cells.
    #[must_use]
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

/// Point-samples `map` on `grid`: cell `(i, j)` takes the sample at row
/// `min(i·step, h−1)`, column `min(j·step, w−1)`.
///
/// The result is a `cols × rows` map.
#[must_use]
pub fn sample_grid(map: &GrayMap, grid: &GridSpec) -> GrayMap {
    let last_x = map.width().saturating_sub(1);
    let last_y = map.height().saturating_sub(1);
    GrayMap::from_fn(grid.cols, grid.rows, |j, i| {
        map.get((j * grid.step).min(last_x), (i * grid.step).min(last_y))
    })
}

/// Counts ordered cell pairs whose brightness ranking disagrees.
///
/// # Panics
/// Panics if the grids differ in size.
#[must_use]
pub fn count_mismatches(reference: &GrayMap, candidate: &GrayMap) -> u64 {
    assert!(reference.same_size(candidate), "grid sizes differ");
    let r = reference.data();
    let c = candidate.data();

    r.par_iter()
        .zip(c.par_iter())
        .map(|(&r_anchor, &c_anchor)| {
            r.iter()
                .zip(c)
                .filter(|&(&rv, &cv)| (rv >= r_anchor) != (cv >= c_anchor))
                .count() as u64
        })
        .sum()
}

/// Score from two sampled grids: mismatches divided by the cell count.
///
/// # Panics
/// Panics if the grids differ in size.
#[must_use]
pub fn grid_score(reference: &GrayMap, candidate: &GrayMap) -> f64 {
    let cells = reference.data().len();
    if cells == 0 {
        return 0.0;
    }
    count_mismatches(reference, candidate) as f64 / cells as f64
}

/// Result of a lightness-order comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightnessOrderResult {
    /// Mean number of rank disagreements per grid cell. Lower is better.
    pub score: f64,
    /// Total disagreeing ordered pairs.
    pub mismatches: u64,
    /// Grid the local-maximum maps were sampled on.
    pub grid: GridSpec,
}

/// Channel-max grayscale followed by the local maximum filter.
#[must_use]
pub fn lightness_map(img: ImgRef<'_, RGBA8>, window: usize) -> GrayMap {
    local_max(&max_channel(img), window)
}

pub(crate) fn check_same_size(reference: &GrayMap, candidate: &GrayMap) -> Result<(), IqaError> {
    if !reference.same_size(candidate) {
        return Err(IqaError::DimensionMismatch {
            w1: reference.width(),
            h1: reference.height(),
            w2: candidate.width(),
            h2: candidate.height(),
        });
    }
    Ok(())
}

/// Scores two sampled grids and reports the result.
pub(crate) fn finish(
    reference_grid: &GrayMap,
    candidate_grid: &GrayMap,
    grid: GridSpec,
    observer: &dyn Observer,
) -> LightnessOrderResult {
    let mismatches = count_mismatches(reference_grid, candidate_grid);
    let score = mismatches as f64 / grid.cells() as f64;
    observer.score_computed(Metric::LightnessOrder, score);
    LightnessOrderResult {
        score,
        mismatches,
        grid,
    }
}

/// Lightness-order score between two channel-max grayscale maps.
///
/// # Errors
/// Returns [`IqaError::DimensionMismatch`] if the maps differ in size and
/// [`IqaError::DegenerateGrid`] if the sampling grid would be empty.
pub fn lightness_order_gray(
    reference: &GrayMap,
    candidate: &GrayMap,
    params: &LightnessOrderParams,
    observer: &dyn Observer,
) -> Result<LightnessOrderResult, IqaError> {
    params.validate()?;
    check_same_size(reference, candidate)?;

    let grid = GridSpec::for_image(reference.width(), reference.height(), params.grid_blocks())?;
    observer.grid_selected(&grid);

    let (ref_map, cand_map) = rayon::join(
        || local_max(reference, params.window()),
        || local_max(candidate, params.window()),
    );
    let ref_grid = sample_grid(&ref_map, &grid);
    let cand_grid = sample_grid(&cand_map, &grid);

    Ok(finish(&ref_grid, &cand_grid, grid, observer))
}

/// Lightness-order score between an original and an enhanced image.
///
/// # Errors
/// See [`lightness_order_gray`].
pub fn lightness_order_rgba(
    reference: ImgRef<'_, RGBA8>,
    candidate: ImgRef<'_, RGBA8>,
    params: &LightnessOrderParams,
    observer: &dyn Observer,
) -> Result<LightnessOrderResult, IqaError> {
    lightness_order_gray(
        &max_channel(reference),
        &max_channel(candidate),
        params,
        observer,
    )
}
