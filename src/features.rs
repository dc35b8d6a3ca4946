//! Naturalness feature extraction.
//!
//! The luminance map is tiled into non-overlapping square patches (remainder
//! strips on the right and bottom are dropped). Each patch with enough
//! variance is normalised to zero mean and unit sample deviation, then
//! described by moment fits of its samples and of four directional
//! difference images:
//!
//! ```text
//! h [i][j]   = p[i][j+1]   - p[i][j]
//! v [i][j]   = p[i+1][j]   - p[i][j]
//! d1[i][j]   = p[i+1][j+1] - p[i][j]
//! d2[i][j-1] = p[i+1][j-1] - p[i][j]
//! ```
//!
//! Feature layout (slots 18..36 are zero):
//!
//! | slots  | content                                   |
//! |--------|-------------------------------------------|
//! | 0, 1   | patch shape, scale                        |
//! | 2, 3   | h shape, scale                            |
//! | 4, 5   | v shape, scale                            |
//! | 6, 7   | d1 shape, scale                           |
//! | 8, 9   | d2 scale, scale (see [`DiagonalSlots`])   |
//! | 10..18 | h, v, d1, d2 asymmetric left/right scales |

use rayon::prelude::*;

use crate::consts::{FEATURE_LEN, FILLED_FEATURES, VARIANCE_FLOOR};
use crate::fit::{fit_asymmetric, fit_symmetric, AsymmetricFit, SymmetricFit};
use crate::image::GrayMap;

/// One patch's feature vector.
pub type FeatureVector = [f64; FEATURE_LEN];

/// What goes into feature slots 8 and 9.
///
/// Existing score values were produced with the down-right-to-left diagonal
/// *scale* written into both slots. That layout is the default and must stay
/// the default for scores to remain comparable. `ShapeAndScale` writes the
/// shape into slot 8 instead; models trained with one layout can't be used
/// with the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagonalSlots {
    /// `[d2Scale, d2Scale]`
    #[default]
    Compatible,
    /// `[d2Shape, d2Scale]`
    ShapeAndScale,
}

/// Result of tiling a map into patches.
#[derive(Debug, Clone)]
pub struct PatchFeatures {
    /// Feature vectors of retained patches, in raster order.
    pub features: Vec<FeatureVector>,
    /// Number of full patches the map was tiled into.
    pub total_patches: usize,
}

/// The four directional difference images of a patch, flattened.
#[derive(Debug, Clone)]
pub(crate) struct Differences {
    pub horizontal: Vec<f64>,
    pub vertical: Vec<f64>,
    pub diag_down_right: Vec<f64>,
    pub diag_down_left: Vec<f64>,
}

/// Computes the directional differences of a square `size × size` patch.
pub(crate) fn differences(patch: &[f64], size: usize) -> Differences {
    debug_assert_eq!(patch.len(), size * size);
    let at = |i: usize, j: usize| patch[i * size + j];
    let inner = size.saturating_sub(1);

    let mut horizontal = Vec::with_capacity(size * inner);
    for i in 0..size {
        for j in 0..inner {
            horizontal.push(at(i, j + 1) - at(i, j));
        }
    }

    let mut vertical = Vec::with_capacity(inner * size);
    let mut diag_down_right = Vec::with_capacity(inner * inner);
    let mut diag_down_left = Vec::with_capacity(inner * inner);
    for i in 0..inner {
        for j in 0..size {
            vertical.push(at(i + 1, j) - at(i, j));
        }
        for j in 0..inner {
            diag_down_right.push(at(i + 1, j + 1) - at(i, j));
        }
        // stored at column j - 1
        for j in 1..size {
            diag_down_left.push(at(i + 1, j - 1) - at(i, j));
        }
    }

    Differences {
        horizontal,
        vertical,
        diag_down_right,
        diag_down_left,
    }
}

/// Mean and sample variance (N − 1 denominator).
fn mean_and_sample_variance(samples: &[f64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let ss = samples.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>();
    (mean, ss / (n - 1.0))
}

/// Assembles the fixed-order feature vector from the nine fits.
fn assemble(
    patch: SymmetricFit,
    sym: [SymmetricFit; 4],
    asym: [AsymmetricFit; 4],
    slots: DiagonalSlots,
) -> FeatureVector {
    let [h, v, d1, d2] = sym;
    let d2_first = match slots {
        DiagonalSlots::Compatible => d2.scale,
        DiagonalSlots::ShapeAndScale => d2.shape,
    };

    let mut filled = Vec::with_capacity(FILLED_FEATURES);
    filled.extend_from_slice(&[
        patch.shape,
        patch.scale,
        h.shape,
        h.scale,
        v.shape,
        v.scale,
        d1.shape,
        d1.scale,
        d2_first,
        d2.scale,
    ]);
    for a in asym {
        filled.push(a.scale_left);
        filled.push(a.scale_right);
    }

    let mut out = [0.0; FEATURE_LEN];
    for (dst, src) in out.iter_mut().zip(filled) {
        *dst = src;
    }
    out
}

/// Features of one `size × size` patch, or `None` if it is too flat.
#[must_use]
pub fn patch_features(patch: &[f64], size: usize, slots: DiagonalSlots) -> Option<FeatureVector> {
    if patch.len() < 2 {
        return None;
    }
    let (mean, variance) = mean_and_sample_variance(patch);
    // NaN compares false here, so a NaN variance is excluded as well
    if !(variance >= VARIANCE_FLOOR) {
        return None;
    }
    let std = variance.sqrt();
    let normalized: Vec<f64> = patch.iter().map(|&x| (x - mean) / std).collect();

    let diffs = differences(&normalized, size);
    let sym = [
        fit_symmetric(&diffs.horizontal),
        fit_symmetric(&diffs.vertical),
        fit_symmetric(&diffs.diag_down_right),
        fit_symmetric(&diffs.diag_down_left),
    ];
    let asym = [
        fit_asymmetric(&diffs.horizontal),
        fit_asymmetric(&diffs.vertical),
        fit_asymmetric(&diffs.diag_down_right),
        fit_asymmetric(&diffs.diag_down_left),
    ];

    Some(assemble(fit_symmetric(&normalized), sym, asym, slots))
}

/// Tiles `gray` into `patch_size` patches and extracts features from each
/// patch that passes the variance floor.
///
/// Patch rows are processed in parallel; the output keeps raster order.
#[must_use]
pub fn extract_features(gray: &GrayMap, patch_size: usize, slots: DiagonalSlots) -> PatchFeatures {
    if patch_size == 0 {
        return PatchFeatures {
            features: Vec::new(),
            total_patches: 0,
        };
    }
    let cols = gray.width() / patch_size;
    let rows = gray.height() / patch_size;

    let features: Vec<FeatureVector> = (0..rows)
        .into_par_iter()
        .flat_map_iter(|row| {
            (0..cols).filter_map(move |col| {
                let patch = gray.window(col * patch_size, row * patch_size, patch_size);
                patch_features(&patch, patch_size, slots)
            })
        })
        .collect();

    PatchFeatures {
        features,
        total_patches: rows * cols,
    }
}
