//! Moment-based distribution fits.
//!
//! These are the method-of-moments estimates the naturalness features are
//! built from, not maximum-likelihood fits. Score compatibility depends on
//! the exact formulas, so they must not be "improved":
//!
//! - symmetric (GGD-style): `shape = clamp(σ/2, 0.1, 2.0)`, `scale = max(0.01, σ)`
//!   with σ the population standard deviation
//! - asymmetric (AGGD-style): separate root-mean-square of the negative and
//!   positive halves, each floored at 0.01

use crate::consts::{SCALE_MIN, SHAPE_MAX, SHAPE_MIN};

/// Symmetric fit: shape and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricFit {
    /// Half the standard deviation, clamped to `[0.1, 2.0]`.
    pub shape: f64,
    /// Standard deviation, at least 0.01.
    pub scale: f64,
}

/// Asymmetric fit: separate scale for each side of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsymmetricFit {
    /// Root-mean-square of the negative samples.
    pub scale_left: f64,
    /// Root-mean-square of the positive samples.
    pub scale_right: f64,
}

impl Default for SymmetricFit {
    fn default() -> Self {
        Self {
            shape: 1.0,
            scale: 1.0,
        }
    }
}

impl Default for AsymmetricFit {
    fn default() -> Self {
        Self {
            scale_left: 1.0,
            scale_right: 1.0,
        }
    }
}

/// Fits the symmetric model. Empty input yields `{1, 1}`.
#[must_use]
pub fn fit_symmetric(samples: &[f64]) -> SymmetricFit {
    if samples.is_empty() {
        return SymmetricFit::default();
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n;
    let sigma = variance.sqrt();

    SymmetricFit {
        shape: (sigma / 2.0).clamp(SHAPE_MIN, SHAPE_MAX),
        scale: sigma.max(SCALE_MIN),
    }
}

/// Fits the asymmetric model. Empty input yields `{1, 1}`.
///
/// Zeros belong to neither side. A side with no samples gets variance 1.
#[must_use]
pub fn fit_asymmetric(samples: &[f64]) -> AsymmetricFit {
    if samples.is_empty() {
        return AsymmetricFit::default();
    }

    let (mut left_sum, mut left_n) = (0.0f64, 0usize);
    let (mut right_sum, mut right_n) = (0.0f64, 0usize);
    for &x in samples {
        if x > 0.0 {
            right_sum += x * x;
            right_n += 1;
        } else if x < 0.0 {
            left_sum += x * x;
            left_n += 1;
        }
    }

    let left_var = if left_n == 0 {
        1.0
    } else {
        left_sum / left_n as f64
    };
    let right_var = if right_n == 0 {
        1.0
    } else {
        right_sum / right_n as f64
    };

    AsymmetricFit {
        scale_left: left_var.sqrt().max(SCALE_MIN),
        scale_right: right_var.sqrt().max(SCALE_MIN),
    }
}
