//! Naturalness scoring.
//!
//! Per-patch feature vectors are averaged and compared to the reference
//! model with a diagonal-covariance Mahalanobis distance:
//!
//! ```text
//! score = sqrt(| Σ (f̄_i − μ_i)² · inv_i |)
//! ```
//!
//! Lower is more natural. If the weighted sum is not finite the plain
//! Euclidean distance is returned instead; that is the only failure the
//! scorer recovers from locally.

use imgref::ImgRef;
use rgb::RGBA8;

use crate::consts::FEATURE_LEN;
use crate::features::{extract_features, FeatureVector};
use crate::gray::luminance;
use crate::image::GrayMap;
use crate::model::NaturalnessModel;
use crate::observe::{Metric, Observer};
use crate::{IqaError, NaturalnessParams};

/// Naturalness result.
#[derive(Debug, Clone)]
pub struct NaturalnessResult {
    /// Distance to the reference model. Lower is better.
    pub score: f64,
    /// Number of patches that passed the variance floor.
    pub patches_used: usize,
    /// Number of full patches the image was tiled into.
    pub patches_total: usize,
    /// Element-wise mean of the retained feature vectors.
    pub mean_features: FeatureVector,
}

/// Element-wise mean of feature vectors, `None` for an empty set.
#[must_use]
pub fn mean_features(features: &[FeatureVector]) -> Option<FeatureVector> {
    if features.is_empty() {
        return None;
    }
    let mut sum = [0.0; FEATURE_LEN];
    for f in features {
        for (acc, v) in sum.iter_mut().zip(f) {
            *acc += v;
        }
    }
    let n = features.len() as f64;
    for v in &mut sum {
        *v /= n;
    }
    Some(sum)
}

/// Outcome of the distance computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    /// The distance used as the patch score.
    pub value: f64,
    /// True when the Euclidean fallback was used.
    pub fell_back: bool,
    /// The diagonal Mahalanobis value, finite or not.
    pub mahalanobis: f64,
}

/// Diagonal Mahalanobis distance with Euclidean fallback.
#[must_use]
pub fn model_distance(features: &FeatureVector, model: &NaturalnessModel) -> Distance {
    let inv = model.diagonal_inverse();
    let mut weighted = 0.0f64;
    let mut plain = 0.0f64;
    for ((f, m), w) in features.iter().zip(model.mean()).zip(&inv) {
        let d = f - m;
        weighted += d * d * w;
        plain += d * d;
    }

    let mahalanobis = weighted.abs().sqrt();
    if mahalanobis.is_finite() {
        Distance {
            value: mahalanobis,
            fell_back: false,
            mahalanobis,
        }
    } else {
        Distance {
            value: plain.sqrt(),
            fell_back: true,
            mahalanobis,
        }
    }
}

/// Scores an already-reduced luminance map.
///
/// # Errors
/// Returns [`IqaError::NoValidPatches`] if no patch passes the variance
/// floor (including images smaller than one patch).
pub fn naturalness_gray(
    gray: &GrayMap,
    model: &NaturalnessModel,
    params: &NaturalnessParams,
    observer: &dyn Observer,
) -> Result<NaturalnessResult, IqaError> {
    params.validate()?;

    let patches = extract_features(gray, params.patch_size(), params.diagonal_slots());
    observer.patches_extracted(patches.features.len(), patches.total_patches);

    let mean = mean_features(&patches.features).ok_or(IqaError::NoValidPatches {
        width: gray.width(),
        height: gray.height(),
        patch_size: params.patch_size(),
    })?;

    let distance = model_distance(&mean, model);
    if distance.fell_back {
        observer.distance_fallback(distance.mahalanobis, distance.value);
    }
    observer.score_computed(Metric::Naturalness, distance.value);

    Ok(NaturalnessResult {
        score: distance.value,
        patches_used: patches.features.len(),
        patches_total: patches.total_patches,
        mean_features: mean,
    })
}

/// Scores an RGBA image (luminance reduction, then [`naturalness_gray`]).
///
/// # Errors
/// See [`naturalness_gray`].
pub fn naturalness_rgba(
    img: ImgRef<'_, RGBA8>,
    model: &NaturalnessModel,
    params: &NaturalnessParams,
    observer: &dyn Observer,
) -> Result<NaturalnessResult, IqaError> {
    naturalness_gray(&luminance(img), model, params, observer)
}
