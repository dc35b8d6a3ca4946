//! Numeric constants shared by the naturalness and lightness-order pipelines.
//!
//! Changing any of these changes score values.

// ============================================================================
// Grayscale
// ============================================================================

/// Luminance weights (R, G, B) for the naturalness pipeline.
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

// ============================================================================
// Naturalness
// ============================================================================

/// Length of a per-patch feature vector.
pub const FEATURE_LEN: usize = 36;

/// Number of feature slots actually filled; the rest are zero padding.
pub const FILLED_FEATURES: usize = 18;

/// Default patch edge length in pixels.
pub const DEFAULT_PATCH_SIZE: usize = 96;

/// Patches whose sample variance is below this are excluded.
pub const VARIANCE_FLOOR: f64 = 1e-6;

/// Lower clamp for the symmetric shape parameter.
pub const SHAPE_MIN: f64 = 0.1;

/// Upper clamp for the symmetric shape parameter.
pub const SHAPE_MAX: f64 = 2.0;

/// Lower bound for every fitted scale.
pub const SCALE_MIN: f64 = 0.01;

/// Covariance diagonal entries at or below this get an inverse of 1.
pub const INVERSE_EPSILON: f64 = 1e-10;

// ============================================================================
// Lightness order
// ============================================================================

/// Default local-maximum window radius.
pub const DEFAULT_WINDOW: usize = 7;

/// Target number of grid cells along the shorter image side.
pub const GRID_TARGET_BLOCKS: usize = 50;

/// Largest accepted local-maximum window radius.
pub const MAX_WINDOW: usize = 1024;
