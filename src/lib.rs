//! # enhance-iqa
//!
//! No-reference and full-reference quality metrics for image enhancement
//! (low-light enhancement, contrast stretching, dehazing).
//!
//! - **Naturalness**: a NIQE-style distance between the mean natural-scene
//!   statistics of an image's patches and a reference model. No original is
//!   needed. Lower is more natural.
//! - **Lightness order**: an LOE-style count of how often the relative
//!   brightness ranking of sampled locations changes between an original and
//!   its enhanced version. Lower means the enhancement preserved the
//!   lightness structure.
//!
//! ## Quality Bands
//!
//! | metric          | excellent | good | fair | poor  |
//! |-----------------|-----------|------|------|-------|
//! | naturalness     | < 3       | < 4  | < 6  | ≥ 6   |
//! | lightness order | < 35      | < 50 | < 65 | ≥ 65  |
//!
//! ## Example
//!
//! ```rust
//! use enhance_iqa::{lightness_order, Img, LightnessOrderParams, RGBA8};
//!
//! let width = 64;
//! let height = 48;
//! let original: Vec<RGBA8> = (0..width * height)
//!     .map(|i| {
//!         let v = (i % 200) as u8;
//!         RGBA8::new(v, v / 2, v / 3, 255)
//!     })
//!     .collect();
//! let original = Img::new(original, width, height);
//!
//! // brightening every pixel by the same amount keeps the ordering
//! let enhanced: Vec<RGBA8> = original
//!     .buf()
//!     .iter()
//!     .map(|p| RGBA8::new(p.r + 40, p.g + 40, p.b + 40, p.a))
//!     .collect();
//! let enhanced = Img::new(enhanced, width, height);
//!
//! let result = lightness_order(original.as_ref(), enhanced.as_ref(), &LightnessOrderParams::default())?;
//! assert_eq!(result.score, 0.0);
//! # Ok::<(), enhance_iqa::IqaError>(())
//! ```
//!
//! Naturalness needs a [`NaturalnessModel`], usually loaded from a JSON file
//! with [`NaturalnessModel::load`]. [`QualityAssessor`] bundles a model slot,
//! both parameter sets and an [`Observer`] for callers that score many
//! images.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::suboptimal_flops)]

pub mod assessor;
pub mod consts;
pub mod features;
pub mod fit;
pub mod gray;
pub mod image;
pub mod local_max;
pub mod loe;
pub mod model;
pub mod naturalness;
pub mod observe;
pub mod rating;
pub mod reference;

pub use assessor::QualityAssessor;
pub use features::{DiagonalSlots, FeatureVector};
pub use image::GrayMap;
pub use loe::{GridSpec, LightnessOrderResult};
pub use model::NaturalnessModel;
pub use naturalness::NaturalnessResult;
pub use observe::{Metric, NoopObserver, Observer, TracingObserver};
pub use rating::{Rating, RatingScale};
pub use reference::LightnessOrderReference;

// Re-export imgref and rgb types for convenience
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::RGBA8;

use consts::{DEFAULT_PATCH_SIZE, DEFAULT_WINDOW, GRID_TARGET_BLOCKS, MAX_WINDOW};

/// Error type for quality assessment operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IqaError {
    /// Naturalness was requested but no model has been loaded.
    ModelNotLoaded,
    /// No patch passed the variance floor, or none fit in the image.
    NoValidPatches {
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
        /// Patch edge length in use.
        patch_size: usize,
    },
    /// The lightness-order grid would have zero rows or columns.
    DegenerateGrid {
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
    },
    /// Image dimensions don't match.
    DimensionMismatch {
        /// First image width.
        w1: usize,
        /// First image height.
        h1: usize,
        /// Second image width.
        w2: usize,
        /// Second image height.
        h2: usize,
    },
    /// An image has a zero dimension.
    EmptyImage {
        /// Width provided.
        width: usize,
        /// Height provided.
        height: usize,
    },
    /// Buffer size doesn't match the dimensions.
    InvalidBufferSize {
        /// Expected buffer size.
        expected: usize,
        /// Actual buffer size.
        actual: usize,
    },
    /// `width * height * 4` overflows `usize`.
    DimensionOverflow {
        /// Width provided.
        width: usize,
        /// Height provided.
        height: usize,
    },
    /// A parameter is out of range.
    InvalidParams(&'static str),
    /// Model data has the wrong shape, version or non-finite values.
    InvalidModel(String),
    /// A model file couldn't be read or written.
    ModelIo(String),
}

impl std::fmt::Display for IqaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModelNotLoaded => f.write_str("naturalness model not loaded"),
            Self::NoValidPatches {
                width,
                height,
                patch_size,
            } => write!(
                f,
                "no valid {patch_size}x{patch_size} patches in {width}x{height} image"
            ),
            Self::DegenerateGrid { width, height } => {
                write!(f, "image too small for lightness-order grid: {width}x{height}")
            }
            Self::DimensionMismatch { w1, h1, w2, h2 } => {
                write!(f, "image dimensions don't match: {w1}x{h1} vs {w2}x{h2}")
            }
            Self::EmptyImage { width, height } => {
                write!(f, "empty image: {width}x{height}")
            }
            Self::InvalidBufferSize { expected, actual } => {
                write!(
                    f,
                    "buffer size {actual} doesn't match expected size {expected}"
                )
            }
            Self::DimensionOverflow { width, height } => {
                write!(f, "image dimensions overflow: {width}x{height}")
            }
            Self::InvalidParams(msg) => write!(f, "invalid parameters: {msg}"),
            Self::InvalidModel(msg) => write!(f, "invalid model: {msg}"),
            Self::ModelIo(msg) => write!(f, "model i/o error: {msg}"),
        }
    }
}

impl std::error::Error for IqaError {}

/// Naturalness parameters.
///
/// ```rust
/// use enhance_iqa::{DiagonalSlots, NaturalnessParams};
///
/// let params = NaturalnessParams::new()
///     .with_patch_size(64)
///     .with_diagonal_slots(DiagonalSlots::ShapeAndScale);
/// assert_eq!(params.patch_size(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalnessParams {
    patch_size: usize,
    diagonal_slots: DiagonalSlots,
}

impl Default for NaturalnessParams {
    fn default() -> Self {
        Self {
            patch_size: DEFAULT_PATCH_SIZE,
            diagonal_slots: DiagonalSlots::default(),
        }
    }
}

impl NaturalnessParams {
    /// Creates parameters with default values (96-pixel patches).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the patch edge length.
    #[must_use]
    pub fn with_patch_size(mut self, patch_size: usize) -> Self {
        self.patch_size = patch_size;
        self
    }

    /// Sets the layout of feature slots 8 and 9.
    ///
    /// The model must have been built with the same layout.
    #[must_use]
    pub fn with_diagonal_slots(mut self, diagonal_slots: DiagonalSlots) -> Self {
        self.diagonal_slots = diagonal_slots;
        self
    }

    /// Returns the patch edge length.
    #[must_use]
    pub fn patch_size(&self) -> usize {
        self.patch_size
    }

    /// Returns the layout of feature slots 8 and 9.
    #[must_use]
    pub fn diagonal_slots(&self) -> DiagonalSlots {
        self.diagonal_slots
    }

    /// Checks that the parameters can be used.
    ///
    /// # Errors
    /// Returns [`IqaError::InvalidParams`] if the patch is smaller than 2×2,
    /// which leaves no difference samples.
    pub fn validate(&self) -> Result<(), IqaError> {
        if self.patch_size < 2 {
            return Err(IqaError::InvalidParams("patch size must be at least 2"));
        }
        Ok(())
    }
}

/// Lightness-order parameters.
///
/// ```rust
/// use enhance_iqa::LightnessOrderParams;
///
/// let params = LightnessOrderParams::new().with_window(3).with_grid_blocks(25);
/// assert_eq!((params.window(), params.grid_blocks()), (3, 25));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightnessOrderParams {
    window: usize,
    grid_blocks: usize,
}

impl Default for LightnessOrderParams {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            grid_blocks: GRID_TARGET_BLOCKS,
        }
    }
}

impl LightnessOrderParams {
    /// Creates parameters with default values (radius 7, 50 grid blocks).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the local-maximum window radius.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the target number of grid cells along the shorter side.
    ///
    /// Pairwise counting is quadratic in the cell count, so raising this
    /// gets expensive quickly.
    #[must_use]
    pub fn with_grid_blocks(mut self, grid_blocks: usize) -> Self {
        self.grid_blocks = grid_blocks;
        self
    }

    /// Returns the local-maximum window radius.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Returns the target number of grid cells along the shorter side.
    #[must_use]
    pub fn grid_blocks(&self) -> usize {
        self.grid_blocks
    }

    /// Checks that the parameters can be used.
    ///
    /// # Errors
    /// Returns [`IqaError::InvalidParams`] if `grid_blocks` is zero or the
    /// window radius exceeds [`consts::MAX_WINDOW`].
    pub fn validate(&self) -> Result<(), IqaError> {
        if self.grid_blocks == 0 {
            return Err(IqaError::InvalidParams("grid blocks must be at least 1"));
        }
        if self.window > MAX_WINDOW {
            return Err(IqaError::InvalidParams("window radius exceeds 1024"));
        }
        Ok(())
    }
}

/// Computes the naturalness score of an RGBA image.
///
/// # Errors
/// Returns an error if:
/// - The parameters are invalid
/// - No patch passes the variance floor (flat images, or images smaller
///   than one patch)
pub fn naturalness(
    img: ImgRef<'_, RGBA8>,
    model: &NaturalnessModel,
    params: &NaturalnessParams,
) -> Result<NaturalnessResult, IqaError> {
    naturalness::naturalness_rgba(img, model, params, &NoopObserver)
}

/// Computes the lightness-order score between an original and an enhanced
/// RGBA image.
///
/// # Errors
/// Returns an error if:
/// - The parameters are invalid
/// - Image dimensions don't match
/// - The image is too small for a sampling grid
pub fn lightness_order(
    original: ImgRef<'_, RGBA8>,
    enhanced: ImgRef<'_, RGBA8>,
    params: &LightnessOrderParams,
) -> Result<LightnessOrderResult, IqaError> {
    loe::lightness_order_rgba(original, enhanced, params, &NoopObserver)
}
