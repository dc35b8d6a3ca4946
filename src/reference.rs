//! Precomputed original-image data for repeated lightness-order comparisons.
//!
//! Tuning an enhancement pipeline usually means scoring many outputs against
//! the same original. The original's channel-max reduction, local maximum
//! map and sampled grid do not depend on the candidate, so they are computed
//! once here.
//!
//! # Example
//!
//! ```
//! use enhance_iqa::{Img, LightnessOrderParams, LightnessOrderReference, RGBA8};
//!
//! let width = 64;
//! let height = 48;
//! let original = Img::new(vec![RGBA8::new(90, 80, 70, 255); width * height], width, height);
//!
//! let reference = LightnessOrderReference::new(original.as_ref(), LightnessOrderParams::default())
//!     .expect("valid image");
//!
//! for gain in [10u8, 20, 40] {
//!     let enhanced: Vec<RGBA8> = original
//!         .buf()
//!         .iter()
//!         .map(|p| RGBA8::new(p.r.saturating_add(gain), p.g, p.b, p.a))
//!         .collect();
//!     let enhanced = Img::new(enhanced, width, height);
//!     let result = reference.compare(enhanced.as_ref()).expect("same size");
//!     println!("gain {gain}: lightness order = {:.3}", result.score);
//! }
//! ```

use std::sync::Arc;

use imgref::ImgRef;
use rgb::RGBA8;

use crate::gray::max_channel;
use crate::image::GrayMap;
use crate::local_max::local_max;
use crate::loe::{finish, lightness_map, sample_grid, GridSpec, LightnessOrderResult};
use crate::observe::{NoopObserver, Observer};
use crate::{IqaError, LightnessOrderParams};

/// Precomputed lightness-order data for one original image.
#[derive(Clone)]
pub struct LightnessOrderReference {
    width: usize,
    height: usize,
    grid: GridSpec,
    /// Sampled local-maximum grid of the original.
    sampled: GrayMap,
    params: LightnessOrderParams,
    observer: Arc<dyn Observer>,
}

impl std::fmt::Debug for LightnessOrderReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightnessOrderReference")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("grid", &self.grid)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl LightnessOrderReference {
    /// Precomputes reference data from an RGBA original.
    ///
    /// # Errors
    /// Returns an error if the parameters are invalid or the image is too
    /// small to form a sampling grid.
    pub fn new(original: ImgRef<'_, RGBA8>, params: LightnessOrderParams) -> Result<Self, IqaError> {
        params.validate()?;
        let grid = GridSpec::for_image(original.width(), original.height(), params.grid_blocks())?;
        let map = lightness_map(original, params.window());
        Ok(Self::from_parts(map, grid, params))
    }

    /// Precomputes reference data from a channel-max grayscale map.
    ///
    /// # Errors
    /// Same as [`LightnessOrderReference::new`].
    pub fn from_gray(original: &GrayMap, params: LightnessOrderParams) -> Result<Self, IqaError> {
        params.validate()?;
        let grid = GridSpec::for_image(original.width(), original.height(), params.grid_blocks())?;
        let map = local_max(original, params.window());
        Ok(Self::from_parts(map, grid, params))
    }

    fn from_parts(map: GrayMap, grid: GridSpec, params: LightnessOrderParams) -> Self {
        Self {
            width: map.width(),
            height: map.height(),
            grid,
            sampled: sample_grid(&map, &grid),
            params,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Routes checkpoints of subsequent comparisons to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// Compares an enhanced RGBA image against the original.
    ///
    /// # Errors
    /// Returns [`IqaError::DimensionMismatch`] if the sizes differ.
    pub fn compare(&self, candidate: ImgRef<'_, RGBA8>) -> Result<LightnessOrderResult, IqaError> {
        self.compare_gray(&max_channel(candidate))
    }

    /// Compares a channel-max grayscale candidate against the original.
    ///
    /// # Errors
    /// Returns [`IqaError::DimensionMismatch`] if the sizes differ.
    pub fn compare_gray(&self, candidate: &GrayMap) -> Result<LightnessOrderResult, IqaError> {
        if (candidate.width(), candidate.height()) != (self.width, self.height) {
            return Err(IqaError::DimensionMismatch {
                w1: self.width,
                h1: self.height,
                w2: candidate.width(),
                h2: candidate.height(),
            });
        }

        self.observer.grid_selected(&self.grid);
        let map = local_max(candidate, self.params.window());
        let sampled = sample_grid(&map, &self.grid);
        Ok(finish(&self.sampled, &sampled, self.grid, self.observer.as_ref()))
    }

    /// Original image width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Original image height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sampling grid chosen for the original.
    #[must_use]
    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Parameters used for precomputation.
    #[must_use]
    pub fn params(&self) -> &LightnessOrderParams {
        &self.params
    }
}
