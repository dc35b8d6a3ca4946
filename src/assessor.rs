//! Reusable scoring context.

use std::path::Path;
use std::sync::Arc;

use imgref::ImgRef;
use rgb::RGBA8;

use crate::loe::{lightness_order_rgba, LightnessOrderResult};
use crate::model::NaturalnessModel;
use crate::naturalness::{naturalness_rgba, NaturalnessResult};
use crate::observe::{NoopObserver, Observer};
use crate::reference::LightnessOrderReference;
use crate::{IqaError, LightnessOrderParams, NaturalnessParams};

/// Parameters, an optional naturalness model and an observer, shared by
/// every score computed through it.
///
/// ```rust
/// use enhance_iqa::{Img, IqaError, QualityAssessor, RGBA8};
///
/// let img = Img::new(vec![RGBA8::new(10, 20, 30, 255); 64 * 64], 64, 64);
/// let assessor = QualityAssessor::new();
///
/// // lightness order needs no model
/// assert_eq!(assessor.lightness_order(img.as_ref(), img.as_ref())?.score, 0.0);
/// // naturalness does
/// assert_eq!(assessor.naturalness(img.as_ref()).unwrap_err(), IqaError::ModelNotLoaded);
/// # Ok::<(), IqaError>(())
/// ```
#[derive(Clone)]
pub struct QualityAssessor {
    naturalness_params: NaturalnessParams,
    lightness_params: LightnessOrderParams,
    model: Option<NaturalnessModel>,
    observer: Arc<dyn Observer>,
}

impl std::fmt::Debug for QualityAssessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualityAssessor")
            .field("naturalness_params", &self.naturalness_params)
            .field("lightness_params", &self.lightness_params)
            .field("model_loaded", &self.model.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for QualityAssessor {
    fn default() -> Self {
        Self {
            naturalness_params: NaturalnessParams::default(),
            lightness_params: LightnessOrderParams::default(),
            model: None,
            observer: Arc::new(NoopObserver),
        }
    }
}

impl QualityAssessor {
    /// Creates an assessor with default parameters and no model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a naturalness model.
    #[must_use]
    pub fn with_model(mut self, model: NaturalnessModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Loads and installs a naturalness model from a JSON file.
    ///
    /// # Errors
    /// Returns [`IqaError::ModelIo`] or [`IqaError::InvalidModel`].
    pub fn with_model_file(self, path: impl AsRef<Path>) -> Result<Self, IqaError> {
        Ok(self.with_model(NaturalnessModel::load(path)?))
    }

    /// Sets the naturalness parameters.
    #[must_use]
    pub fn with_naturalness_params(mut self, params: NaturalnessParams) -> Self {
        self.naturalness_params = params;
        self
    }

    /// Sets the lightness-order parameters.
    #[must_use]
    pub fn with_lightness_params(mut self, params: LightnessOrderParams) -> Self {
        self.lightness_params = params;
        self
    }

    /// Routes pipeline checkpoints to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// Returns the installed model, if any.
    #[must_use]
    pub fn model(&self) -> Option<&NaturalnessModel> {
        self.model.as_ref()
    }

    /// Returns the naturalness parameters.
    #[must_use]
    pub fn naturalness_params(&self) -> &NaturalnessParams {
        &self.naturalness_params
    }

    /// Returns the lightness-order parameters.
    #[must_use]
    pub fn lightness_params(&self) -> &LightnessOrderParams {
        &self.lightness_params
    }

    /// Naturalness score of an image.
    ///
    /// # Errors
    /// Returns [`IqaError::ModelNotLoaded`] if no model is installed, or any
    /// error of [`naturalness_rgba`].
    pub fn naturalness(&self, img: ImgRef<'_, RGBA8>) -> Result<NaturalnessResult, IqaError> {
        let model = self.model.as_ref().ok_or(IqaError::ModelNotLoaded)?;
        naturalness_rgba(img, model, &self.naturalness_params, self.observer.as_ref())
    }

    /// Lightness-order score between an original and an enhanced image.
    ///
    /// # Errors
    /// See [`lightness_order_rgba`].
    pub fn lightness_order(
        &self,
        original: ImgRef<'_, RGBA8>,
        enhanced: ImgRef<'_, RGBA8>,
    ) -> Result<LightnessOrderResult, IqaError> {
        lightness_order_rgba(
            original,
            enhanced,
            &self.lightness_params,
            self.observer.as_ref(),
        )
    }

    /// Precomputes an original for repeated lightness-order comparisons,
    /// carrying over this assessor's parameters and observer.
    ///
    /// # Errors
    /// See [`LightnessOrderReference::new`].
    pub fn lightness_reference(
        &self,
        original: ImgRef<'_, RGBA8>,
    ) -> Result<LightnessOrderReference, IqaError> {
        Ok(
            LightnessOrderReference::new(original, self.lightness_params.clone())?
                .with_observer(Arc::clone(&self.observer)),
        )
    }
}
