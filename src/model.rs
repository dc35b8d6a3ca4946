//! Reference natural-image model.
//!
//! A model is a 36-element mean feature vector and a 36×36 covariance
//! matrix. Only the covariance diagonal is used by the scorer. Models are
//! stored as versioned JSON:
//!
//! ```json
//! {
//!   "format": "enhance-iqa-model",
//!   "version": 1,
//!   "mean": [36 numbers],
//!   "covariance": [[36 numbers], ... 36 rows]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FEATURE_LEN, INVERSE_EPSILON};
use crate::features::FeatureVector;
use crate::IqaError;

/// Format tag written into every model file.
pub const MODEL_FORMAT: &str = "enhance-iqa-model";

/// Current model file version.
pub const MODEL_VERSION: u32 = 1;

/// On-disk representation; shapes are checked when converting.
#[derive(Debug, Serialize, Deserialize)]
struct ModelFile {
    format: String,
    version: u32,
    mean: Vec<f64>,
    covariance: Vec<Vec<f64>>,
}

/// Reference statistics of undistorted natural images.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalnessModel {
    mean: FeatureVector,
    covariance: Vec<FeatureVector>,
}

impl NaturalnessModel {
    /// Builds a model from a mean vector and a row-major covariance matrix.
    ///
    /// # Errors
    /// Returns [`IqaError::InvalidModel`] if the shapes are wrong or any
    /// value is not finite.
    pub fn new(mean: &[f64], covariance: &[Vec<f64>]) -> Result<Self, IqaError> {
        if mean.len() != FEATURE_LEN {
            return Err(IqaError::InvalidModel(format!(
                "mean has {} entries, expected {FEATURE_LEN}",
                mean.len()
            )));
        }
        if covariance.len() != FEATURE_LEN {
            return Err(IqaError::InvalidModel(format!(
                "covariance has {} rows, expected {FEATURE_LEN}",
                covariance.len()
            )));
        }
        if let Some((i, row)) = covariance
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != FEATURE_LEN)
        {
            return Err(IqaError::InvalidModel(format!(
                "covariance row {i} has {} entries, expected {FEATURE_LEN}",
                row.len()
            )));
        }
        if mean
            .iter()
            .chain(covariance.iter().flatten())
            .any(|v| !v.is_finite())
        {
            return Err(IqaError::InvalidModel("non-finite value".to_string()));
        }

        let mut mean_arr = [0.0; FEATURE_LEN];
        mean_arr.copy_from_slice(mean);
        let covariance = covariance
            .iter()
            .map(|row| {
                let mut r = [0.0; FEATURE_LEN];
                r.copy_from_slice(row);
                r
            })
            .collect();

        Ok(Self {
            mean: mean_arr,
            covariance,
        })
    }

    /// Parses a model from its JSON representation.
    ///
    /// # Errors
    /// Returns [`IqaError::InvalidModel`] on malformed JSON, a foreign format
    /// tag, an unsupported version or wrong shapes.
    pub fn from_json(json: &str) -> Result<Self, IqaError> {
        let file: ModelFile = serde_json::from_str(json)
            .map_err(|e| IqaError::InvalidModel(format!("malformed model JSON: {e}")))?;

        if file.format != MODEL_FORMAT {
            return Err(IqaError::InvalidModel(format!(
                "unexpected format tag '{}'",
                file.format
            )));
        }
        if file.version != MODEL_VERSION {
            return Err(IqaError::InvalidModel(format!(
                "unsupported model version {} (expected {MODEL_VERSION})",
                file.version
            )));
        }

        Self::new(&file.mean, &file.covariance)
    }

    /// Loads a model file.
    ///
    /// # Errors
    /// Returns [`IqaError::ModelIo`] if the file can't be read, otherwise
    /// the errors of [`NaturalnessModel::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IqaError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| IqaError::ModelIo(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Serializes the model to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`IqaError::InvalidModel`] if serialization fails.
    pub fn to_json(&self) -> Result<String, IqaError> {
        let file = ModelFile {
            format: MODEL_FORMAT.to_string(),
            version: MODEL_VERSION,
            mean: self.mean.to_vec(),
            covariance: self.covariance.iter().map(|r| r.to_vec()).collect(),
        };
        serde_json::to_string_pretty(&file).map_err(|e| IqaError::InvalidModel(e.to_string()))
    }

    /// Writes the model to a file.
    ///
    /// # Errors
    /// Returns [`IqaError::InvalidModel`] if serialization fails, or
    /// [`IqaError::ModelIo`] if the file can't be written. Nothing is
    /// written when serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), IqaError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| IqaError::ModelIo(format!("{}: {e}", path.display())))
    }

    /// Mean feature vector.
    #[must_use]
    pub fn mean(&self) -> &FeatureVector {
        &self.mean
    }

    /// Covariance matrix rows.
    #[must_use]
    pub fn covariance(&self) -> &[FeatureVector] {
        &self.covariance
    }

    /// Diagonal approximation of the inverse covariance.
    ///
    /// Entry `i` is `1 / cov[i][i]`, or 1 when the diagonal entry is not
    /// above `1e-10`. Off-diagonal covariance is ignored.
    #[must_use]
    pub fn diagonal_inverse(&self) -> FeatureVector {
        let mut inv = [1.0; FEATURE_LEN];
        for (i, slot) in inv.iter_mut().enumerate() {
            let c = self.covariance[i][i];
            if c > INVERSE_EPSILON {
                *slot = 1.0 / c;
            }
        }
        inv
    }
}
