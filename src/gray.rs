//! Grayscale reduction of RGBA input.
//!
//! The two pipelines use different reductions and they are not
//! interchangeable: naturalness works on weighted luminance, lightness order
//! on the per-pixel channel maximum. Alpha is ignored by both.

use imgref::{Img, ImgRef};
use rgb::RGBA8;

use crate::consts::LUMA_WEIGHTS;
use crate::image::GrayMap;
use crate::IqaError;

/// Which single-channel reduction to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// `0.299·R + 0.587·G + 0.114·B`
    Luminance,
    /// `max(R, G, B)`
    MaxChannel,
}

impl Reduction {
    /// Reduces one pixel.
    #[inline]
    #[must_use]
    pub fn apply(self, px: RGBA8) -> f64 {
        match self {
            Self::Luminance => {
                LUMA_WEIGHTS[0] * f64::from(px.r)
                    + LUMA_WEIGHTS[1] * f64::from(px.g)
                    + LUMA_WEIGHTS[2] * f64::from(px.b)
            }
            Self::MaxChannel => f64::from(px.r.max(px.g).max(px.b)),
        }
    }
}

/// Reduces an RGBA image to a grayscale map of identical dimensions.
#[must_use]
pub fn reduce(img: ImgRef<'_, RGBA8>, reduction: Reduction) -> GrayMap {
    let mut out = GrayMap::new(img.width(), img.height());
    for (y, row) in img.rows().enumerate() {
        for (dst, &px) in out.row_mut(y).iter_mut().zip(row) {
            *dst = reduction.apply(px);
        }
    }
    out
}

/// Weighted-luminance grayscale (naturalness pipeline).
#[must_use]
pub fn luminance(img: ImgRef<'_, RGBA8>) -> GrayMap {
    reduce(img, Reduction::Luminance)
}

/// Channel-maximum grayscale (lightness-order pipeline).
#[must_use]
pub fn max_channel(img: ImgRef<'_, RGBA8>) -> GrayMap {
    reduce(img, Reduction::MaxChannel)
}

/// Wraps a raw interleaved RGBA byte buffer into an image.
///
/// # Errors
/// Returns an error if either dimension is zero, or if `width * height * 4`
/// overflows or doesn't match the buffer length.
pub fn rgba_from_bytes(
    bytes: &[u8],
    width: usize,
    height: usize,
) -> Result<Img<Vec<RGBA8>>, IqaError> {
    if width == 0 || height == 0 {
        return Err(IqaError::EmptyImage { width, height });
    }
    let expected = width
        .checked_mul(height)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(IqaError::DimensionOverflow { width, height })?;

    if bytes.len() != expected {
        return Err(IqaError::InvalidBufferSize {
            expected,
            actual: bytes.len(),
        });
    }

    let pixels: Vec<RGBA8> = bytes
        .chunks_exact(4)
        .map(|c| RGBA8::new(c[0], c[1], c[2], c[3]))
        .collect();
    Ok(Img::new(pixels, width, height))
}
