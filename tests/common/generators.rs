//! Deterministic synthetic images and models for enhance-iqa tests.
//!
//! Everything is driven by an LCG so inputs are identical on every platform.

#![allow(dead_code)]

use enhance_iqa::consts::FEATURE_LEN;
use enhance_iqa::{Img, ImgVec, NaturalnessModel, RGBA8};

// ============================================================================
// LCG PRNG
// ============================================================================

/// LCG pseudo-random number generator (deterministic)
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u8(&mut self) -> u8 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 33) & 0xFF) as u8
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 11) as f64 / (1u64 << 53) as f64
    }
}

// ============================================================================
// Image Generation Functions
// ============================================================================

/// Uniform colour image.
pub fn gen_uniform(width: usize, height: usize, r: u8, g: u8, b: u8) -> ImgVec<RGBA8> {
    Img::new(vec![RGBA8::new(r, g, b, 255); width * height], width, height)
}

/// Per-pixel random grey noise.
pub fn gen_noise(width: usize, height: usize, seed: u64) -> ImgVec<RGBA8> {
    let mut rng = Lcg::new(seed);
    let pixels = (0..width * height)
        .map(|_| {
            let v = rng.next_u8();
            RGBA8::new(v, v, v, 255)
        })
        .collect();
    Img::new(pixels, width, height)
}

/// Smooth colour scene: two gradients plus mild texture.
pub fn gen_scene(width: usize, height: usize, seed: u64) -> ImgVec<RGBA8> {
    let mut rng = Lcg::new(seed);
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            let base = (x * 160 / width.max(1) + y * 60 / height.max(1)) as u8;
            let grain = rng.next_u8() / 16;
            let v = base.saturating_add(grain);
            RGBA8::new(v, v.saturating_sub(20), v / 2, 255)
        })
        .collect();
    Img::new(pixels, width, height)
}

/// Applies `f` to every colour channel.
pub fn map_channels(img: &ImgVec<RGBA8>, f: impl Fn(u8) -> u8) -> ImgVec<RGBA8> {
    let pixels = img
        .buf()
        .iter()
        .map(|p| RGBA8::new(f(p.r), f(p.g), f(p.b), p.a))
        .collect();
    Img::new(pixels, img.width(), img.height())
}

/// Gamma brightening, a typical low-light enhancement.
pub fn brighten_gamma(img: &ImgVec<RGBA8>, gamma: f64) -> ImgVec<RGBA8> {
    map_channels(img, |v| {
        ((f64::from(v) / 255.0).powf(gamma) * 255.0).round() as u8
    })
}

/// Horizontally mirrored copy.
pub fn mirror(img: &ImgVec<RGBA8>) -> ImgVec<RGBA8> {
    let (width, height) = (img.width(), img.height());
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            img.buf()[y * width + (width - 1 - x)]
        })
        .collect();
    Img::new(pixels, width, height)
}

// ============================================================================
// Models
// ============================================================================

/// Synthetic model with random mean and a random positive diagonal.
pub fn synthetic_model(seed: u64) -> NaturalnessModel {
    let mut rng = Lcg::new(seed);
    let mean: Vec<f64> = (0..FEATURE_LEN).map(|_| rng.next_f64()).collect();
    let covariance: Vec<Vec<f64>> = (0..FEATURE_LEN)
        .map(|i| {
            (0..FEATURE_LEN)
                .map(|j| if i == j { 0.1 + rng.next_f64() } else { 0.0 })
                .collect()
        })
        .collect();
    NaturalnessModel::new(&mean, &covariance).expect("valid synthetic model")
}

/// Model centred on `mean` with unit diagonal covariance.
pub fn centred_model(mean: &[f64; FEATURE_LEN]) -> NaturalnessModel {
    let covariance: Vec<Vec<f64>> = (0..FEATURE_LEN)
        .map(|i| {
            (0..FEATURE_LEN)
                .map(|j| if i == j { 1.0 } else { 0.0 })
                .collect()
        })
        .collect();
    NaturalnessModel::new(mean, &covariance).expect("valid centred model")
}
