//! Single-channel sample buffers.
//!
//! Both metrics reduce their RGBA input to one channel of `f64` samples
//! before doing anything else. [`GrayMap`] is that buffer: row-major,
//! tightly packed, indexed as `(x, y)`.

use std::ops::{Index, IndexMut};

use imgref::{ImgRef, ImgVec};

/// Single-channel floating point map (grayscale, local maximum, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct GrayMap {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl GrayMap {
    /// Creates a new map filled with zeros.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Creates a map filled with a constant value.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Creates a map from existing row-major data.
    ///
    /// # Panics
    /// Panics if data length doesn't match width * height.
    #[must_use]
    pub fn from_vec(data: Vec<f64>, width: usize, height: usize) -> Self {
        assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Builds a map by evaluating `f(x, y)` for every sample.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Map width in samples.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Map height in samples.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the map has no samples.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to a row.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[f64] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Returns a mutable reference to a row.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f64] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    /// Iterates over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics; an empty-width map simply has no rows to visit
        self.data.chunks_exact(self.width.max(1)).take(self.height)
    }

    /// Gets a sample.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// Sets a sample.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.data[y * self.width + x] = value;
    }

    /// Returns the raw data as a slice.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Checks if two maps have the same dimensions.
    #[must_use]
    pub fn same_size(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Copies a `size × size` window whose top-left corner is `(x0, y0)`.
    ///
    /// # Panics
    /// Panics if the window extends past the map.
    #[must_use]
    pub fn window(&self, x0: usize, y0: usize, size: usize) -> Vec<f64> {
        assert!(x0 + size <= self.width && y0 + size <= self.height);
        let mut out = Vec::with_capacity(size * size);
        for y in y0..y0 + size {
            out.extend_from_slice(&self.row(y)[x0..x0 + size]);
        }
        out
    }

    /// Borrows the map as an `imgref` view.
    #[must_use]
    pub fn as_imgref(&self) -> ImgRef<'_, f64> {
        ImgRef::new(&self.data, self.width, self.height)
    }

    /// Converts into an owned `imgref` buffer.
    #[must_use]
    pub fn into_imgvec(self) -> ImgVec<f64> {
        ImgVec::new(self.data, self.width, self.height)
    }
}

impl From<ImgRef<'_, f64>> for GrayMap {
    fn from(img: ImgRef<'_, f64>) -> Self {
        let (width, height) = (img.width(), img.height());
        let mut data = Vec::with_capacity(width * height);
        for row in img.rows() {
            data.extend_from_slice(row);
        }
        Self {
            data,
            width,
            height,
        }
    }
}

impl Index<(usize, usize)> for GrayMap {
    type Output = f64;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.data[y * self.width + x]
    }
}

impl IndexMut<(usize, usize)> for GrayMap {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        &mut self.data[y * self.width + x]
    }
}
