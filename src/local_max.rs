//! Reflect-padded local maximum filter.
//!
//! For radius `w`, the output at each pixel is the maximum of the
//! `(2w+1)²` window centred on it, with the map extended past its edges by
//! mirror reflection that excludes the edge sample itself:
//!
//! ```text
//! row:      ... 2 1 | 0 1 2 ... n-1 | n-2 n-3 ...
//! ```
//!
//! so padded row `w−1−i` mirrors padded row `w+1+i`, likewise for the other
//! borders, and the corners are the two reflections composed.
//!
//! [`local_max`] runs a separable monotonic-deque window maximum (rows, then
//! columns). Maximum is exact, so it produces the same bits as the direct
//! window scan in [`local_max_direct`].

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::image::GrayMap;

/// Maps a possibly out-of-range coordinate onto `0..n` by mirror reflection.
///
/// Reflection repeats with period `2(n−1)`, so radii larger than the image
/// still land inside it. A side of length 1 reflects onto itself.
///
/// # Panics
/// Panics if `n` is zero.
#[inline]
#[must_use]
pub fn reflect_index(i: isize, n: usize) -> usize {
    assert!(n > 0, "cannot reflect into an empty axis");
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let m = i.rem_euclid(period);
    if m < n as isize {
        m as usize
    } else {
        (period - m) as usize
    }
}

/// Builds the `(height+2·pad) × (width+2·pad)` reflect-padded extension.
#[must_use]
pub fn reflect_pad(map: &GrayMap, pad: usize) -> GrayMap {
    let (width, height) = (map.width(), map.height());
    if map.is_empty() {
        return GrayMap::new(width + 2 * pad, height + 2 * pad);
    }
    let pad_i = pad as isize;
    let cols: Vec<usize> = (0..width + 2 * pad)
        .map(|x| reflect_index(x as isize - pad_i, width))
        .collect();

    let mut out = GrayMap::new(width + 2 * pad, height + 2 * pad);
    for py in 0..height + 2 * pad {
        let src = map.row(reflect_index(py as isize - pad_i, height));
        for (dst, &sx) in out.row_mut(py).iter_mut().zip(&cols) {
            *dst = src[sx];
        }
    }
    out
}

/// Sliding-window maximum of width `k` over `input`.
///
/// `out` receives `input.len() - k + 1` values; `out[i]` is the maximum of
/// `input[i..i + k]`.
fn sliding_max(input: &[f64], k: usize, out: &mut [f64]) {
    debug_assert!(k >= 1 && input.len() >= k);
    debug_assert_eq!(out.len(), input.len() - k + 1);

    // indices with strictly decreasing values, front is the current maximum
    let mut window: VecDeque<usize> = VecDeque::with_capacity(k);
    for (i, &v) in input.iter().enumerate() {
        while window.back().is_some_and(|&b| input[b] <= v) {
            window.pop_back();
        }
        window.push_back(i);
        if window.front().is_some_and(|&f| f + k <= i) {
            window.pop_front();
        }
        if i + 1 >= k {
            if let Some(&f) = window.front() {
                out[i + 1 - k] = input[f];
            }
        }
    }
}

/// Local maximum over a `(2·win+1)²` reflect-padded window.
#[must_use]
pub fn local_max(map: &GrayMap, win: usize) -> GrayMap {
    let (width, height) = (map.width(), map.height());
    if map.is_empty() {
        return GrayMap::new(width, height);
    }
    let k = 2 * win + 1;
    let padded = reflect_pad(map, win);
    let padded_height = padded.height();

    // horizontal pass: every padded row shrinks back to `width` samples
    let mut horizontal = vec![0.0; padded_height * width];
    horizontal
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out)| sliding_max(padded.row(y), k, out));

    // vertical pass over columns of the horizontal result
    let columns: Vec<Vec<f64>> = (0..width)
        .into_par_iter()
        .map(|x| {
            let column: Vec<f64> = (0..padded_height)
                .map(|y| horizontal[y * width + x])
                .collect();
            let mut out = vec![0.0; height];
            sliding_max(&column, k, &mut out);
            out
        })
        .collect();

    GrayMap::from_fn(width, height, |x, y| columns[x][y])
}

/// Direct `O(H·W·win²)` window scan; reference for [`local_max`].
#[must_use]
pub fn local_max_direct(map: &GrayMap, win: usize) -> GrayMap {
    let (width, height) = (map.width(), map.height());
    if map.is_empty() {
        return GrayMap::new(width, height);
    }
    let padded = reflect_pad(map, win);
    let k = 2 * win + 1;
    GrayMap::from_fn(width, height, |x, y| {
        let mut best = f64::NEG_INFINITY;
        for py in y..y + k {
            for &v in &padded.row(py)[x..x + k] {
                if v > best {
                    best = v;
                }
            }
        }
        best
    })
}
