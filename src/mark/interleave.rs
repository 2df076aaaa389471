// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Round-robin interleaving of the three detail subbands.
//!
//! Position `3i` of the coefficient vector holds `horizontal[i]`, `3i+1`
//! holds `vertical[i]` and `3i+2` holds `diagonal[i]` (row-major). Each bit
//! chunk therefore draws evenly from all three orientations.

use crate::error::{Result, WatermarkError};
use crate::image::Plane;

/// Flatten three equally-shaped subbands into one vector.
///
/// # Errors
/// [`WatermarkError::ShapeMismatch`] if the subband shapes differ.
pub fn interleave(h: &Plane, v: &Plane, d: &Plane) -> Result<Vec<f64>> {
    if h.shape() != v.shape() || h.shape() != d.shape() {
        return Err(WatermarkError::ShapeMismatch);
    }
    let mut vec = Vec::with_capacity(h.len() * 3);
    for ((&a, &b), &c) in h.data().iter().zip(v.data()).zip(d.data()) {
        vec.extend_from_slice(&[a, b, c]);
    }
    Ok(vec)
}

/// Split an interleaved vector back into three subbands.
///
/// Shapes are `(rows, cols)`.
///
/// # Errors
/// [`WatermarkError::ShapeMismatch`] if the shapes differ from each other or
/// do not account for every element of `vec`.
pub fn deinterleave(
    vec: &[f64],
    shape_h: (usize, usize),
    shape_v: (usize, usize),
    shape_d: (usize, usize),
) -> Result<(Plane, Plane, Plane)> {
    if shape_h != shape_v || shape_h != shape_d {
        return Err(WatermarkError::ShapeMismatch);
    }
    let (rows, cols) = shape_h;
    let n = rows * cols;
    if n == 0 || vec.len() != 3 * n {
        return Err(WatermarkError::ShapeMismatch);
    }

    let mut bands = [Vec::with_capacity(n), Vec::with_capacity(n), Vec::with_capacity(n)];
    for triple in vec.chunks_exact(3) {
        for (band, &value) in bands.iter_mut().zip(triple) {
            band.push(value);
        }
    }
    let [h, v, d] = bands;
    Ok((
        Plane::new(cols, rows, h)?,
        Plane::new(cols, rows, v)?,
        Plane::new(cols, rows, d)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(offset: f64) -> Plane {
        Plane::new(3, 2, (0..6).map(|i| offset + i as f64).collect()).unwrap()
    }

    #[test]
    fn stride_three_layout() {
        let vec = interleave(&band(0.0), &band(100.0), &band(200.0)).unwrap();
        assert_eq!(&vec[..6], &[0.0, 100.0, 200.0, 1.0, 101.0, 201.0]);
        assert_eq!(vec.len(), 18);
    }

    #[test]
    fn deinterleave_inverts() {
        let (h, v, d) = (band(0.0), band(10.0), band(20.0));
        let vec = interleave(&h, &v, &d).unwrap();
        let (h2, v2, d2) = deinterleave(&vec, h.shape(), v.shape(), d.shape()).unwrap();
        assert_eq!((h2, v2, d2), (h, v, d));
    }

    #[test]
    fn mismatched_shapes_rejected() {
        let odd = Plane::zeros(2, 3);
        assert_eq!(interleave(&band(0.0), &odd, &band(0.0)), Err(WatermarkError::ShapeMismatch));
        assert!(deinterleave(&[0.0; 18], (2, 3), (3, 2), (2, 3)).is_err());
        assert!(deinterleave(&[0.0; 17], (2, 3), (2, 3), (2, 3)).is_err());
    }
}
