// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Single-level 1D and 2D discrete wavelet transform.
//!
//! Boundaries use half-sample symmetric extension (`x[-1] = x[0]`,
//! `x[n] = x[n-1]`). An axis of length `n` filtered with `F` taps yields
//! `floor((n + F - 1) / 2)` coefficients, and `m` coefficients reconstruct
//! `2m - F + 2` samples. For odd `n` this is one sample more than the input,
//! which the caller crops away.
//!
//! Columns are processed gather-transform-scatter through a single column
//! buffer instead of a transposed copy.

use super::filters::FilterBank;
use super::Decomposition;
use crate::error::{Result, WatermarkError};
use crate::image::Plane;

/// Number of coefficients produced from `n` samples by an `f`-tap filter.
pub fn coeff_len(n: usize, f: usize) -> usize {
    (n + f - 1) / 2
}

/// Number of samples reconstructed from `m` coefficients by an `f`-tap filter.
pub fn rec_len(m: usize, f: usize) -> usize {
    (2 * m + 2).saturating_sub(f)
}

/// Reflect an out-of-range index back into `0..n`.
fn symmetric_index(mut i: isize, n: usize) -> usize {
    let n = n as isize;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}

/// Forward transform of one signal into `approx` and `detail`.
///
/// Both outputs must have length [`coeff_len`]`(signal.len(), F)`.
pub fn dwt_1d(signal: &[f64], bank: &FilterBank, approx: &mut [f64], detail: &mut [f64]) {
    let n = signal.len();
    let f = bank.len();
    debug_assert_eq!(approx.len(), coeff_len(n, f));
    debug_assert_eq!(detail.len(), coeff_len(n, f));

    for k in 0..approx.len() {
        let centre = (2 * k + 1) as isize;
        let mut a = 0.0;
        let mut d = 0.0;
        for j in 0..f {
            let x = signal[symmetric_index(centre - j as isize, n)];
            a += bank.dec_lo[j] * x;
            d += bank.dec_hi[j] * x;
        }
        approx[k] = a;
        detail[k] = d;
    }
}

/// Inverse transform of one `approx`/`detail` pair into `out`.
///
/// `out` must have length [`rec_len`]`(approx.len(), F)`.
pub fn idwt_1d(approx: &[f64], detail: &[f64], bank: &FilterBank, out: &mut [f64]) {
    let m = approx.len();
    let f = bank.len();
    debug_assert_eq!(detail.len(), m);
    debug_assert_eq!(out.len(), rec_len(m, f));

    // Full convolution of the zero-upsampled coefficients, keeping the
    // window that starts at F - 2.
    for (o, sample) in out.iter_mut().enumerate() {
        let pos = (o + f - 2) as isize;
        let mut acc = 0.0;
        for j in 0..f {
            let t = pos - j as isize;
            if t < 0 || t % 2 != 0 {
                continue;
            }
            let idx = (t / 2) as usize;
            if idx < m {
                acc += bank.rec_lo[j] * approx[idx] + bank.rec_hi[j] * detail[idx];
            }
        }
        *sample = acc;
    }
}

/// One 2D decomposition level: rows first, then columns.
///
/// `horizontal` is high-pass along columns and low-pass along rows,
/// `vertical` the reverse, `diagonal` high-pass along both.
pub fn dwt_2d(plane: &Plane, bank: &FilterBank) -> Decomposition {
    let (h, w) = plane.shape();
    let f = bank.len();
    let cw = coeff_len(w, f);
    let ch = coeff_len(h, f);

    // Row pass: h × cw low and high halves.
    let mut lo_rows = vec![0.0f64; h * cw];
    let mut hi_rows = vec![0.0f64; h * cw];
    for r in 0..h {
        dwt_1d(
            plane.row(r),
            bank,
            &mut lo_rows[r * cw..(r + 1) * cw],
            &mut hi_rows[r * cw..(r + 1) * cw],
        );
    }

    let (approx, horizontal) = column_pass(&lo_rows, h, cw, ch, bank);
    let (vertical, diagonal) = column_pass(&hi_rows, h, cw, ch, bank);

    Decomposition { approx, horizontal, vertical, diagonal }
}

fn column_pass(src: &[f64], h: usize, cw: usize, ch: usize, bank: &FilterBank) -> (Plane, Plane) {
    let mut lo = Plane::zeros(cw, ch);
    let mut hi = Plane::zeros(cw, ch);
    let mut column = vec![0.0f64; h];
    let mut col_lo = vec![0.0f64; ch];
    let mut col_hi = vec![0.0f64; ch];
    for c in 0..cw {
        for r in 0..h {
            column[r] = src[r * cw + c];
        }
        dwt_1d(&column, bank, &mut col_lo, &mut col_hi);
        for r in 0..ch {
            lo.set(r, c, col_lo[r]);
            hi.set(r, c, col_hi[r]);
        }
    }
    (lo, hi)
}

/// Invert [`dwt_2d`].
///
/// Returns a plane of `rec_len(ch) × rec_len(cw)` samples, which may exceed
/// the original shape by one per odd-length axis.
///
/// # Errors
/// [`WatermarkError::ShapeMismatch`] if the four subbands differ in shape.
pub fn idwt_2d(dec: &Decomposition, bank: &FilterBank) -> Result<Plane> {
    let shape = dec.approx.shape();
    if dec.horizontal.shape() != shape || dec.vertical.shape() != shape || dec.diagonal.shape() != shape {
        return Err(WatermarkError::ShapeMismatch);
    }
    let (ch, cw) = shape;
    let f = bank.len();
    let oh = rec_len(ch, f);
    let ow = rec_len(cw, f);
    if oh == 0 || ow == 0 {
        return Err(WatermarkError::ShapeMismatch);
    }

    let lo_rows = inverse_column_pass(&dec.approx, &dec.horizontal, oh, bank);
    let hi_rows = inverse_column_pass(&dec.vertical, &dec.diagonal, oh, bank);

    let mut out = Plane::zeros(ow, oh);
    for r in 0..oh {
        idwt_1d(
            &lo_rows[r * cw..(r + 1) * cw],
            &hi_rows[r * cw..(r + 1) * cw],
            bank,
            out.row_mut(r),
        );
    }
    Ok(out)
}

fn inverse_column_pass(lo: &Plane, hi: &Plane, oh: usize, bank: &FilterBank) -> Vec<f64> {
    let (ch, cw) = lo.shape();
    let mut dst = vec![0.0f64; oh * cw];
    let mut col_lo = vec![0.0f64; ch];
    let mut col_hi = vec![0.0f64; ch];
    let mut column = vec![0.0f64; oh];
    for c in 0..cw {
        for r in 0..ch {
            col_lo[r] = lo.get(r, c);
            col_hi[r] = hi.get(r, c);
        }
        idwt_1d(&col_lo, &col_hi, bank, &mut column);
        for r in 0..oh {
            dst[r * cw + c] = column[r];
        }
    }
    dst
}
