// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Capacity calculation.
//!
//! The watermark always carries `total_bits` bits. A larger image gives each
//! bit a longer chunk of coefficients (more robust correlation), not more
//! payload. Coefficients past `total_bits * chunk_size` are left untouched.

use crate::error::{Result, WatermarkError};
use crate::mark::config::Config;
use crate::wavelet::WaveletTransform;

/// Layout of the watermark for one plane shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityInfo {
    /// `(rows, cols)` of each detail subband.
    pub subband_shape: (usize, usize),
    /// Length of the interleaved detail vector (`3 * rows * cols`).
    pub vector_len: usize,
    /// Bits embedded: `8 * (max_payload + ec_bytes)`.
    pub total_bits: usize,
    /// Coefficients per bit.
    pub chunk_size: usize,
    /// Coefficients that receive a sequence.
    pub modulated: usize,
    /// Trailing coefficients left unmodified.
    pub unused: usize,
}

/// Smallest chunk a correlation can be computed over.
pub const MIN_CHUNK_SIZE: usize = 2;

/// Coefficients per bit for a vector of `vector_len` detail coefficients.
///
/// # Errors
/// [`WatermarkError::DegenerateConfiguration`] if a chunk would hold fewer
/// than [`MIN_CHUNK_SIZE`] coefficients.
pub fn chunk_size(vector_len: usize, total_bits: usize) -> Result<usize> {
    match vector_len.checked_div(total_bits) {
        Some(n) if n >= MIN_CHUNK_SIZE => Ok(n),
        _ => Err(WatermarkError::DegenerateConfiguration),
    }
}

/// Capacity for a `height × width` plane, computed without transforming it.
pub fn capacity_for_shape<T>(
    config: &Config,
    transform: &T,
    height: usize,
    width: usize,
) -> Result<CapacityInfo>
where
    T: WaveletTransform + ?Sized,
{
    config.validate()?;
    if height == 0 || width == 0 {
        return Err(WatermarkError::InvalidImageShape);
    }
    let subband_shape = transform.subband_shape(height, width);
    let vector_len = 3 * subband_shape.0 * subband_shape.1;
    let total_bits = config.total_bits();
    let chunk_size = chunk_size(vector_len, total_bits)?;
    let modulated = chunk_size * total_bits;
    Ok(CapacityInfo {
        subband_shape,
        vector_len,
        total_bits,
        chunk_size,
        modulated,
        unused: vector_len - modulated,
    })
}
