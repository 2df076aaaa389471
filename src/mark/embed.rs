// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Watermark embedding.
//!
//! Pipeline per plane:
//! 1. Single-level 2D DWT; the approximation subband is kept as is.
//! 2. Interleave the three detail subbands into one vector.
//! 3. Split into `total_bits` chunks of `chunk_size` coefficients.
//! 4. Add `k * seq0` (bit 0) or `k * seq1` (bit 1) to each chunk, MSB first.
//! 5. Deinterleave, inverse DWT, crop to the input shape.
//!
//! Multi-channel images get the same block in every channel so extraction
//! can fall back from one channel to another.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, WatermarkError};
use crate::image::{rescale_intensity, Image, Plane};
use crate::mark::capacity::chunk_size;
use crate::mark::codec::ErrorCorrectionCodec;
use crate::mark::config::{Config, EmbedOptions};
use crate::mark::interleave::{deinterleave, interleave};
use crate::mark::sequence;
use crate::wavelet::{Decomposition, WaveletTransform};

/// Expand bytes into bits, MSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1))
        .collect()
}

/// Pack bits into bytes, MSB first. A trailing partial byte is zero-filled.
pub fn pack_bits(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &bit)| acc | ((bit & 1) << (7 - i)))
        })
        .collect()
}

/// Embed an already-encoded `block` into one plane.
///
/// # Errors
/// [`WatermarkError::DegenerateConfiguration`] if the plane has fewer detail
/// coefficients than bits to embed.
pub fn embed_channel<T>(
    config: &Config,
    transform: &T,
    plane: &Plane,
    block: &[u8],
    strength: f64,
) -> Result<Plane>
where
    T: WaveletTransform + ?Sized,
{
    let dec = transform.decompose(plane);
    let mut vec = interleave(&dec.horizontal, &dec.vertical, &dec.diagonal)?;

    let bits = bytes_to_bits(block);
    let chunk = chunk_size(vec.len(), bits.len())?;
    let seqs = sequence::generate(config.seed(), chunk, config.sparsity())?;

    for (coeffs, &bit) in vec.chunks_exact_mut(chunk).zip(&bits) {
        for (c, &s) in coeffs.iter_mut().zip(seqs.for_bit(bit)) {
            *c += strength * s;
        }
    }

    let (horizontal, vertical, diagonal) = deinterleave(
        &vec,
        dec.horizontal.shape(),
        dec.vertical.shape(),
        dec.diagonal.shape(),
    )?;
    let marked = Decomposition { approx: dec.approx, horizontal, vertical, diagonal };
    transform.reconstruct(&marked)?.crop(plane.height(), plane.width())
}

/// Encode `payload` and embed it into every plane of `image`.
///
/// # Errors
/// - [`WatermarkError::InvalidConfiguration`] for an out-of-range config, a
///   codec built for another block layout, or a non-finite strength.
/// - [`WatermarkError::InvalidPayloadLength`] before any transform work.
/// - [`WatermarkError::InvalidImageShape`] for an empty or ragged stack.
/// - [`WatermarkError::DegenerateConfiguration`] if the image is too small.
pub fn embed<T>(
    config: &Config,
    codec: &ErrorCorrectionCodec,
    transform: &T,
    image: &Image,
    payload: &[u8],
    options: &EmbedOptions,
) -> Result<Image>
where
    T: WaveletTransform + ?Sized,
{
    config.validate_codec(codec)?;
    let block = codec.encode(payload)?;
    if !options.strength.is_finite() {
        return Err(WatermarkError::InvalidConfiguration("strength must be finite"));
    }
    image.validate()?;

    let marked = match image {
        Image::SinglePlane(plane) => {
            Image::SinglePlane(embed_channel(config, transform, plane, &block, options.strength)?)
        }
        Image::ChannelStack(planes) => {
            let mark = |plane: &Plane| embed_channel(config, transform, plane, &block, options.strength);
            #[cfg(feature = "parallel")]
            let marked: Result<Vec<Plane>> = planes.par_iter().map(mark).collect();
            #[cfg(not(feature = "parallel"))]
            let marked: Result<Vec<Plane>> = planes.iter().map(mark).collect();
            Image::ChannelStack(marked?)
        }
    };

    if options.rescale_color {
        let (lo, hi) = image.min_max();
        Ok(rescale_intensity(&marked, lo, hi))
    } else {
        Ok(marked)
    }
}
