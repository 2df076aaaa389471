// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Blind watermark extraction.
//!
//! Each plane is decomposed exactly as at embed time and every chunk of the
//! interleaved detail vector is correlated against both sequences; the
//! stronger correlation decides the bit. The recovered block then goes
//! through the fallback chain:
//!
//! 1. each channel in order, as is and bit-complemented;
//! 2. the per-pixel mean of all channels, as is and bit-complemented;
//! 3. otherwise [`WatermarkError::DecodeFailure`].
//!
//! No original image is required.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, WatermarkError};
use crate::image::{Image, Plane};
use crate::mark::capacity::chunk_size;
use crate::mark::codec::{trim_padding, DecodedBlock, ErrorCorrectionCodec};
use crate::mark::config::Config;
use crate::mark::correlation::pearson;
use crate::mark::embed::pack_bits;
use crate::mark::interleave::interleave;
use crate::mark::sequence;
use crate::wavelet::WaveletTransform;

/// Raw bytes read from one plane, before error correction.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateBlock {
    /// `max_payload + ec_bytes` bytes, MSB-first.
    pub bytes: Vec<u8>,
    /// Mean of `|corr(chunk, seq1) - corr(chunk, seq0)|` over all bits.
    pub mean_margin: f64,
}

/// Where the decoded payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    SinglePlane,
    Channel(usize),
    ChannelMean,
}

/// Diagnostics for a successful extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractReport {
    pub source: PayloadSource,
    /// The bit-complemented block decoded.
    pub inverted: bool,
    pub errors_corrected: usize,
    /// `floor(ec_bytes / 2)`.
    pub error_capacity: usize,
    /// Correlation margin of the candidate that decoded.
    pub mean_margin: f64,
}

/// Corrected payload plus diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// `max_payload` bytes, zero padding included.
    pub payload: Vec<u8>,
    pub report: ExtractReport,
}

impl Extraction {
    /// Payload with trailing zero padding removed.
    pub fn trimmed(&self) -> &[u8] {
        trim_padding(&self.payload)
    }
}

/// Read the raw block from one plane.
///
/// # Errors
/// [`WatermarkError::DegenerateConfiguration`] if the plane has fewer detail
/// coefficients than bits.
pub fn extract_channel<T>(config: &Config, transform: &T, plane: &Plane) -> Result<CandidateBlock>
where
    T: WaveletTransform + ?Sized,
{
    let dec = transform.decompose(plane);
    let vec = interleave(&dec.horizontal, &dec.vertical, &dec.diagonal)?;

    let total_bits = config.total_bits();
    let chunk = chunk_size(vec.len(), total_bits)?;
    let seqs = sequence::generate(config.seed(), chunk, config.sparsity())?;

    let mut bits = Vec::with_capacity(total_bits);
    let mut margin_sum = 0.0;
    for coeffs in vec.chunks_exact(chunk).take(total_bits) {
        let c0 = pearson(coeffs, &seqs.seq0);
        let c1 = pearson(coeffs, &seqs.seq1);
        bits.push(u8::from(c1 > c0));
        margin_sum += (c1 - c0).abs();
    }

    Ok(CandidateBlock {
        bytes: pack_bits(&bits),
        mean_margin: margin_sum / total_bits as f64,
    })
}

fn decode_candidate(
    codec: &ErrorCorrectionCodec,
    candidate: &CandidateBlock,
    source: PayloadSource,
) -> Result<Extraction> {
    let DecodedBlock { payload, errors_corrected, inverted } =
        codec.decode_with_polarity(&candidate.bytes)?;
    Ok(Extraction {
        payload,
        report: ExtractReport {
            source,
            inverted,
            errors_corrected,
            error_capacity: codec.error_capacity(),
            mean_margin: candidate.mean_margin,
        },
    })
}

/// Recover the corrected payload from `image`.
///
/// # Errors
/// - [`WatermarkError::InvalidConfiguration`] for an out-of-range config or a
///   codec built for another block layout.
/// - [`WatermarkError::InvalidImageShape`] for an empty or ragged stack.
/// - [`WatermarkError::DegenerateConfiguration`] if the image is too small.
/// - [`WatermarkError::DecodeFailure`] once every fallback is exhausted.
pub fn extract<T>(
    config: &Config,
    codec: &ErrorCorrectionCodec,
    transform: &T,
    image: &Image,
) -> Result<Extraction>
where
    T: WaveletTransform + ?Sized,
{
    config.validate_codec(codec)?;
    image.validate()?;

    let planes = match image {
        Image::SinglePlane(plane) => {
            let candidate = extract_channel(config, transform, plane)?;
            return decode_candidate(codec, &candidate, PayloadSource::SinglePlane);
        }
        Image::ChannelStack(planes) => planes,
    };

    let read = |plane: &Plane| extract_channel(config, transform, plane);
    #[cfg(feature = "parallel")]
    let candidates: Result<Vec<CandidateBlock>> = planes.par_iter().map(read).collect();
    #[cfg(not(feature = "parallel"))]
    let candidates: Result<Vec<CandidateBlock>> = planes.iter().map(read).collect();

    for (i, candidate) in candidates?.iter().enumerate() {
        match decode_candidate(codec, candidate, PayloadSource::Channel(i)) {
            Err(WatermarkError::DecodeFailure) => continue,
            result => return result,
        }
    }

    let mean = image.channel_mean()?;
    let candidate = extract_channel(config, transform, &mean)?;
    decode_candidate(codec, &candidate, PayloadSource::ChannelMean)
}
