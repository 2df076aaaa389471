// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the watermarking pipeline.
//!
//! [`WatermarkError`] covers all failure modes from configuration and shape
//! validation through Reed-Solomon recovery of the extracted block.

use core::fmt;

use crate::mark::ecc::RsDecodeError;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, WatermarkError>;

/// Errors that can occur while embedding or extracting a watermark.
#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkError {
    /// The payload is longer than the configured `max_payload`.
    InvalidPayloadLength { len: usize, max: usize },
    /// The image is not rank 2 or 3, or its data does not match its shape.
    InvalidImageShape,
    /// The image has fewer detail coefficients than bits to embed.
    DegenerateConfiguration,
    /// The extracted block could not be corrected on any channel or polarity.
    DecodeFailure,
    /// A configuration value is out of range.
    InvalidConfiguration(&'static str),
    /// The wavelet basis name is not one of the supported families.
    UnsupportedWavelet(String),
    /// Subbands or coefficient vectors passed between stages disagree in shape.
    ShapeMismatch,
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPayloadLength { len, max } => {
                write!(f, "payload too long: {len} bytes (max {max})")
            }
            Self::InvalidImageShape => write!(f, "image must be a 2d or 3d array"),
            Self::DegenerateConfiguration => {
                write!(f, "image too small for the configured payload and parity")
            }
            Self::DecodeFailure => write!(f, "watermark could not be recovered"),
            Self::InvalidConfiguration(why) => write!(f, "invalid configuration: {why}"),
            Self::UnsupportedWavelet(name) => write!(f, "unsupported wavelet: {name:?}"),
            Self::ShapeMismatch => write!(f, "subband shapes do not match"),
        }
    }
}

impl std::error::Error for WatermarkError {}

impl From<RsDecodeError> for WatermarkError {
    fn from(_: RsDecodeError) -> Self {
        Self::DecodeFailure
    }
}
