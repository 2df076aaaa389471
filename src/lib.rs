// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # wavemark-core
//!
//! Pure-Rust invisible image watermarking. A short byte payload is protected
//! with Reed-Solomon parity and spread over the detail subbands of a
//! single-level 2D wavelet transform using key-seeded binary sequences.
//! Extraction is blind: correlation against the same sequences recovers each
//! bit, and the error-correcting code repairs what noise destroyed.
//!
//! Images are arrays of `f64` samples, either one plane (grayscale) or a
//! stack of channels. Every channel carries its own copy of the watermark;
//! extraction tries each channel, then the channel mean.
//!
//! The wavelet (`wavelet` module) and Reed-Solomon (`mark::ecc`) layers are
//! zero-dependency (std only). Sequence generation uses ChaCha20; the
//! optional `parallel` feature processes channels on the rayon pool.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use wavemark_core::{Config, Image, Watermarker};
//!
//! let image = Image::from_shape(&[height, width, 3], rgb_samples)?;
//! let wm = Watermarker::new(Config::new(4, 4))?;
//! let marked = wm.embed(&image, b"TEST")?;
//! assert_eq!(wm.extract(&marked)?, b"TEST");
//! ```

pub mod error;
pub mod image;
pub mod mark;
pub mod wavelet;

pub use error::{Result, WatermarkError};
pub use image::{rescale_intensity, Image, Plane};
pub use mark::config::{DEFAULT_SEED, DEFAULT_SPARSITY, DEFAULT_STRENGTH, DEFAULT_WAVELET};
pub use mark::{
    CapacityInfo, Config, DecodedBlock, EmbedOptions, ErrorCorrectionCodec, ExtractReport,
    Extraction, PayloadSource, Watermarker,
};
pub use wavelet::{Decomposition, Dwt2, Wavelet, WaveletTransform};
