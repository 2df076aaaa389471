// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Spread-spectrum watermarking in the wavelet domain.
//!
//! A payload of at most `max_payload` bytes is zero-padded, Reed-Solomon
//! protected and spread bit by bit over the detail coefficients of a
//! single-level DWT. Extraction is blind: it needs the same [`Config`] (seed,
//! wavelet, sparsity and block layout) but not the original image.
//!
//! - [`config`]: parameters and defaults
//! - [`codec`] / [`ecc`]: fixed-length payload coding
//! - [`sequence`], [`interleave`], [`correlation`]: modulation primitives
//! - [`embed`] / [`extract`]: the two pipelines
//! - [`watermarker`]: facade bundling all of the above

pub mod capacity;
pub mod codec;
pub mod config;
pub mod correlation;
pub mod ecc;
pub mod embed;
pub mod extract;
pub mod interleave;
pub mod sequence;
pub mod watermarker;

pub use capacity::CapacityInfo;
pub use codec::{DecodedBlock, ErrorCorrectionCodec};
pub use config::{Config, EmbedOptions};
pub use extract::{ExtractReport, Extraction, PayloadSource};
pub use watermarker::Watermarker;
