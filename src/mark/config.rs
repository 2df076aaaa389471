// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Watermark configuration.
//!
//! A [`Config`] is fixed at construction and shared read-only by embed and
//! extract. Both sides must use the same values; the seed acts as the shared
//! secret.

use crate::error::{Result, WatermarkError};
use crate::mark::codec::ErrorCorrectionCodec;
use crate::mark::ecc::N_MAX;
use crate::wavelet::Wavelet;

/// Default PRNG seed.
pub const DEFAULT_SEED: u64 = 1_895_746_671;

/// Default fraction of zeros in the spreading sequence.
pub const DEFAULT_SPARSITY: f64 = 0.7;

/// Default wavelet basis.
pub const DEFAULT_WAVELET: Wavelet = Wavelet::Bior3_1;

/// Default modulation strength `k`.
pub const DEFAULT_STRENGTH: f64 = 4.0;

/// Immutable embed/extract parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    max_payload: usize,
    ec_bytes: usize,
    seed: u64,
    wavelet: Wavelet,
    sparsity: f64,
}

impl Config {
    /// Configuration with default seed, wavelet and sparsity.
    pub fn new(max_payload: usize, ec_bytes: usize) -> Self {
        Self {
            max_payload,
            ec_bytes,
            seed: DEFAULT_SEED,
            wavelet: DEFAULT_WAVELET,
            sparsity: DEFAULT_SPARSITY,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_wavelet(mut self, wavelet: Wavelet) -> Self {
        self.wavelet = wavelet;
        self
    }

    /// Select the wavelet by name (e.g. `"bior3.1"`).
    ///
    /// # Errors
    /// [`WatermarkError::UnsupportedWavelet`] for unknown names.
    pub fn with_wavelet_name(self, name: &str) -> Result<Self> {
        Ok(self.with_wavelet(name.parse()?))
    }

    /// Fraction of zeros in the spreading sequence, in `[0, 1)`.
    ///
    /// Values near 0 (or near 1 on small chunks) can yield a sequence that
    /// reads the same reversed, e.g. all ones at exactly 0.0. Embed and
    /// extract then fail with
    /// [`WatermarkError::DegenerateConfiguration`] instead of carrying bits.
    pub fn with_sparsity(mut self, sparsity: f64) -> Self {
        self.sparsity = sparsity;
        self
    }

    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    pub fn ec_bytes(&self) -> usize {
        self.ec_bytes
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn wavelet(&self) -> Wavelet {
        self.wavelet
    }

    pub fn sparsity(&self) -> f64 {
        self.sparsity
    }

    /// Encoded block length in bytes.
    pub fn block_len(&self) -> usize {
        self.max_payload + self.ec_bytes
    }

    /// Number of embedded bits: `8 * (max_payload + ec_bytes)`.
    pub fn total_bits(&self) -> usize {
        self.block_len() * 8
    }

    /// Check that `codec` was built for this block layout.
    ///
    /// # Errors
    /// [`WatermarkError::InvalidConfiguration`] if the config is invalid or
    /// the codec's payload and parity lengths differ from it.
    pub fn validate_codec(&self, codec: &ErrorCorrectionCodec) -> Result<()> {
        self.validate()?;
        if codec.max_payload() != self.max_payload || codec.ec_bytes() != self.ec_bytes {
            return Err(WatermarkError::InvalidConfiguration(
                "codec block layout does not match config",
            ));
        }
        Ok(())
    }

    /// Check every field is in range.
    ///
    /// # Errors
    /// [`WatermarkError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.max_payload == 0 {
            return Err(WatermarkError::InvalidConfiguration("max_payload must be at least 1"));
        }
        if self.ec_bytes == 0 {
            return Err(WatermarkError::InvalidConfiguration("ec_bytes must be at least 1"));
        }
        if self.max_payload.checked_add(self.ec_bytes).map_or(true, |n| n > N_MAX) {
            return Err(WatermarkError::InvalidConfiguration(
                "max_payload + ec_bytes must not exceed 255",
            ));
        }
        if !(0.0..1.0).contains(&self.sparsity) {
            return Err(WatermarkError::InvalidConfiguration("sparsity must be in [0, 1)"));
        }
        Ok(())
    }
}

/// Per-call embedding knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbedOptions {
    /// Modulation strength `k` added per coefficient.
    pub strength: f64,
    /// Rescale the output to the input's observed `[min, max]`.
    pub rescale_color: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self { strength: DEFAULT_STRENGTH, rescale_color: true }
    }
}

impl EmbedOptions {
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_rescale(mut self, rescale_color: bool) -> Self {
        self.rescale_color = rescale_color;
        self
    }
}
