// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! High-level embed/extract facade.

use crate::error::Result;
use crate::image::Image;
use crate::mark::capacity::{capacity_for_shape, CapacityInfo};
use crate::mark::codec::ErrorCorrectionCodec;
use crate::mark::config::{Config, EmbedOptions};
use crate::mark::embed::embed;
use crate::mark::extract::{extract, Extraction};
use crate::wavelet::{Dwt2, WaveletTransform};

/// A validated configuration bundled with its codec and transform.
///
/// Holds no mutable state; one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Watermarker<T = Dwt2> {
    config: Config,
    codec: ErrorCorrectionCodec,
    transform: T,
}

impl Watermarker<Dwt2> {
    /// Watermarker using the built-in DWT for `config.wavelet()`.
    ///
    /// # Errors
    /// [`crate::WatermarkError::InvalidConfiguration`] if `config` is out of
    /// range.
    pub fn new(config: Config) -> Result<Self> {
        let transform = Dwt2::new(config.wavelet());
        Self::with_transform(config, transform)
    }
}

impl<T: WaveletTransform> Watermarker<T> {
    /// Watermarker with a caller-supplied transform. The config's wavelet is
    /// ignored.
    pub fn with_transform(config: Config, transform: T) -> Result<Self> {
        config.validate()?;
        let codec = ErrorCorrectionCodec::new(config.max_payload(), config.ec_bytes())?;
        Ok(Self { config, codec, transform })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn codec(&self) -> &ErrorCorrectionCodec {
        &self.codec
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Embed `payload` with default strength and range rescaling.
    pub fn embed(&self, image: &Image, payload: &[u8]) -> Result<Image> {
        self.embed_with(image, payload, EmbedOptions::default())
    }

    pub fn embed_with(&self, image: &Image, payload: &[u8], options: EmbedOptions) -> Result<Image> {
        embed(&self.config, &self.codec, &self.transform, image, payload, &options)
    }

    /// Extract the payload with trailing zero padding removed.
    pub fn extract(&self, image: &Image) -> Result<Vec<u8>> {
        Ok(self.extract_with_report(image)?.trimmed().to_vec())
    }

    /// Extract the full `max_payload` bytes along with decode diagnostics.
    pub fn extract_with_report(&self, image: &Image) -> Result<Extraction> {
        extract(&self.config, &self.codec, &self.transform, image)
    }

    /// Watermark layout for a `width × height` image.
    pub fn capacity(&self, width: usize, height: usize) -> Result<CapacityInfo> {
        capacity_for_shape(&self.config, &self.transform, height, width)
    }
}
