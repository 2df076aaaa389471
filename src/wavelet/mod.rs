// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Wavelet transform primitives.
//!
//! The watermark pipeline only needs one decomposition level: a plane goes in,
//! an approximation plus three equal-shaped detail subbands come out, and the
//! inverse puts them back together. [`WaveletTransform`] is that contract;
//! [`Dwt2`] is the built-in implementation for the [`Wavelet`] families listed
//! below. Zero-dependency (std only).

pub mod dwt;
pub mod filters;

use core::fmt;
use core::str::FromStr;

use crate::error::{Result, WatermarkError};
use crate::image::Plane;
use filters::FilterBank;

/// Supported wavelet families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wavelet {
    /// Haar (also accepted as `db1`).
    Haar,
    /// Daubechies 2.
    Db2,
    /// Biorthogonal 3.1.
    Bior3_1,
}

impl Wavelet {
    pub const ALL: [Wavelet; 3] = [Wavelet::Haar, Wavelet::Db2, Wavelet::Bior3_1];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Wavelet::Haar => "haar",
            Wavelet::Db2 => "db2",
            Wavelet::Bior3_1 => "bior3.1",
        }
    }

    pub fn filter_bank(self) -> &'static FilterBank {
        match self {
            Wavelet::Haar => &filters::HAAR,
            Wavelet::Db2 => &filters::DB2,
            Wavelet::Bior3_1 => &filters::BIOR3_1,
        }
    }
}

impl fmt::Display for Wavelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Wavelet {
    type Err = WatermarkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "haar" | "db1" => Ok(Wavelet::Haar),
            "db2" => Ok(Wavelet::Db2),
            "bior3.1" => Ok(Wavelet::Bior3_1),
            _ => Err(WatermarkError::UnsupportedWavelet(s.to_string())),
        }
    }
}

/// One decomposition level of a plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Low-pass along both axes. Never modified by the watermark.
    pub approx: Plane,
    pub horizontal: Plane,
    pub vertical: Plane,
    pub diagonal: Plane,
}

/// Single-level 2D wavelet transform used by the embed/extract pipeline.
///
/// `Sync` so one transform can serve every channel on a worker pool.
pub trait WaveletTransform: Sync {
    /// Split `plane` into approximation and three detail subbands of
    /// identical shape.
    fn decompose(&self, plane: &Plane) -> Decomposition;

    /// Rebuild a plane from its subbands. The result may be larger than the
    /// original plane along odd-length axes; callers crop.
    fn reconstruct(&self, dec: &Decomposition) -> Result<Plane>;

    /// `(rows, cols)` of each subband for a `height × width` plane.
    fn subband_shape(&self, height: usize, width: usize) -> (usize, usize);
}

/// Built-in separable DWT with symmetric boundary extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dwt2 {
    wavelet: Wavelet,
}

impl Dwt2 {
    pub fn new(wavelet: Wavelet) -> Self {
        Self { wavelet }
    }

    pub fn wavelet(&self) -> Wavelet {
        self.wavelet
    }
}

impl WaveletTransform for Dwt2 {
    fn decompose(&self, plane: &Plane) -> Decomposition {
        dwt::dwt_2d(plane, self.wavelet.filter_bank())
    }

    fn reconstruct(&self, dec: &Decomposition) -> Result<Plane> {
        dwt::idwt_2d(dec, self.wavelet.filter_bank())
    }

    fn subband_shape(&self, height: usize, width: usize) -> (usize, usize) {
        let f = self.wavelet.filter_bank().len();
        (dwt::coeff_len(height, f), dwt::coeff_len(width, f))
    }
}
