// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Analysis and synthesis filter coefficients.
//!
//! Values match the PyWavelets tables for the same names, so subband layout
//! and magnitudes agree with the reference toolchain.

/// Decomposition and reconstruction filters of one wavelet family.
#[derive(Debug)]
pub struct FilterBank {
    pub dec_lo: &'static [f64],
    pub dec_hi: &'static [f64],
    pub rec_lo: &'static [f64],
    pub rec_hi: &'static [f64],
}

impl FilterBank {
    /// Common length of all four filters.
    pub fn len(&self) -> usize {
        self.dec_lo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dec_lo.is_empty()
    }
}

const H: f64 = core::f64::consts::FRAC_1_SQRT_2;

pub static HAAR: FilterBank = FilterBank {
    dec_lo: &[H, H],
    dec_hi: &[-H, H],
    rec_lo: &[H, H],
    rec_hi: &[H, -H],
};

/// Daubechies 2 (4 taps).
pub static DB2: FilterBank = FilterBank {
    dec_lo: &[
        -0.12940952255126037,
        0.2241438680420134,
        0.8365163037378079,
        0.48296291314453416,
    ],
    dec_hi: &[
        -0.48296291314453416,
        0.8365163037378079,
        -0.2241438680420134,
        -0.12940952255126037,
    ],
    rec_lo: &[
        0.48296291314453416,
        0.8365163037378079,
        0.2241438680420134,
        -0.12940952255126037,
    ],
    rec_hi: &[
        -0.12940952255126037,
        -0.2241438680420134,
        0.8365163037378079,
        -0.48296291314453416,
    ],
};

/// Biorthogonal 3.1 (4 taps, linear phase).
pub static BIOR3_1: FilterBank = FilterBank {
    dec_lo: &[
        -0.3535533905932738,
        1.0606601717798212,
        1.0606601717798212,
        -0.3535533905932738,
    ],
    dec_hi: &[
        -0.1767766952966369,
        0.5303300858899106,
        -0.5303300858899106,
        0.1767766952966369,
    ],
    rec_lo: &[
        0.1767766952966369,
        0.5303300858899106,
        0.5303300858899106,
        0.1767766952966369,
    ],
    rec_hi: &[
        -0.3535533905932738,
        -1.0606601717798212,
        1.0606601717798212,
        0.3535533905932738,
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_have_equal_length() {
        for bank in [&HAAR, &DB2, &BIOR3_1] {
            assert_eq!(bank.dec_hi.len(), bank.len());
            assert_eq!(bank.rec_lo.len(), bank.len());
            assert_eq!(bank.rec_hi.len(), bank.len());
        }
    }

    #[test]
    fn lowpass_dc_gain_is_sqrt2() {
        for bank in [&HAAR, &DB2, &BIOR3_1] {
            let dec: f64 = bank.dec_lo.iter().sum();
            let rec: f64 = bank.rec_lo.iter().sum();
            assert!((dec - core::f64::consts::SQRT_2).abs() < 1e-9, "dec gain {dec}");
            assert!((rec - core::f64::consts::SQRT_2).abs() < 1e-9, "rec gain {rec}");
        }
    }

    #[test]
    fn highpass_rejects_dc() {
        for bank in [&HAAR, &DB2, &BIOR3_1] {
            let dec: f64 = bank.dec_hi.iter().sum();
            assert!(dec.abs() < 1e-9);
        }
    }
}
