// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Antipodal spreading sequence generation.
//!
//! Each bit is carried by adding one of two binary patterns to a chunk of
//! detail coefficients. The patterns come from a ChaCha20 PRNG re-seeded from
//! the configured seed on every call, so the extractor rebuilds exactly the
//! sequences used at embed time and concurrent callers never share state.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::error::{Result, WatermarkError};

/// The two patterns for bit 0 and bit 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencePair {
    /// Pattern added for a 0 bit. Values are 0.0 or 1.0.
    pub seq0: Vec<f64>,
    /// Pattern added for a 1 bit: `seq0` reversed.
    pub seq1: Vec<f64>,
}

impl SequencePair {
    /// Pattern for `bit`.
    pub fn for_bit(&self, bit: u8) -> &[f64] {
        if bit == 0 {
            &self.seq0
        } else {
            &self.seq1
        }
    }
}

/// Generate the sequence pair for `chunk_size` coefficients.
///
/// `seq0[i]` is 1 when the i-th uniform draw in `[0, 1)` is at least
/// `sparsity`, so roughly `1 - sparsity` of the entries are ones.
///
/// # Errors
/// [`WatermarkError::DegenerateConfiguration`] if `chunk_size` is zero or
/// `seq0` is a palindrome (constant sequences included), since the two bit
/// patterns would then be identical.
pub fn generate(seed: u64, chunk_size: usize, sparsity: f64) -> Result<SequencePair> {
    if chunk_size == 0 {
        return Err(WatermarkError::DegenerateConfiguration);
    }
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let seq0: Vec<f64> = (0..chunk_size)
        .map(|_| if rng.gen::<f64>() >= sparsity { 1.0 } else { 0.0 })
        .collect();
    let seq1: Vec<f64> = seq0.iter().rev().copied().collect();
    if seq0 == seq1 {
        return Err(WatermarkError::DegenerateConfiguration);
    }
    Ok(SequencePair { seq0, seq1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = generate(1895746671, 500, 0.7).unwrap();
        let b = generate(1895746671, 500, 0.7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seq1_is_reverse_of_seq0() {
        let pair = generate(42, 97, 0.5).unwrap();
        let mut reversed = pair.seq0.clone();
        reversed.reverse();
        assert_eq!(pair.seq1, reversed);
    }

    #[test]
    fn values_are_binary() {
        let pair = generate(3, 256, 0.3).unwrap();
        assert!(pair.seq0.iter().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn density_follows_sparsity() {
        let pair = generate(11, 20_000, 0.7).unwrap();
        let ones = pair.seq0.iter().filter(|&&v| v == 1.0).count() as f64 / 20_000.0;
        assert!((ones - 0.3).abs() < 0.02, "density {ones}");
    }

    #[test]
    fn zero_sparsity_is_degenerate() {
        // Every draw is >= 0.0, so seq0 is all ones and equals its reverse.
        assert_eq!(generate(5, 64, 0.0), Err(WatermarkError::DegenerateConfiguration));
    }

    #[test]
    fn single_element_is_degenerate() {
        assert_eq!(generate(5, 1, 0.5), Err(WatermarkError::DegenerateConfiguration));
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate(1, 128, 0.5).unwrap();
        let b = generate(2, 128, 0.5).unwrap();
        assert_ne!(a.seq0, b.seq0);
    }

    #[test]
    fn prefix_stable_across_lengths() {
        // Re-seeding per call means a longer chunk extends a shorter one.
        let short = generate(9, 50, 0.7).unwrap();
        let long = generate(9, 80, 0.7).unwrap();
        assert_eq!(short.seq0[..], long.seq0[..50]);
    }

    #[test]
    fn zero_chunk_is_degenerate() {
        assert_eq!(generate(1, 0, 0.7), Err(WatermarkError::DegenerateConfiguration));
    }
}
