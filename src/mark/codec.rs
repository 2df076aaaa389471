// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Fixed-length payload coding.
//!
//! Every payload is zero-padded to `max_payload` bytes and followed by
//! `ec_bytes` Reed-Solomon parity bytes, so the embedded block length never
//! depends on the payload. On decode the correlation detector has no polarity
//! reference, so a block that fails is retried bit-complemented.

use super::ecc::{ReedSolomon, N_MAX};
use crate::error::{Result, WatermarkError};

/// Result of a successful block decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBlock {
    /// Corrected `max_payload` bytes, zero padding included.
    pub payload: Vec<u8>,
    /// Symbol errors corrected by Reed-Solomon.
    pub errors_corrected: usize,
    /// True when the bit-complemented block was the one that decoded.
    pub inverted: bool,
}

/// Systematic payload codec for one `(max_payload, ec_bytes)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCorrectionCodec {
    max_payload: usize,
    rs: ReedSolomon,
}

impl ErrorCorrectionCodec {
    /// # Errors
    /// [`WatermarkError::InvalidConfiguration`] unless both lengths are
    /// non-zero and the block fits one Reed-Solomon codeword.
    pub fn new(max_payload: usize, ec_bytes: usize) -> Result<Self> {
        if max_payload == 0 {
            return Err(WatermarkError::InvalidConfiguration("max_payload must be at least 1"));
        }
        if ec_bytes == 0 {
            return Err(WatermarkError::InvalidConfiguration("ec_bytes must be at least 1"));
        }
        if max_payload.checked_add(ec_bytes).map_or(true, |n| n > N_MAX) {
            return Err(WatermarkError::InvalidConfiguration(
                "max_payload + ec_bytes must not exceed 255",
            ));
        }
        Ok(Self { max_payload, rs: ReedSolomon::new(ec_bytes) })
    }

    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    pub fn ec_bytes(&self) -> usize {
        self.rs.parity_len()
    }

    /// Byte errors correctable per block: `floor(ec_bytes / 2)`.
    pub fn error_capacity(&self) -> usize {
        self.rs.capacity()
    }

    /// Encoded block length: `max_payload + ec_bytes`.
    pub fn block_len(&self) -> usize {
        self.max_payload + self.rs.parity_len()
    }

    /// Zero-pad `payload` to `max_payload` bytes and append parity.
    ///
    /// # Errors
    /// [`WatermarkError::InvalidPayloadLength`] if the payload is too long.
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() > self.max_payload {
            return Err(WatermarkError::InvalidPayloadLength {
                len: payload.len(),
                max: self.max_payload,
            });
        }
        let mut padded = payload.to_vec();
        padded.resize(self.max_payload, 0);
        Ok(self.rs.encode(&padded))
    }

    /// Correct `block` and return its `max_payload`-byte prefix.
    ///
    /// # Errors
    /// [`WatermarkError::DecodeFailure`] if the block has the wrong length or
    /// more errors than the code can correct.
    pub fn decode(&self, block: &[u8]) -> Result<DecodedBlock> {
        if block.len() != self.block_len() {
            return Err(WatermarkError::DecodeFailure);
        }
        let (payload, errors_corrected) = self.rs.decode(block)?;
        Ok(DecodedBlock { payload, errors_corrected, inverted: false })
    }

    /// [`Self::decode`], falling back to the bit-complemented block.
    pub fn decode_with_polarity(&self, block: &[u8]) -> Result<DecodedBlock> {
        self.decode(block).or_else(|_| {
            let flipped = complement(block);
            self.decode(&flipped).map(|decoded| DecodedBlock { inverted: true, ..decoded })
        })
    }
}

/// Bitwise complement of every byte.
pub fn complement(block: &[u8]) -> Vec<u8> {
    block.iter().map(|&b| !b).collect()
}

/// Drop trailing zero padding from a decoded payload.
pub fn trim_padding(payload: &[u8]) -> &[u8] {
    let end = payload.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &payload[..end]
}
