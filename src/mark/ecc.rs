// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Reed-Solomon error correction over GF(2^8).
//!
//! Implements shortened RS(n, k) codes with n <= 255, the primitive polynomial
//! 0x11D (x^8+x^4+x^3+x^2+1) and first consecutive root alpha^0. Encoding is
//! systematic (data || parity). Decoding uses Berlekamp-Massey, Chien search
//! and the Forney algorithm.
//!
//! Unlike a fixed-tier codec, [`ReedSolomon`] is built for one parity length
//! and keeps its own generator polynomial, so any `ec_bytes` value works.

/// Primitive polynomial for GF(2^8): x^8 + x^4 + x^3 + x^2 + 1 = 0x11D.
const PRIM_POLY: u16 = 0x11D;

/// Maximum RS block size.
pub const N_MAX: usize = 255;

// --- GF(2^8) Arithmetic ---

/// Precomputed log and exp tables for GF(2^8).
struct GfTables {
    exp: [u8; 512],
    log: [u8; 256],
}

fn build_gf_tables() -> GfTables {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];

    let mut x: u16 = 1;
    for i in 0..255u16 {
        exp[i as usize] = x as u8;
        exp[(i + 255) as usize] = x as u8; // wrap-around for easy modular access
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIM_POLY;
        }
    }
    exp[510] = exp[0];
    exp[511] = exp[1];

    GfTables { exp, log }
}

fn gf_tables() -> &'static GfTables {
    use std::sync::OnceLock;
    static TABLES: OnceLock<GfTables> = OnceLock::new();
    TABLES.get_or_init(build_gf_tables)
}

fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = gf_tables();
    t.exp[t.log[a as usize] as usize + t.log[b as usize] as usize]
}

/// Multiplicative inverse. `a` must be non-zero.
fn gf_inv(a: u8) -> u8 {
    debug_assert_ne!(a, 0, "cannot invert zero in GF(2^8)");
    let t = gf_tables();
    t.exp[255 - t.log[a as usize] as usize]
}

/// alpha^-p.
fn alpha_inv_pow(p: usize) -> u8 {
    gf_tables().exp[(255 - (p % 255)) % 255]
}

/// Evaluate polynomial at x. poly[0] is the highest-degree coefficient.
fn poly_eval(poly: &[u8], x: u8) -> u8 {
    poly.iter().fold(0u8, |acc, &coeff| gf_mul(acc, x) ^ coeff)
}

/// Evaluate polynomial in ascending power format at x.
fn eval_asc(poly: &[u8], x: u8) -> u8 {
    let mut result = 0u8;
    let mut x_pow = 1u8;
    for &coeff in poly {
        result ^= gf_mul(coeff, x_pow);
        x_pow = gf_mul(x_pow, x);
    }
    result
}

fn poly_mul(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8; a.len() + b.len() - 1];
    for (i, &ac) in a.iter().enumerate() {
        for (j, &bc) in b.iter().enumerate() {
            result[i + j] ^= gf_mul(ac, bc);
        }
    }
    result
}

/// g(x) = prod_{i=0}^{parity_len-1} (x - alpha^i), highest degree first.
fn build_gen_poly(parity_len: usize) -> Vec<u8> {
    let t = gf_tables();
    let mut gpoly = vec![1u8];
    for i in 0..parity_len {
        gpoly = poly_mul(&gpoly, &[1, t.exp[i]]);
    }
    gpoly
}

/// Error returned when RS decoding fails (too many errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsDecodeError;

impl core::fmt::Display for RsDecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Reed-Solomon: too many errors to correct")
    }
}

impl std::error::Error for RsDecodeError {}

/// A Reed-Solomon codec with a fixed number of parity symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReedSolomon {
    parity_len: usize,
    gen_poly: Vec<u8>,
}

impl ReedSolomon {
    /// Build a codec appending `parity_len` parity symbols per block.
    ///
    /// # Panics
    /// Panics if `parity_len >= 255`; callers validate first.
    pub fn new(parity_len: usize) -> Self {
        assert!(parity_len < N_MAX, "parity_len {parity_len} must be below {N_MAX}");
        Self { parity_len, gen_poly: build_gen_poly(parity_len) }
    }

    pub fn parity_len(&self) -> usize {
        self.parity_len
    }

    /// Maximum number of symbol errors correctable per block.
    pub fn capacity(&self) -> usize {
        self.parity_len / 2
    }

    /// Largest data length per block.
    fn max_data_len(&self) -> usize {
        N_MAX - self.parity_len
    }

    /// Systematic encoding: `data || parity`.
    ///
    /// Shortened codes (data shorter than [`Self::max_data_len`]) are handled
    /// implicitly: leading zero symbols do not change the LFSR state.
    ///
    /// # Panics
    /// Panics if `data.len() > self.max_data_len()`.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        assert!(
            data.len() <= self.max_data_len(),
            "data length {} exceeds max {}",
            data.len(),
            self.max_data_len()
        );
        let parity_len = self.parity_len;
        let mut encoded = Vec::with_capacity(data.len() + parity_len);
        encoded.extend_from_slice(data);
        if parity_len == 0 {
            return encoded;
        }

        let gpoly = &self.gen_poly;
        let mut shift_reg = vec![0u8; parity_len];
        for &byte in data {
            let feedback = byte ^ shift_reg[0];
            for j in 0..parity_len - 1 {
                shift_reg[j] = shift_reg[j + 1] ^ gf_mul(feedback, gpoly[j + 1]);
            }
            shift_reg[parity_len - 1] = gf_mul(feedback, gpoly[parity_len]);
        }

        encoded.extend_from_slice(&shift_reg);
        encoded
    }

    /// Syndromes S_0 .. S_{parity_len-1} of a full-length block.
    fn syndromes(&self, block: &[u8]) -> Vec<u8> {
        let tab = gf_tables();
        (0..self.parity_len).map(|i| poly_eval(block, tab.exp[i])).collect()
    }

    /// Decode one block with error correction.
    ///
    /// Returns the corrected data (first `received.len() - parity_len`
    /// symbols) and the number of symbol errors corrected.
    ///
    /// # Errors
    /// [`RsDecodeError`] if the block is malformed, has more than
    /// [`Self::capacity`] errors, or the locator points into the virtual
    /// zero padding of a shortened code.
    pub fn decode(&self, received: &[u8]) -> Result<(Vec<u8>, usize), RsDecodeError> {
        let block_len = received.len();
        if block_len < self.parity_len || block_len > N_MAX {
            return Err(RsDecodeError);
        }
        let data_len = block_len - self.parity_len;

        // Shortened code: prepend zeros to a full 255-symbol block.
        let padding = N_MAX - block_len;
        let mut full_block = vec![0u8; N_MAX];
        full_block[padding..].copy_from_slice(received);

        let syndromes = self.syndromes(&full_block);
        if syndromes.iter().all(|&s| s == 0) {
            return Ok((received[..data_len].to_vec(), 0));
        }

        let sigma_asc = berlekamp_massey(&syndromes);
        let num_errors = sigma_asc.len() - 1;
        if num_errors > self.capacity() {
            return Err(RsDecodeError);
        }

        let found = chien_search(&sigma_asc, N_MAX).ok_or(RsDecodeError)?;
        let magnitudes = forney(&sigma_asc, &syndromes, &found);

        let mut corrected = full_block;
        for (&(_, array_pos), &magnitude) in found.iter().zip(magnitudes.iter()) {
            if array_pos < padding {
                return Err(RsDecodeError);
            }
            corrected[array_pos] ^= magnitude;
        }

        if self.syndromes(&corrected).iter().any(|&s| s != 0) {
            return Err(RsDecodeError);
        }

        Ok((corrected[padding..padding + data_len].to_vec(), num_errors))
    }
}

/// Berlekamp-Massey algorithm.
///
/// Returns sigma(x) coefficients in ascending power: sigma[0]=1, sigma[1]=σ_1, etc.
fn berlekamp_massey(syndromes: &[u8]) -> Vec<u8> {
    let n = syndromes.len();

    let mut c = vec![0u8; n + 1];
    c[0] = 1;
    let mut c_len = 1usize;

    let mut b = vec![0u8; n + 1];
    b[0] = 1;
    let mut b_len = 1usize;

    let mut ell = 0usize;
    let mut bval = 1u8;
    let mut m = 1usize;

    for r in 0..n {
        let mut delta = syndromes[r];
        for i in 1..c_len {
            delta ^= gf_mul(c[i], syndromes[r - i]);
        }

        if delta == 0 {
            m += 1;
            continue;
        }

        let factor = gf_mul(delta, gf_inv(bval));

        if 2 * ell <= r {
            let old_c = c.clone();
            let old_c_len = c_len;

            c_len = (b_len + m).max(c_len);
            for j in 0..b_len {
                c[j + m] ^= gf_mul(factor, b[j]);
            }

            b[..old_c_len].copy_from_slice(&old_c[..old_c_len]);
            for v in b.iter_mut().skip(old_c_len) {
                *v = 0;
            }
            b_len = old_c_len;
            ell = r + 1 - ell;
            bval = delta;
            m = 1;
        } else {
            c_len = (b_len + m).max(c_len);
            for j in 0..b_len {
                c[j + m] ^= gf_mul(factor, b[j]);
            }
            m += 1;
        }
    }

    // Cancelled high-order terms would overstate the error count.
    while c_len > 1 && c[c_len - 1] == 0 {
        c_len -= 1;
    }
    c[..c_len].to_vec()
}

/// Chien search over a codeword of length `n`.
///
/// An error at array index k corresponds to GF position p = n-1-k, i.e. a root
/// of sigma at alpha^-p. Returns (gf_pos, array_pos) pairs, or `None` if the
/// number of roots does not match the locator degree.
fn chien_search(sigma_asc: &[u8], n: usize) -> Option<Vec<(usize, usize)>> {
    let num_errors = sigma_asc.len() - 1;
    let mut found = Vec::with_capacity(num_errors);
    for p in 0..n {
        if eval_asc(sigma_asc, alpha_inv_pow(p)) == 0 {
            found.push((p, n - 1 - p));
        }
    }
    if found.len() != num_errors {
        return None;
    }
    Some(found)
}

/// Forney algorithm with FCR=0: e_l = X_l * Omega(X_l^-1) / Sigma'(X_l^-1).
fn forney(sigma_asc: &[u8], syndromes: &[u8], found: &[(usize, usize)]) -> Vec<u8> {
    let tab = gf_tables();
    let two_t = syndromes.len();

    // Omega(x) = S(x) * Sigma(x) mod x^{2t}
    let mut omega = vec![0u8; two_t];
    for (i, &s) in sigma_asc.iter().enumerate().take(two_t) {
        for j in 0..two_t - i {
            omega[i + j] ^= gf_mul(s, syndromes[j]);
        }
    }

    // Formal derivative: only odd powers survive in characteristic 2.
    let mut sigma_prime = vec![0u8; sigma_asc.len().saturating_sub(1)];
    for i in (1..sigma_asc.len()).step_by(2) {
        sigma_prime[i - 1] = sigma_asc[i];
    }

    found
        .iter()
        .map(|&(gf_pos, _)| {
            let x_val = tab.exp[gf_pos % 255];
            let x_inv = alpha_inv_pow(gf_pos);
            let sp_val = eval_asc(&sigma_prime, x_inv);
            if sp_val == 0 {
                return 0;
            }
            gf_mul(x_val, gf_mul(eval_asc(&omega, x_inv), gf_inv(sp_val)))
        })
        .collect()
}
