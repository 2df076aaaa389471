// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Pearson correlation, the bit-decision statistic.

/// Pearson correlation coefficient of two equal-length vectors.
///
/// Returns 0.0 when either vector has zero variance (or the inputs are
/// empty), so an undefined correlation never wins a comparison.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom > 0.0 && denom.is_finite() {
        (cov / denom).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_correlation() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn anti_correlation() {
        let a = [1.0, 2.0, 3.0];
        let b = [3.0, 2.0, 1.0];
        assert!((pearson(&a, &b) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn known_value() {
        // cov = 2, var_a = 2, var_b = 13/6
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 1.5, 3.0];
        let expected = 2.0 / (2.0 * 13.0 / 6.0f64).sqrt();
        assert!((pearson(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn constant_input_is_zero() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(pearson(&[], &[]), 0.0);
    }

    #[test]
    fn invariant_to_offset_and_scale() {
        let a = [0.3, -1.2, 4.4, 2.0, 0.0];
        let b = [1.0, 0.0, 1.0, 1.0, 0.0];
        let shifted: Vec<f64> = a.iter().map(|v| v * 3.0 + 100.0).collect();
        assert!((pearson(&a, &b) - pearson(&shifted, &b)).abs() < 1e-12);
    }
}
