// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Round-trip integration tests for embed/extract on unmodified images.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use wavemark_core::{Config, EmbedOptions, Image, PayloadSource, Plane, Wavelet, Watermarker};

/// Smooth texture plus mild noise, clamped to 8-bit range.
fn synth_plane(width: usize, height: usize, seed: u64) -> Plane {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let phase = (seed % 7) as f64;
    let data = (0..width * height)
        .map(|i| {
            let (y, x) = ((i / width) as f64, (i % width) as f64);
            let v = 128.0
                + 60.0 * (x / 17.0 + phase).sin() * (y / 23.0).cos()
                + 40.0 * (x + y) / (width + height) as f64
                - 20.0
                + rng.gen_range(-4.0..4.0);
            v.clamp(0.0, 255.0)
        })
        .collect();
    Plane::new(width, height, data).unwrap()
}

fn synth_gray(width: usize, height: usize, seed: u64) -> Image {
    Image::SinglePlane(synth_plane(width, height, seed))
}

fn synth_rgb(width: usize, height: usize, seed: u64) -> Image {
    let planes = (0..3).map(|c| synth_plane(width, height, seed * 3 + c)).collect();
    Image::from_planes(planes).unwrap()
}

#[test]
fn concrete_test_payload() {
    let config = Config::new(4, 4)
        .with_seed(1_895_746_671)
        .with_wavelet_name("bior3.1")
        .unwrap()
        .with_sparsity(0.7);
    let wm = Watermarker::new(config).unwrap();
    let image = synth_gray(256, 256, 1);

    let marked = wm.embed_with(&image, b"TEST", EmbedOptions::default().with_strength(4.0)).unwrap();
    assert_eq!(wm.extract(&marked).unwrap(), b"TEST");

    let report = wm.extract_with_report(&marked).unwrap();
    assert_eq!(report.payload, b"TEST");
    assert_eq!(report.report.source, PayloadSource::SinglePlane);
    assert!(!report.report.inverted, "clean image should decode without inversion");
    assert!(report.report.errors_corrected <= 2);
}

#[test]
fn roundtrip_across_keys() {
    for seed in [1u64, 42, 0xDEAD_BEEF, u64::MAX] {
        let wm = Watermarker::new(Config::new(4, 4).with_seed(seed)).unwrap();
        let image = synth_gray(128, 128, seed.wrapping_add(5));
        let marked = wm.embed(&image, b"KEY").unwrap();
        assert_eq!(wm.extract(&marked).unwrap(), b"KEY", "seed {seed}");
    }
}

#[test]
fn roundtrip_across_strengths() {
    let wm = Watermarker::new(Config::new(4, 4)).unwrap();
    let image = synth_gray(160, 160, 9);
    for k in [4.0, 6.0, 10.0] {
        let marked = wm.embed_with(&image, b"k", EmbedOptions::default().with_strength(k)).unwrap();
        assert_eq!(wm.extract(&marked).unwrap(), b"k", "strength {k}");
    }
}

#[test]
fn roundtrip_across_wavelets() {
    for wavelet in Wavelet::ALL {
        let wm = Watermarker::new(Config::new(4, 4).with_wavelet(wavelet)).unwrap();
        let image = synth_gray(192, 192, 3);
        let marked = wm.embed(&image, b"WAVE").unwrap();
        assert_eq!(wm.extract(&marked).unwrap(), b"WAVE", "{wavelet}");
    }
}

#[test]
fn roundtrip_longer_payload() {
    let wm = Watermarker::new(Config::new(8, 8)).unwrap();
    let image = synth_gray(256, 256, 4);
    let marked = wm.embed(&image, b"wavemark").unwrap();
    assert_eq!(wm.extract(&marked).unwrap(), b"wavemark");
}

#[test]
fn empty_payload_extracts_empty() {
    let wm = Watermarker::new(Config::new(4, 4)).unwrap();
    let marked = wm.embed(&synth_gray(128, 128, 8), b"").unwrap();
    let out = wm.extract_with_report(&marked).unwrap();
    assert_eq!(out.payload, vec![0; 4]);
    assert!(out.trimmed().is_empty());
}

#[test]
fn survives_8bit_rounding() {
    let wm = Watermarker::new(Config::new(4, 4)).unwrap();
    let image = synth_gray(256, 256, 11);
    let marked = wm.embed(&image, b"u8").unwrap();

    let plane = &marked.planes()[0];
    let bytes = plane.to_u8();
    let quantized = Image::SinglePlane(Plane::from_u8(plane.width(), plane.height(), &bytes).unwrap());
    assert_eq!(wm.extract(&quantized).unwrap(), b"u8");
}

#[test]
fn rgb_every_channel_decodes() {
    let wm = Watermarker::new(Config::new(4, 4)).unwrap();
    let image = synth_rgb(128, 128, 2);
    let marked = wm.embed(&image, b"RGB").unwrap();

    let out = wm.extract_with_report(&marked).unwrap();
    assert_eq!(out.trimmed(), b"RGB");
    assert_eq!(out.report.source, PayloadSource::Channel(0));

    for (i, plane) in marked.planes().iter().enumerate() {
        let single = Image::SinglePlane(plane.clone());
        assert_eq!(wm.extract(&single).unwrap(), b"RGB", "channel {i}");
    }
}

#[test]
fn interleaved_rgb_layout_roundtrip() {
    let wm = Watermarker::new(Config::new(4, 4)).unwrap();
    let rgb = synth_rgb(128, 128, 6);
    let flat = rgb.to_vec();
    let image = Image::from_shape(&[128, 128, 3], flat).unwrap();
    assert_eq!(image, rgb);

    let marked = wm.embed(&image, b"NDAR").unwrap();
    assert_eq!(marked.shape(), vec![128, 128, 3]);
    assert_eq!(wm.extract(&marked).unwrap(), b"NDAR");
}

#[test]
fn shape_preserved_even_and_odd() {
    let wm = Watermarker::new(Config::new(4, 4)).unwrap();
    for (w, h) in [(128, 128), (131, 129), (140, 133)] {
        let gray = synth_gray(w, h, 1);
        let marked = wm.embed(&gray, b"x").unwrap();
        assert_eq!(marked.shape(), vec![h, w]);

        let rgb = synth_rgb(w, h, 1);
        let marked = wm.embed(&rgb, b"x").unwrap();
        assert_eq!(marked.shape(), vec![h, w, 3]);
    }
}

#[test]
fn odd_shape_roundtrip() {
    let wm = Watermarker::new(Config::new(4, 4)).unwrap();
    let image = synth_gray(171, 149, 21);
    let marked = wm.embed(&image, b"ODD").unwrap();
    assert_eq!(wm.extract(&marked).unwrap(), b"ODD");
}

#[test]
fn output_keeps_input_range() {
    let wm = Watermarker::new(Config::new(4, 4)).unwrap();
    let image = synth_rgb(128, 128, 5);
    let (lo, hi) = image.min_max();

    let marked = wm.embed(&image, b"rng").unwrap();
    let (mlo, mhi) = marked.min_max();
    assert!((mlo - lo).abs() < 1e-9, "min {mlo} vs {lo}");
    assert!((mhi - hi).abs() < 1e-9, "max {mhi} vs {hi}");

    let raw = wm.embed_with(&image, b"rng", EmbedOptions::default().with_rescale(false)).unwrap();
    assert_eq!(wm.extract(&raw).unwrap(), b"rng");
}

#[test]
fn embedding_is_deterministic() {
    let wm = Watermarker::new(Config::new(4, 4)).unwrap();
    let image = synth_gray(128, 128, 12);
    assert_eq!(wm.embed(&image, b"same").unwrap(), wm.embed(&image, b"same").unwrap());
}

#[test]
fn distortion_is_small() {
    let wm = Watermarker::new(Config::new(4, 4)).unwrap();
    let image = synth_gray(256, 256, 13);
    let marked = wm.embed(&image, b"TEST").unwrap();
    let a = image.planes()[0].data();
    let b = marked.planes()[0].data();
    let mse = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f64>() / a.len() as f64;
    let psnr = 10.0 * (255.0f64 * 255.0 / mse).log10();
    assert!(psnr > 30.0, "PSNR {psnr:.1} dB too low");
}

#[test]
fn wrong_key_does_not_recover_payload() {
    let image = synth_gray(256, 256, 14);
    let marked = Watermarker::new(Config::new(4, 4).with_seed(1)).unwrap().embed(&image, b"TEST").unwrap();
    let other = Watermarker::new(Config::new(4, 4).with_seed(2)).unwrap();
    assert_ne!(other.extract(&marked).ok().as_deref(), Some(&b"TEST"[..]));
}
