// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! In-memory image representation.
//!
//! A [`Plane`] is a single row-major `f64` matrix. An [`Image`] is either one
//! plane (grayscale, rank 2) or a stack of equally-shaped planes (rank 3,
//! channels last in the flat layout). Every pipeline stage treats planes as
//! read-only input and allocates new planes for its output.

use crate::error::{Result, WatermarkError};

/// A 2D matrix of samples stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Plane {
    /// Wrap a row-major buffer of `height * width` samples.
    ///
    /// # Errors
    /// [`WatermarkError::InvalidImageShape`] if a dimension is zero or the
    /// buffer length does not match.
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(data.len()) {
            return Err(WatermarkError::InvalidImageShape);
        }
        Ok(Self { width, height, data })
    }

    /// A `height × width` plane filled with zeros.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self { width, height, data: vec![0.0; width * height] }
    }

    /// Build a plane from 8-bit samples.
    pub fn from_u8(width: usize, height: usize, samples: &[u8]) -> Result<Self> {
        Self::new(width, height, samples.iter().map(|&s| s as f64).collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, cols)`, i.e. `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.width + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.data[row * self.width..(row + 1) * self.width]
    }

    /// Keep the top-left `height × width` region.
    ///
    /// Used after inverse wavelet reconstruction, which may return a plane
    /// one sample larger per odd-length axis.
    pub fn crop(&self, height: usize, width: usize) -> Result<Plane> {
        if height == 0 || width == 0 || height > self.height || width > self.width {
            return Err(WatermarkError::ShapeMismatch);
        }
        let mut data = Vec::with_capacity(height * width);
        for r in 0..height {
            data.extend_from_slice(&self.row(r)[..width]);
        }
        Ok(Plane { width, height, data })
    }

    /// Observed `(min, max)` of all samples.
    pub fn min_max(&self) -> (f64, f64) {
        min_max(self.data.iter().copied())
    }

    /// Round and clamp every sample to `0..=255`.
    pub fn to_u8(&self) -> Vec<u8> {
        self.data.iter().map(|&v| v.round().clamp(0.0, 255.0) as u8).collect()
    }
}

/// A grayscale plane or a stack of channel planes.
#[derive(Debug, Clone, PartialEq)]
pub enum Image {
    /// Rank-2 image.
    SinglePlane(Plane),
    /// Rank-3 image; all planes share one shape.
    ChannelStack(Vec<Plane>),
}

impl Image {
    /// Build an image from a NumPy-style shape and flat data.
    ///
    /// `[h, w]` produces a [`Image::SinglePlane`]; `[h, w, c]` (channels
    /// interleaved, last axis fastest) produces a [`Image::ChannelStack`].
    ///
    /// # Errors
    /// [`WatermarkError::InvalidImageShape`] for any other rank, for zero
    /// dimensions, or when `data.len()` is not the product of `shape`.
    pub fn from_shape(shape: &[usize], data: Vec<f64>) -> Result<Self> {
        match *shape {
            [height, width] => Ok(Image::SinglePlane(Plane::new(width, height, data)?)),
            [height, width, channels] => {
                let pixels = height
                    .checked_mul(width)
                    .ok_or(WatermarkError::InvalidImageShape)?;
                if channels == 0 || pixels == 0 || pixels.checked_mul(channels) != Some(data.len()) {
                    return Err(WatermarkError::InvalidImageShape);
                }
                let planes = (0..channels)
                    .map(|c| {
                        let samples = data.iter().skip(c).step_by(channels).copied().collect();
                        Plane::new(width, height, samples)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Image::ChannelStack(planes))
            }
            _ => Err(WatermarkError::InvalidImageShape),
        }
    }

    /// Build a channel stack from separate planes.
    pub fn from_planes(planes: Vec<Plane>) -> Result<Self> {
        let first = planes.first().ok_or(WatermarkError::InvalidImageShape)?.shape();
        if planes.iter().any(|p| p.shape() != first) {
            return Err(WatermarkError::InvalidImageShape);
        }
        Ok(Image::ChannelStack(planes))
    }

    /// NumPy-style shape: `[h, w]` or `[h, w, c]`.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Image::SinglePlane(p) => vec![p.height, p.width],
            Image::ChannelStack(planes) => {
                let (h, w) = planes.first().map_or((0, 0), Plane::shape);
                vec![h, w, planes.len()]
            }
        }
    }

    /// All planes; a single plane for grayscale images.
    pub fn planes(&self) -> &[Plane] {
        match self {
            Image::SinglePlane(p) => std::slice::from_ref(p),
            Image::ChannelStack(planes) => planes,
        }
    }

    /// Flatten back into the layout accepted by [`Image::from_shape`].
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Image::SinglePlane(p) => p.data.clone(),
            Image::ChannelStack(planes) => {
                let pixels = planes.first().map_or(0, Plane::len);
                let mut out = Vec::with_capacity(pixels * planes.len());
                for i in 0..pixels {
                    out.extend(planes.iter().map(|p| p.data[i]));
                }
                out
            }
        }
    }

    /// Observed `(min, max)` across every channel.
    pub fn min_max(&self) -> (f64, f64) {
        min_max(self.planes().iter().flat_map(|p| p.data.iter().copied()))
    }

    /// Check the invariants the public variants cannot enforce: a non-empty
    /// stack of equally-shaped, non-empty planes.
    pub fn validate(&self) -> Result<()> {
        let planes = self.planes();
        let first = planes.first().ok_or(WatermarkError::InvalidImageShape)?;
        let ok = planes.iter().all(|p| p.shape() == first.shape() && !p.is_empty());
        if ok {
            Ok(())
        } else {
            Err(WatermarkError::InvalidImageShape)
        }
    }

    /// Per-pixel mean across channels, collapsed into one plane.
    pub fn channel_mean(&self) -> Result<Plane> {
        self.validate()?;
        let planes = self.planes();
        let mut mean = Plane::zeros(planes[0].width, planes[0].height);
        for plane in planes {
            for (m, &v) in mean.data.iter_mut().zip(plane.data.iter()) {
                *m += v;
            }
        }
        let n = planes.len() as f64;
        for m in mean.data.iter_mut() {
            *m /= n;
        }
        Ok(mean)
    }

    /// Apply `f` to every plane, preserving the variant.
    pub fn map_planes<F>(&self, mut f: F) -> Image
    where
        F: FnMut(&Plane) -> Plane,
    {
        match self {
            Image::SinglePlane(p) => Image::SinglePlane(f(p)),
            Image::ChannelStack(planes) => Image::ChannelStack(planes.iter().map(f).collect()),
        }
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Linearly map the image's observed range onto `[out_min, out_max]`.
///
/// All channels share one input range, so inter-channel ratios are kept.
/// A constant image maps to `out_min`.
pub fn rescale_intensity(image: &Image, out_min: f64, out_max: f64) -> Image {
    let (in_min, in_max) = image.min_max();
    let span = in_max - in_min;
    let scale = if span > 0.0 { (out_max - out_min) / span } else { 0.0 };
    image.map_planes(|plane| {
        let data = plane
            .data
            .iter()
            .map(|&v| ((v - in_min) * scale + out_min).max(out_min).min(out_max))
            .collect();
        Plane { width: plane.width, height: plane.height, data }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_rejects_bad_length() {
        assert_eq!(Plane::new(3, 2, vec![0.0; 5]), Err(WatermarkError::InvalidImageShape));
        assert_eq!(Plane::new(0, 2, vec![]), Err(WatermarkError::InvalidImageShape));
        assert!(Plane::new(3, 2, vec![0.0; 6]).is_ok());
    }

    #[test]
    fn from_shape_rank_dispatch() {
        let gray = Image::from_shape(&[2, 3], vec![0.0; 6]).unwrap();
        assert!(matches!(gray, Image::SinglePlane(_)));
        assert_eq!(gray.shape(), vec![2, 3]);

        let rgb = Image::from_shape(&[2, 3, 3], (0..18).map(|v| v as f64).collect()).unwrap();
        assert!(matches!(rgb, Image::ChannelStack(_)));
        assert_eq!(rgb.shape(), vec![2, 3, 3]);
        // Channel 1 holds every third sample starting at index 1.
        assert_eq!(rgb.planes()[1].data(), &[1.0, 4.0, 7.0, 10.0, 13.0, 16.0]);
    }

    #[test]
    fn from_shape_rejects_other_ranks() {
        assert_eq!(Image::from_shape(&[6], vec![0.0; 6]), Err(WatermarkError::InvalidImageShape));
        assert_eq!(
            Image::from_shape(&[1, 2, 3, 1], vec![0.0; 6]),
            Err(WatermarkError::InvalidImageShape)
        );
        assert_eq!(Image::from_shape(&[2, 2, 3], vec![0.0; 11]), Err(WatermarkError::InvalidImageShape));
    }

    #[test]
    fn to_vec_inverts_from_shape() {
        let data: Vec<f64> = (0..24).map(|v| v as f64).collect();
        let img = Image::from_shape(&[2, 4, 3], data.clone()).unwrap();
        assert_eq!(img.to_vec(), data);
    }

    #[test]
    fn from_planes_rejects_ragged_stack() {
        let a = Plane::zeros(4, 4);
        let b = Plane::zeros(4, 3);
        assert_eq!(Image::from_planes(vec![a, b]), Err(WatermarkError::InvalidImageShape));
        assert_eq!(Image::from_planes(vec![]), Err(WatermarkError::InvalidImageShape));
    }

    #[test]
    fn crop_keeps_top_left() {
        let p = Plane::new(3, 3, (0..9).map(|v| v as f64).collect()).unwrap();
        let c = p.crop(2, 2).unwrap();
        assert_eq!(c.data(), &[0.0, 1.0, 3.0, 4.0]);
        assert!(p.crop(4, 1).is_err());
    }

    #[test]
    fn channel_mean_averages_pixels() {
        let a = Plane::new(2, 1, vec![0.0, 3.0]).unwrap();
        let b = Plane::new(2, 1, vec![6.0, 3.0]).unwrap();
        let img = Image::from_planes(vec![a, b]).unwrap();
        assert_eq!(img.channel_mean().unwrap().data(), &[3.0, 3.0]);
        assert!(Image::ChannelStack(vec![]).channel_mean().is_err());
    }

    #[test]
    fn rescale_matches_target_range() {
        let img = Image::SinglePlane(Plane::new(4, 1, vec![-10.0, 0.0, 10.0, 30.0]).unwrap());
        let out = rescale_intensity(&img, 0.0, 255.0);
        assert_eq!(out.min_max(), (0.0, 255.0));
        assert!((out.planes()[0].get(0, 1) - 63.75).abs() < 1e-12);
    }

    #[test]
    fn rescale_constant_image() {
        let img = Image::SinglePlane(Plane::new(2, 2, vec![5.0; 4]).unwrap());
        let out = rescale_intensity(&img, 10.0, 20.0);
        assert_eq!(out.planes()[0].data(), &[10.0; 4]);
    }

    #[test]
    fn to_u8_rounds_and_clamps() {
        let p = Plane::new(4, 1, vec![-3.0, 12.4, 12.6, 300.0]).unwrap();
        assert_eq!(p.to_u8(), vec![0, 12, 13, 255]);
    }
}
