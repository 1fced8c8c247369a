// SPDX-License-Identifier: MPL-2.0

//! Filter bake for captured frames
//!
//! The live preview applies the filter as a composited layer effect, so a raw
//! frame carries none of it. This module renders the same filter chain on the
//! CPU before encoding:
//!
//! ```text
//! saturate ─▶ hue-rotate ─▶ brightness ─▶ contrast ─▶ blur
//! ```
//!
//! The color stages use the Filter Effects matrices in linear order, clamping
//! to `[0, 1]` after each one. Blur is a Gaussian with the beauty radius as
//! its standard deviation.

use crate::backends::camera::types::CameraFrame;
use crate::constants::{BEAUTY_BLUR_PX, BEAUTY_CONTRAST_GAIN};
use crate::errors::PhotoError;
use crate::filters::FilterParams;
use image::RgbaImage;
use std::sync::Arc;
use tracing::{debug, info};

type ColorMatrix = [[f32; 3]; 3];

/// Filter chain in the units the matrices use
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostProcessingConfig {
    /// Saturation factor, 1.0 = unchanged
    pub saturation: f32,
    /// Hue rotation in degrees
    pub hue_degrees: f32,
    /// Brightness factor, 1.0 = unchanged
    pub brightness: f32,
    /// Contrast factor, 1.0 = unchanged
    pub contrast: f32,
    /// Gaussian blur sigma in pixels
    pub blur_px: f32,
}

impl From<FilterParams> for PostProcessingConfig {
    fn from(params: FilterParams) -> Self {
        let beauty = params.beauty / 100.0;
        Self {
            saturation: (params.saturation / 100.0) as f32,
            hue_degrees: params.hue as f32,
            brightness: (params.brightness / 100.0) as f32,
            contrast: (1.0 + beauty * BEAUTY_CONTRAST_GAIN) as f32,
            blur_px: (beauty * BEAUTY_BLUR_PX) as f32,
        }
    }
}

impl Default for PostProcessingConfig {
    fn default() -> Self {
        FilterParams::default().into()
    }
}

/// Processed image data
pub struct ProcessedImage {
    pub image: RgbaImage,
    pub width: u32,
    pub height: u32,
}

/// Post-processor for captured frames
pub struct PostProcessor {
    config: PostProcessingConfig,
}

impl PostProcessor {
    pub fn new(config: PostProcessingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> PostProcessingConfig {
        self.config
    }

    /// Bake the filter into a captured frame on the blocking pool
    pub async fn process(&self, frame: Arc<CameraFrame>) -> Result<ProcessedImage, PhotoError> {
        info!(
            width = frame.width,
            height = frame.height,
            "Starting post-processing"
        );
        let config = self.config;

        tokio::task::spawn_blocking(move || Self::process_blocking(&frame, &config))
            .await
            .map_err(|e| PhotoError::EncodingFailed(format!("Post-processing task error: {}", e)))?
    }

    /// Synchronous body of [`PostProcessor::process`]
    pub fn process_blocking(
        frame: &CameraFrame,
        config: &PostProcessingConfig,
    ) -> Result<ProcessedImage, PhotoError> {
        let rgba = frame.packed_rgba().ok_or_else(|| {
            PhotoError::InvalidFrame(format!(
                "{} bytes for {}x{}",
                frame.data.len(),
                frame.width,
                frame.height
            ))
        })?;
        let mut image = RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| PhotoError::InvalidFrame("buffer size mismatch".to_string()))?;

        apply_color_filters(&mut image, config);
        if config.blur_px > 0.0 {
            image = image::imageops::blur(&image, config.blur_px);
        }

        debug!(blur = config.blur_px, "Post-processing complete");
        Ok(ProcessedImage {
            width: frame.width,
            height: frame.height,
            image,
        })
    }
}

/// `saturate()` matrix
fn saturate_matrix(s: f32) -> ColorMatrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

/// `hue-rotate()` matrix
fn hue_rotate_matrix(degrees: f32) -> ColorMatrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

fn apply_matrix(m: &ColorMatrix, [r, g, b]: [f32; 3]) -> [f32; 3] {
    [
        (m[0][0] * r + m[0][1] * g + m[0][2] * b).clamp(0.0, 1.0),
        (m[1][0] * r + m[1][1] * g + m[1][2] * b).clamp(0.0, 1.0),
        (m[2][0] * r + m[2][1] * g + m[2][2] * b).clamp(0.0, 1.0),
    ]
}

/// Apply the color stages in place; alpha is untouched
pub fn apply_color_filters(image: &mut RgbaImage, config: &PostProcessingConfig) {
    // Identity stages are skipped
    let saturate = (config.saturation != 1.0).then(|| saturate_matrix(config.saturation));
    let hue = (config.hue_degrees != 0.0).then(|| hue_rotate_matrix(config.hue_degrees));
    let intercept = 0.5 - 0.5 * config.contrast;

    for pixel in image.pixels_mut() {
        let rgb = [
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        ];
        let rgb = saturate.as_ref().map_or(rgb, |m| apply_matrix(m, rgb));
        let rgb = hue.as_ref().map_or(rgb, |m| apply_matrix(m, rgb));
        let rgb = rgb.map(|c| (c * config.brightness).clamp(0.0, 1.0));
        let rgb = rgb.map(|c| (c * config.contrast + intercept).clamp(0.0, 1.0));

        pixel[0] = (rgb[0] * 255.0).round() as u8;
        pixel[1] = (rgb[1] * 255.0).round() as u8;
        pixel[2] = (rgb[2] * 255.0).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> RgbaImage {
        RgbaImage::from_raw(
            2,
            2,
            vec![
                255, 0, 0, 255, //
                0, 200, 40, 255, //
                10, 20, 230, 128, //
                90, 90, 90, 0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_default_config_is_identity() {
        let mut image = sample_image();
        apply_color_filters(&mut image, &PostProcessingConfig::default());
        assert_eq!(image, sample_image());
    }

    #[test]
    fn test_config_from_params() {
        let config = PostProcessingConfig::from(FilterParams::new(140.0, -15.0, 110.0, 50.0));
        assert!((config.saturation - 1.4).abs() < 1e-6);
        assert!((config.contrast - 1.15).abs() < 1e-6);
        assert!((config.blur_px - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let mut image = sample_image();
        let config = PostProcessingConfig {
            saturation: 0.0,
            ..PostProcessingConfig::default()
        };
        apply_color_filters(&mut image, &config);
        for pixel in image.pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
        assert_eq!(image.get_pixel(1, 0)[3], 255);
        assert_eq!(image.get_pixel(0, 1)[3], 128);
    }

    #[test]
    fn test_zero_brightness_is_black() {
        let mut image = sample_image();
        let config = PostProcessingConfig {
            brightness: 0.0,
            ..PostProcessingConfig::default()
        };
        apply_color_filters(&mut image, &config);
        assert!(image.pixels().all(|p| p[0] == 0 && p[1] == 0 && p[2] == 0));
    }

    #[test]
    fn test_process_keeps_native_size() {
        let frame = CameraFrame::from_rgba(8, 6, vec![128u8; 8 * 6 * 4]);
        let config = PostProcessingConfig::from(QUICK_BEAUTY);
        let processed = PostProcessor::process_blocking(&frame, &config).unwrap();
        assert_eq!(processed.image.dimensions(), (8, 6));
    }

    const QUICK_BEAUTY: FilterParams = FilterParams {
        saturation: 100.0,
        hue: 0.0,
        brightness: 100.0,
        beauty: 60.0,
    };
}
