// SPDX-License-Identifier: GPL-3.0-only

//! Photo encoding and download file naming
//!
//! Snapshots are always PNG. File names carry a local timestamp so that
//! repeated captures sort chronologically in the download directory.

use super::processing::ProcessedImage;
use crate::errors::PhotoError;
use chrono::NaiveDateTime;
use image::RgbaImage;
use tracing::{debug, info};

/// Timestamp layout shared by snapshot and recording names
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Encoded image data ready for download
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

/// PNG encoder
#[derive(Debug, Default, Clone, Copy)]
pub struct PhotoEncoder;

impl PhotoEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode a processed image on the blocking pool
    pub async fn encode(&self, processed: ProcessedImage) -> Result<EncodedImage, PhotoError> {
        info!(
            width = processed.width,
            height = processed.height,
            "Starting encoding"
        );

        tokio::task::spawn_blocking(move || {
            let data = Self::encode_png(&processed.image)?;
            debug!(size = data.len(), "Encoding complete");
            Ok::<_, PhotoError>(EncodedImage {
                data,
                width: processed.width,
                height: processed.height,
            })
        })
        .await
        .map_err(|e| PhotoError::EncodingFailed(format!("Encoding task error: {}", e)))?
    }

    /// Encode image as PNG
    pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, PhotoError> {
        let mut buffer = Vec::new();

        image
            .write_to(
                &mut std::io::Cursor::new(&mut buffer),
                image::ImageFormat::Png,
            )
            .map_err(|e| PhotoError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

        Ok(buffer)
    }
}

/// `selfie_YYYYMMDD_HHMMSS.png`
pub fn snapshot_filename(at: NaiveDateTime) -> String {
    format!("selfie_{}.png", at.format(FILENAME_TIMESTAMP_FORMAT))
}

/// `recording_YYYYMMDD_HHMMSS_{secs}s.{extension}`
pub fn recording_filename(at: NaiveDateTime, elapsed_secs: u64, extension: &str) -> String {
    format!(
        "recording_{}_{}s.{}",
        at.format(FILENAME_TIMESTAMP_FORMAT),
        elapsed_secs,
        extension
    )
}

/// File extension for a recorder MIME type
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime.split(';').next().map(str::trim) {
        Some("video/mp4") => "mp4",
        Some("video/x-matroska") => "mkv",
        _ => "webm",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 2)
            .unwrap()
    }

    #[test]
    fn test_snapshot_filename() {
        assert_eq!(snapshot_filename(at()), "selfie_20240307_090502.png");
    }

    #[test]
    fn test_recording_filename() {
        assert_eq!(
            recording_filename(at(), 12, "webm"),
            "recording_20240307_090502_12s.webm"
        );
    }

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime("video/webm;codecs=vp9"), "webm");
        assert_eq!(extension_for_mime("video/mp4"), "mp4");
    }

    #[test]
    fn test_encode_png_signature() {
        let image = RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
        let data = PhotoEncoder::encode_png(&image).unwrap();
        assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n");
    }
}
