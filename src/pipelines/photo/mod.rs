// SPDX-License-Identifier: MPL-2.0

//! Async photo capture pipeline
//!
//! ```text
//! Live stream → Capture → Filter bake → PNG encoding → Download
//!       ↓
//! Preview continues uninterrupted
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Capture**: Grab the current frame at the stream's native size
//! 2. **Filter bake**: Render the current filter chain into the pixels
//! 3. **Encoding**: PNG
//! 4. **Download**: Hand the bytes to the download sink under a timestamped name

pub mod capture;
pub mod encoding;
pub mod processing;

pub use capture::PhotoCapture;
pub use encoding::{EncodedImage, PhotoEncoder, recording_filename, snapshot_filename};
pub use processing::{PostProcessingConfig, PostProcessor};

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use crate::filters::FilterParams;
use std::sync::Arc;

/// Snapshot ready for download
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub filename: String,
    pub encoded: EncodedImage,
}

/// Complete photo pipeline
///
/// Orchestrates the bake → encode → name workflow for one captured frame.
#[derive(Debug, Default)]
pub struct PhotoPipeline {
    encoder: PhotoEncoder,
}

impl PhotoPipeline {
    pub fn new() -> Self {
        Self {
            encoder: PhotoEncoder::new(),
        }
    }

    /// Bake `params` into `frame`, encode it and name the result
    pub async fn process(
        &self,
        frame: Arc<CameraFrame>,
        params: FilterParams,
    ) -> Result<Snapshot, PhotoError> {
        // Stage 1: Filter bake (blocking pool)
        let processed = PostProcessor::new(params.into()).process(frame).await?;

        // Stage 2: Encode (blocking pool)
        let encoded = self.encoder.encode(processed).await?;

        Ok(Snapshot {
            filename: snapshot_filename(chrono::Local::now().naive_local()),
            encoded,
        })
    }
}
