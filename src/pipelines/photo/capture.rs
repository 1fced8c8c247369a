// SPDX-License-Identifier: MPL-2.0

//! Photo capture from the live stream
//!
//! Grabs a single frame at the stream's native size without interrupting the
//! preview.

use crate::backends::camera::CameraBackendManager;
use crate::backends::camera::types::CameraFrame;
use crate::errors::{AppError, CameraError, PhotoError};
use std::sync::Arc;
use tracing::{debug, info};

/// Photo capture handler
pub struct PhotoCapture;

impl PhotoCapture {
    /// Capture the current frame of the session's stream
    ///
    /// Fails with `NoActiveStream` when the camera is closed.
    pub fn capture_from_backend(
        backend: &CameraBackendManager,
    ) -> Result<Arc<CameraFrame>, AppError> {
        let stream = backend.require_stream()?;
        info!("Capturing photo from camera stream");

        let frame = stream.grab_frame().map_err(|e| {
            debug!(error = %e, "Frame grab failed");
            CameraError::BackendError(e.to_string())
        })?;
        Self::capture_from_frame(frame).map_err(AppError::from)
    }

    /// Wrap an already grabbed frame, checking its buffer against its size
    pub fn capture_from_frame(frame: CameraFrame) -> Result<Arc<CameraFrame>, PhotoError> {
        if frame.width == 0 || frame.height == 0 {
            return Err(PhotoError::NoFrameAvailable);
        }
        if frame.packed_rgba().is_none() {
            return Err(PhotoError::InvalidFrame(format!(
                "{} bytes for {}x{} with stride {}",
                frame.data.len(),
                frame.width,
                frame.height,
                frame.stride
            )));
        }

        debug!(
            width = frame.width,
            height = frame.height,
            "Frame captured from stream"
        );
        Ok(Arc::new(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_camera::VirtualCamera;

    #[test]
    fn test_capture_from_frame() {
        let frame = CameraFrame::from_rgba(64, 48, vec![0u8; 64 * 48 * 4]);
        let captured = PhotoCapture::capture_from_frame(frame).unwrap();
        assert_eq!(captured.width, 64);
        assert_eq!(captured.height, 48);
    }

    #[test]
    fn test_capture_rejects_short_buffer() {
        let frame = CameraFrame::from_rgba(64, 48, vec![0u8; 100]);
        assert!(matches!(
            PhotoCapture::capture_from_frame(frame),
            Err(PhotoError::InvalidFrame(_))
        ));
    }

    #[test]
    fn test_capture_without_stream() {
        let manager = CameraBackendManager::new(Arc::new(VirtualCamera::default()));
        assert_eq!(
            PhotoCapture::capture_from_backend(&manager).unwrap_err(),
            AppError::Camera(CameraError::NoActiveStream)
        );
    }
}
