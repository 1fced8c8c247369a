// SPDX-License-Identifier: GPL-3.0-only

//! Camera lifecycle handlers
//!
//! Handles opening, closing and toggling the camera, and preview sizing.

use crate::app::SelfieApp;
use crate::backends::camera::{CameraBackendManager, Negotiated};
use crate::errors::CameraError;
use tracing::{error, info, warn};

impl SelfieApp {
    // =========================================================================
    // Camera Lifecycle Handlers
    // =========================================================================

    /// Negotiate a stream for this device class and bind it to the session
    ///
    /// Any previous stream is stopped first. A recording in progress on the
    /// old stream is finished and downloaded before the stream goes away.
    pub async fn open_camera(&mut self) -> Result<Negotiated, CameraError> {
        if self.recording.is_recording() {
            warn!("Camera reopened while recording, finishing the recording first");
            if let Err(e) = self.stop_recording().await {
                warn!(error = %e, "Recording could not be finished");
            }
        }

        match self.camera.acquire(self.device_class).await {
            Ok(negotiated) => {
                info!(
                    settings = %negotiated.settings,
                    attempt = negotiated.attempt,
                    "Camera opened"
                );
                self.update_preview_width();
                self.notifier
                    .toast(&format!("Camera enabled at {}", negotiated.settings));
                Ok(negotiated)
            }
            Err(e) => {
                error!(error = %e, "Camera could not be opened");
                self.preview_width = None;
                self.notifier.alert(&format!("Unable to access the camera: {}", e));
                Err(e)
            }
        }
    }

    /// Stop the camera; returns whether a stream was open
    ///
    /// A recording in progress is finished first.
    pub async fn close_camera(&mut self) -> bool {
        if self.recording.is_recording()
            && let Err(e) = self.stop_recording().await
        {
            warn!(error = %e, "Recording could not be finished");
        }
        self.preview_width = None;
        let closed = self.camera.release();
        if closed {
            info!("Camera closed");
        }
        closed
    }

    /// Open the camera if closed, close it if open; returns whether it is now open
    pub async fn toggle_camera(&mut self) -> Result<bool, CameraError> {
        if self.camera.is_active() {
            self.close_camera().await;
            Ok(false)
        } else {
            self.open_camera().await.map(|_| true)
        }
    }

    /// Record a new viewport width and recompute the preview width
    pub fn resize(&mut self, viewport_width: u32) -> Option<u32> {
        self.viewport_width = Some(viewport_width);
        self.update_preview_width()
    }

    fn update_preview_width(&mut self) -> Option<u32> {
        let settings = self.camera.settings()?;
        let viewport = self.viewport_width.unwrap_or(settings.width.max(settings.height));
        let width = CameraBackendManager::preview_width(self.device_class, &settings, viewport);
        self.preview_width = Some(width);
        Some(width)
    }
}
