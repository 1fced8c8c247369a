// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend lifecycle manager
//!
//! The manager provides:
//! - Resolution negotiation against an ordered fallback list
//! - Ownership of the single live stream of the session

use super::types::*;
use super::{CameraBackend, MediaStream};
use crate::constants::{DESKTOP_RESOLUTIONS, MOBILE_RESOLUTIONS, ui};
use crate::errors::CameraError;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Outcome of a successful negotiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
    /// Candidate that the device accepted
    pub candidate: ResolutionCandidate,
    /// Zero-based position of that candidate in the fallback list
    pub attempt: usize,
    /// Settings the device actually delivered
    pub settings: StreamSettings,
}

/// Resolution candidate table for a device class
pub fn candidates_for(class: DeviceClass) -> &'static [ResolutionCandidate] {
    match class {
        DeviceClass::Mobile => &MOBILE_RESOLUTIONS,
        DeviceClass::Desktop => &DESKTOP_RESOLUTIONS,
    }
}

/// Camera backend manager
///
/// Holds at most one live stream. Every acquisition releases the previous
/// stream before requesting a new one.
pub struct CameraBackendManager {
    backend: Arc<dyn CameraBackend>,
    active: Option<Box<dyn MediaStream>>,
}

impl CameraBackendManager {
    /// Create a new backend manager
    pub fn new(backend: Arc<dyn CameraBackend>) -> Self {
        info!(backend = backend.name(), "Creating camera backend manager");
        Self {
            backend,
            active: None,
        }
    }

    /// Negotiate a stream using the candidate table of `class`
    pub async fn acquire(&mut self, class: DeviceClass) -> Result<Negotiated, CameraError> {
        debug!(device_class = %class, "Negotiating camera stream");
        self.acquire_from(candidates_for(class)).await
    }

    /// Negotiate a stream against an explicit candidate list
    ///
    /// Candidates are tried in order and each attempt runs to completion before
    /// the next one starts. The first success wins.
    pub async fn acquire_from(
        &mut self,
        candidates: &[ResolutionCandidate],
    ) -> Result<Negotiated, CameraError> {
        self.release();

        for (attempt, candidate) in candidates.iter().enumerate() {
            let constraints = MediaConstraints::user_facing(candidate);

            match self.backend.acquire(constraints).await {
                Ok(stream) => {
                    let settings = stream.settings();
                    info!(
                        candidate = %candidate,
                        attempt,
                        width = settings.width,
                        height = settings.height,
                        device = %settings.device_label,
                        "Camera stream acquired"
                    );
                    self.active = Some(stream);
                    return Ok(Negotiated {
                        candidate: *candidate,
                        attempt,
                        settings,
                    });
                }
                Err(e) => {
                    warn!(candidate = %candidate, attempt, error = %e, "Resolution candidate refused");
                }
            }
        }

        error!(
            candidates = candidates.len(),
            "No resolution candidate accepted by camera"
        );
        Err(CameraError::NoSupportedResolution)
    }

    /// Stop and drop the active stream
    ///
    /// Returns whether a stream was active.
    pub fn release(&mut self) -> bool {
        match self.active.take() {
            Some(mut stream) => {
                info!(settings = %stream.settings(), "Releasing camera stream");
                stream.stop();
                true
            }
            None => false,
        }
    }

    /// The live stream, if any
    pub fn stream(&self) -> Option<&dyn MediaStream> {
        self.active.as_deref().filter(|stream| stream.is_live())
    }

    /// Live stream or `NoActiveStream`
    pub fn require_stream(&self) -> Result<&dyn MediaStream, CameraError> {
        self.stream().ok_or(CameraError::NoActiveStream)
    }

    /// Check if a stream is live
    pub fn is_active(&self) -> bool {
        self.stream().is_some()
    }

    /// Settings of the live stream
    pub fn settings(&self) -> Option<StreamSettings> {
        self.stream().map(|stream| stream.settings())
    }

    /// On-screen preview width for a viewport
    ///
    /// Mobile streams are shown in portrait, so the delivered height becomes
    /// the displayed width.
    pub fn preview_width(class: DeviceClass, settings: &StreamSettings, viewport_width: u32) -> u32 {
        match class {
            DeviceClass::Mobile => settings.height.min(viewport_width),
            DeviceClass::Desktop => settings
                .width
                .min(viewport_width.saturating_sub(ui::DESKTOP_PREVIEW_MARGIN_PX)),
        }
    }
}

impl Drop for CameraBackendManager {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for CameraBackendManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraBackendManager")
            .field("backend", &self.backend.name())
            .field("active", &self.settings())
            .finish()
    }
}
