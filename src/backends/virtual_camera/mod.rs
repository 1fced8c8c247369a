// SPDX-License-Identifier: GPL-3.0-only

//! Virtual camera backend
//!
//! A synthetic front-facing device that behaves like a real capture device at
//! the trait boundary: it refuses constraints it cannot satisfy, hands out
//! streams that must be stopped explicitly, renders a moving test pattern and
//! records into ordered chunks.
//!
//! ```text
//! acquire(constraints)
//!        │
//!        ▼
//! ┌──────────────────┐      ┌──────────────────┐
//! │  VirtualStream   │ ───▶ │ VirtualRecorder  │ ──▶ chunk channel
//! │  (test pattern)  │      │ (timesliced)     │
//! └──────────────────┘      └──────────────────┘
//! ```

mod recorder;

pub use recorder::{EBML_MAGIC, VirtualRecorder};

use crate::backends::camera::types::{
    BackendError, BackendResult, CameraFrame, FacingMode, MediaConstraints, StreamSettings,
};
use crate::backends::camera::{CameraBackend, MediaRecorder, MediaStream};
use crate::constants::virtual_camera as defaults;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Synthetic camera device
#[derive(Debug, Clone)]
pub struct VirtualCamera {
    /// Supported (width, height) modes
    modes: Vec<(u32, u32)>,
    label: String,
    chunk_interval: Duration,
    /// Streams acquired and not yet stopped
    live_streams: Arc<AtomicUsize>,
}

impl VirtualCamera {
    /// Create a virtual camera offering the given modes
    pub fn new(modes: impl Into<Vec<(u32, u32)>>) -> Self {
        Self {
            modes: modes.into(),
            label: defaults::DEVICE_LABEL.to_string(),
            chunk_interval: defaults::CHUNK_INTERVAL,
            live_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the recorder timeslice
    pub fn with_chunk_interval(mut self, interval: Duration) -> Self {
        self.chunk_interval = interval;
        self
    }

    /// Supported modes
    pub fn modes(&self) -> &[(u32, u32)] {
        &self.modes
    }

    /// Number of streams acquired and not yet stopped
    pub fn live_streams(&self) -> usize {
        self.live_streams.load(Ordering::SeqCst)
    }

    /// Pick the mode that satisfies the hard constraints and lies closest to
    /// the requested size
    pub fn select_mode(&self, constraints: &MediaConstraints) -> Option<(u32, u32)> {
        self.modes
            .iter()
            .copied()
            .filter(|&(w, h)| constraints.accepts(w, h))
            .min_by_key(|&(w, h)| constraints.width.distance(w) + constraints.height.distance(h))
    }
}

impl Default for VirtualCamera {
    fn default() -> Self {
        Self::new(defaults::DEFAULT_MODES.to_vec())
    }
}

impl CameraBackend for VirtualCamera {
    fn acquire(
        &self,
        constraints: MediaConstraints,
    ) -> BoxFuture<'_, BackendResult<Box<dyn MediaStream>>> {
        Box::pin(async move {
            let (width, height) = self.select_mode(&constraints).ok_or_else(|| {
                BackendError::ConstraintNotSatisfied(format!(
                    "no mode matches {}x{}",
                    constraints.width, constraints.height
                ))
            })?;

            let settings = StreamSettings {
                width,
                height,
                facing_mode: constraints.facing_mode,
                device_label: self.label.clone(),
            };
            let live = self.live_streams.fetch_add(1, Ordering::SeqCst) + 1;
            info!(width, height, live_streams = live, "Virtual camera stream started");

            Ok(Box::new(VirtualStream {
                settings,
                live: Arc::new(AtomicBool::new(true)),
                live_streams: Arc::clone(&self.live_streams),
                frame_counter: AtomicU64::new(0),
                chunk_interval: self.chunk_interval,
            }) as Box<dyn MediaStream>)
        })
    }

    fn name(&self) -> &str {
        "virtual"
    }
}

/// Live stream handed out by [`VirtualCamera`]
#[derive(Debug)]
pub struct VirtualStream {
    settings: StreamSettings,
    live: Arc<AtomicBool>,
    live_streams: Arc<AtomicUsize>,
    frame_counter: AtomicU64,
    chunk_interval: Duration,
}

impl MediaStream for VirtualStream {
    fn settings(&self) -> StreamSettings {
        self.settings.clone()
    }

    fn grab_frame(&self) -> BackendResult<CameraFrame> {
        if !self.is_live() {
            return Err(BackendError::StreamEnded);
        }
        let index = self.frame_counter.fetch_add(1, Ordering::Relaxed);
        let data = test_pattern(self.settings.width, self.settings.height, index);
        debug!(index, "Virtual frame rendered");
        Ok(CameraFrame::from_rgba(
            self.settings.width,
            self.settings.height,
            data,
        ))
    }

    fn create_recorder(&self) -> BackendResult<Box<dyn MediaRecorder>> {
        if !self.is_live() {
            return Err(BackendError::StreamEnded);
        }
        Ok(Box::new(VirtualRecorder::new(
            Arc::clone(&self.live),
            self.chunk_interval,
        )))
    }

    fn stop(&mut self) {
        if self.live.swap(false, Ordering::SeqCst) {
            self.live_streams.fetch_sub(1, Ordering::SeqCst);
            info!(settings = %self.settings, "Virtual camera stream stopped");
        }
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

impl Drop for VirtualStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Diagonal color gradient that drifts with the frame index
fn test_pattern(width: u32, height: u32, index: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    let shift = (index % 256) as u32;
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255 / width.max(1)) + shift) % 256;
            let g = y * 255 / height.max(1);
            let b = 255 - ((x + y) * 255 / (width + height).max(1));
            data.extend_from_slice(&[r as u8, g as u8, b as u8, 255]);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::types::Constraint;

    fn constraints(width: Constraint, height: Constraint) -> MediaConstraints {
        MediaConstraints {
            facing_mode: FacingMode::User,
            width,
            height,
        }
    }

    #[test]
    fn test_select_mode_prefers_closest_ideal() {
        let camera = VirtualCamera::default();
        let mode = camera.select_mode(&constraints(Constraint::Ideal(1300), Constraint::Ideal(700)));
        assert_eq!(mode, Some((1280, 720)));
    }

    #[test]
    fn test_select_mode_rejects_unmatched_exact() {
        let camera = VirtualCamera::default();
        let mode = camera.select_mode(&constraints(Constraint::Exact(360), Constraint::Exact(640)));
        assert_eq!(mode, None);
    }

    #[tokio::test]
    async fn test_stream_stop_is_idempotent() {
        let camera = VirtualCamera::default();
        let mut stream = camera
            .acquire(constraints(Constraint::Ideal(640), Constraint::Ideal(480)))
            .await
            .unwrap();
        assert_eq!(camera.live_streams(), 1);

        stream.stop();
        stream.stop();
        assert_eq!(camera.live_streams(), 0);
        assert_eq!(stream.grab_frame().unwrap_err(), BackendError::StreamEnded);
    }

    #[tokio::test]
    async fn test_frame_has_native_size() {
        let camera = VirtualCamera::new(vec![(64, 48)]);
        let stream = camera
            .acquire(constraints(Constraint::Ideal(1920), Constraint::Ideal(1080)))
            .await
            .unwrap();
        let frame = stream.grab_frame().unwrap();
        assert_eq!((frame.width, frame.height), (64, 48));
        assert_eq!(frame.data.len(), 64 * 48 * 4);
    }
}
