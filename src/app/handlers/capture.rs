// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles snapshots and clip recording. Both require an open camera.

use crate::app::SelfieApp;
use crate::app::state::RecordingState;
use crate::constants::{format_elapsed, timing};
use crate::errors::{AppError, AppResult, PhotoError, RecordingError};
use crate::pipelines::photo::PhotoCapture;
use crate::pipelines::photo::encoding::{extension_for_mime, recording_filename};
use crate::pipelines::video::VideoRecorder;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

impl SelfieApp {
    // =========================================================================
    // Capture Operations Handlers
    // =========================================================================

    /// Capture the current frame with the filter baked in and download it
    pub async fn take_snapshot(&mut self) -> AppResult<PathBuf> {
        let result = self.snapshot_inner().await;
        match &result {
            Ok(path) => {
                info!(path = %path.display(), "Photo saved");
                self.notifier.toast("Photo saved");
            }
            Err(e) => {
                error!(error = %e, "Snapshot failed");
                self.notifier.toast(&e.to_string());
            }
        }
        result
    }

    async fn snapshot_inner(&mut self) -> AppResult<PathBuf> {
        let frame = PhotoCapture::capture_from_backend(&self.camera)?;
        let snapshot = self.photo.process(frame, self.filters.params()).await?;
        let path = self
            .downloads
            .save(
                &snapshot.filename,
                snapshot.encoded.mime_type(),
                &snapshot.encoded.data,
            )
            .map_err(PhotoError::from)?;
        Ok(path)
    }

    /// Start recording the live stream
    ///
    /// Rejected while a recording is already running or the camera is closed.
    pub fn start_recording(&mut self) -> AppResult<()> {
        let result = self.start_recording_inner();
        match &result {
            Ok(()) => self.notifier.toast("Recording started"),
            Err(e) => {
                error!(error = %e, "Recording failed to start");
                self.notifier.toast(&e.to_string());
            }
        }
        result
    }

    fn start_recording_inner(&mut self) -> AppResult<()> {
        if self.recording.is_recording() {
            return Err(RecordingError::AlreadyRecording.into());
        }
        let stream = self.camera.require_stream()?;

        let notifier = Arc::clone(&self.notifier);
        let recorder = VideoRecorder::start(stream, timing::RECORDING_TIMER_TICK, move |secs| {
            notifier.recording_timer(Some(&format_elapsed(secs)));
        })?;

        info!(id = %recorder.id(), "Recording session started");
        self.recording = RecordingState::Recording(recorder);
        self.notifier.recording_timer(Some(&format_elapsed(0)));
        Ok(())
    }

    /// Stop recording and download the clip
    pub async fn stop_recording(&mut self) -> AppResult<PathBuf> {
        let result = self.stop_recording_inner().await;
        match &result {
            Ok((path, elapsed_secs)) => {
                info!(path = %path.display(), elapsed_secs, "Recording saved");
                self.notifier.toast(&format!("Saved {}s recording", elapsed_secs));
            }
            Err(e) => {
                error!(error = %e, "Recording failed to stop");
                self.notifier.toast(&e.to_string());
            }
        }
        result.map(|(path, _)| path)
    }

    async fn stop_recording_inner(&mut self) -> AppResult<(PathBuf, u64)> {
        let recorder = self
            .recording
            .take()
            .ok_or(AppError::Recording(RecordingError::NotRecording))?;
        self.notifier.recording_timer(None);

        let finished = recorder.stop().await?;
        let filename = recording_filename(
            chrono::Local::now().naive_local(),
            finished.elapsed_secs,
            extension_for_mime(&finished.mime_type),
        );
        let path = self
            .downloads
            .save(&filename, &finished.mime_type, &finished.data)
            .map_err(|e| RecordingError::StopFailed(format!("saving {}: {}", filename, e)))?;

        info!(id = %finished.id, "Recording downloaded");
        Ok((path, finished.elapsed_secs))
    }

    /// Start or stop recording; returns the saved path when a recording ended
    pub async fn toggle_recording(&mut self) -> AppResult<Option<PathBuf>> {
        if self.recording.is_recording() {
            self.stop_recording().await.map(Some)
        } else {
            self.start_recording().map(|()| None)
        }
    }
}
