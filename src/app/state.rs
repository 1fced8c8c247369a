// SPDX-License-Identifier: GPL-3.0-only

//! Session state machines

use crate::pipelines::video::VideoRecorder;

/// Recording state machine
///
/// Simple two-state design: either recording or not.
#[derive(Debug, Default)]
pub enum RecordingState {
    /// Not recording
    #[default]
    Idle,
    /// Actively recording
    Recording(VideoRecorder),
}

impl RecordingState {
    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        matches!(self, RecordingState::Recording(_))
    }

    /// Whole seconds since recording started, 0 when idle
    pub fn elapsed_secs(&self) -> u64 {
        match self {
            RecordingState::Idle => 0,
            RecordingState::Recording(recorder) => recorder.elapsed_secs(),
        }
    }

    /// Take the active recorder, leaving the state idle
    pub fn take(&mut self) -> Option<VideoRecorder> {
        match std::mem::take(self) {
            RecordingState::Idle => None,
            RecordingState::Recording(recorder) => Some(recorder),
        }
    }
}
