// SPDX-License-Identifier: MPL-2.0

//! Clip recording pipeline
//!
//! A recorder bound to the live stream delivers chunks in order; they are
//! collected in memory and concatenated into one blob when recording stops.
//! The preview keeps running while recording.

pub mod recorder;

pub use recorder::{FinishedRecording, RecordingTimer, VideoRecorder};
