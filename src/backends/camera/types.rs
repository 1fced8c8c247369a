// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Device class used to pick the resolution candidate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Phones and tablets, portrait capture
    Mobile,
    /// Laptops and desktops, landscape capture
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classify a host from its user agent string
    ///
    /// Anything advertising itself as mobile or Android is treated as mobile.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if ua.contains("mobi") || ua.contains("android") {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceClass::Mobile => write!(f, "mobile"),
            DeviceClass::Desktop => write!(f, "desktop"),
        }
    }
}

/// Camera facing direction requested from the device
///
/// Only the front camera is ever requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FacingMode {
    /// Front camera, facing the user
    #[default]
    User,
}

/// A single dimension constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Device must deliver exactly this value
    Exact(u32),
    /// Device should deliver a value as close as possible to this one
    Ideal(u32),
    /// Device must deliver a value within `[min, max]`
    Range { min: u32, max: u32 },
}

impl Constraint {
    /// Whether a delivered value satisfies the hard part of this constraint
    ///
    /// Ideal constraints never reject a value.
    pub fn accepts(&self, value: u32) -> bool {
        match *self {
            Constraint::Exact(v) => value == v,
            Constraint::Ideal(_) => true,
            Constraint::Range { min, max } => (min..=max).contains(&value),
        }
    }

    /// The value this constraint is aiming for
    pub fn target(&self) -> u32 {
        match *self {
            Constraint::Exact(v) | Constraint::Ideal(v) => v,
            Constraint::Range { min, max } => min + (max - min) / 2,
        }
    }

    /// Distance of a delivered value from the target, used to rank modes
    pub fn distance(&self, value: u32) -> u32 {
        self.target().abs_diff(value)
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Exact(v) => write!(f, "={}", v),
            Constraint::Ideal(v) => write!(f, "~{}", v),
            Constraint::Range { min, max } => write!(f, "{}-{}", min, max),
        }
    }
}

/// One entry of the resolution fallback list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolutionCandidate {
    pub width: Constraint,
    pub height: Constraint,
}

impl ResolutionCandidate {
    pub const fn new(width: Constraint, height: Constraint) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for ResolutionCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Full request handed to a backend for one acquisition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub facing_mode: FacingMode,
    pub width: Constraint,
    pub height: Constraint,
}

impl MediaConstraints {
    /// Front-facing request for a resolution candidate
    pub fn user_facing(candidate: &ResolutionCandidate) -> Self {
        Self {
            facing_mode: FacingMode::User,
            width: candidate.width,
            height: candidate.height,
        }
    }

    /// Whether a device mode satisfies every hard constraint
    pub fn accepts(&self, width: u32, height: u32) -> bool {
        self.width.accepts(width) && self.height.accepts(height)
    }
}

/// Settings actually negotiated for a live stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSettings {
    pub width: u32,
    pub height: u32,
    pub facing_mode: FacingMode,
    /// Human readable device label
    pub device_label: String,
}

impl std::fmt::Display for StreamSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A single video frame in RGBA layout (4 bytes per pixel)
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
    /// Bytes per row, may include padding
    pub stride: u32,
    /// Timestamp when frame was captured
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Build a tightly packed RGBA frame
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data: Arc::from(data),
            stride: width * 4,
            captured_at: Instant::now(),
        }
    }

    /// Copy pixel rows into a packed buffer, dropping any stride padding
    pub fn packed_rgba(&self) -> Option<Vec<u8>> {
        let row_bytes = self.width as usize * 4;
        let stride = self.stride as usize;
        if stride < row_bytes || self.data.len() < stride * self.height as usize {
            return None;
        }
        if stride == row_bytes {
            return Some(self.data[..row_bytes * self.height as usize].to_vec());
        }
        let mut packed = Vec::with_capacity(row_bytes * self.height as usize);
        for row in self.data.chunks(stride).take(self.height as usize) {
            packed.extend_from_slice(&row[..row_bytes]);
        }
        Some(packed)
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Backend is not available on this system
    NotAvailable(String),
    /// No device mode satisfies the requested constraints
    ConstraintNotSatisfied(String),
    /// Stream has been stopped
    StreamEnded,
    /// Recording already in progress
    RecordingInProgress,
    /// No recording in progress
    NoRecordingInProgress,
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NotAvailable(msg) => write!(f, "Backend not available: {}", msg),
            BackendError::ConstraintNotSatisfied(msg) => {
                write!(f, "Constraint not satisfied: {}", msg)
            }
            BackendError::StreamEnded => write!(f, "Stream has ended"),
            BackendError::RecordingInProgress => write!(f, "Recording already in progress"),
            BackendError::NoRecordingInProgress => write!(f, "No recording in progress"),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}
