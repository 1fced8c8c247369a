// SPDX-License-Identifier: MPL-2.0

//! Error types for the selfie camera
//!
//! Every failure in this crate is local to the page session: it ends up as a
//! toast or alert for the user plus a logged diagnostic. Nothing is retried
//! automatically; the only recovery path is the resolution fallback list in
//! the device negotiator.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Camera acquisition errors
    Camera(CameraError),
    /// Recording-related errors
    Recording(RecordingError),
    /// Photo capture errors
    Photo(PhotoError),
    /// Preset store errors
    Preset(PresetError),
    /// Ambient light sensor errors
    Sensor(SensorError),
    /// Rejected user input
    InvalidInput(String),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Every resolution candidate was refused by the device (device unavailable)
    NoSupportedResolution,
    /// A capture was attempted without an acquired stream
    NoActiveStream,
    /// Backend error reported while talking to the device
    BackendError(String),
}

/// Recording-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingError {
    /// Failed to start recording
    StartFailed(String),
    /// Failed to stop recording
    StopFailed(String),
    /// Recording already in progress
    AlreadyRecording,
    /// Stop requested while idle
    NotRecording,
    /// Recorder produced no data
    EmptyRecording,
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    /// No frame available for capture
    NoFrameAvailable,
    /// Frame buffer does not match its declared dimensions
    InvalidFrame(String),
    /// Encoding failed
    EncodingFailed(String),
    /// Save failed
    SaveFailed(String),
}

/// Preset store errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    /// Name is empty or longer than the allowed number of characters
    InvalidName(String),
    /// Color is not a `#rrggbb` hex value
    InvalidColor(String),
    /// A filter value is not a finite number
    InvalidValue(String),
    /// No preset stored under this name
    NotFound(String),
    /// Stored entry could not be decoded or failed validation
    Corrupt { key: String, reason: String },
    /// Underlying key-value store failed
    Storage(String),
}

/// Ambient light sensor errors (capability gaps, never fatal)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// No ambient light sensor on this host
    Unsupported,
    /// Sensor exists but access was denied
    PermissionDenied,
    /// Sensor failed to start
    StartFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Recording(e) => write!(f, "Recording error: {}", e),
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Preset(e) => write!(f, "Preset error: {}", e),
            AppError::Sensor(e) => write!(f, "Sensor error: {}", e),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoSupportedResolution => {
                write!(f, "No supported resolution found for this camera")
            }
            CameraError::NoActiveStream => write!(f, "Camera is not open"),
            CameraError::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl fmt::Display for RecordingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingError::StartFailed(msg) => write!(f, "Failed to start recording: {}", msg),
            RecordingError::StopFailed(msg) => write!(f, "Failed to stop recording: {}", msg),
            RecordingError::AlreadyRecording => write!(f, "Recording already in progress"),
            RecordingError::NotRecording => write!(f, "No recording in progress"),
            RecordingError::EmptyRecording => write!(f, "Recorder produced no data"),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::NoFrameAvailable => write!(f, "No frame available for capture"),
            PhotoError::InvalidFrame(msg) => write!(f, "Invalid frame: {}", msg),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            PhotoError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::InvalidName(name) => write!(f, "Invalid preset name: {:?}", name),
            PresetError::InvalidColor(color) => write!(f, "Invalid color: {:?}", color),
            PresetError::InvalidValue(msg) => write!(f, "Invalid filter value: {}", msg),
            PresetError::NotFound(name) => write!(f, "No preset named {:?}", name),
            PresetError::Corrupt { key, reason } => {
                write!(f, "Stored preset {} is unreadable: {}", key, reason)
            }
            PresetError::Storage(msg) => write!(f, "Preset storage failed: {}", msg),
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Unsupported => write!(f, "Ambient light sensor not supported"),
            SensorError::PermissionDenied => write!(f, "Ambient light sensor permission denied"),
            SensorError::StartFailed(msg) => write!(f, "Ambient light sensor failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for RecordingError {}
impl std::error::Error for PhotoError {}
impl std::error::Error for PresetError {}
impl std::error::Error for SensorError {}

// Conversions from sub-errors to AppError
impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<RecordingError> for AppError {
    fn from(err: RecordingError) -> Self {
        AppError::Recording(err)
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<PresetError> for AppError {
    fn from(err: PresetError) -> Self {
        AppError::Preset(err)
    }
}

impl From<SensorError> for AppError {
    fn from(err: SensorError) -> Self {
        AppError::Sensor(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

// Conversions for I/O errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for PhotoError {
    fn from(err: std::io::Error) -> Self {
        PhotoError::SaveFailed(err.to_string())
    }
}

impl From<crate::storage::StorageError> for PresetError {
    fn from(err: crate::storage::StorageError) -> Self {
        PresetError::Storage(err.to_string())
    }
}
