// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! This module provides a trait-based abstraction over the capture device, the
//! live stream it hands out and the recorder that can be bound to that stream.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   Session (App)     │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraBackendManager│  ← Resolution negotiation, single live stream
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend Trait│  ← acquire(constraints) → MediaStream
//! └──────────┬──────────┘
//!            │
//!            ▼
//!     ┌──────────────┐
//!     │ VirtualCamera│  ← Synthetic device (CLI, tests)
//!     └──────────────┘
//! ```

pub mod manager;
pub mod types;

pub use manager::{CameraBackendManager, Negotiated};
pub use types::*;

use futures::future::BoxFuture;
use tokio::sync::mpsc;

/// Capture device
///
/// Acquisition is asynchronous: the returned future resolves once the device
/// has accepted or refused the constraints. There is no cancellation of an
/// in-flight acquisition.
pub trait CameraBackend: Send + Sync {
    /// Request a live stream satisfying the constraints
    fn acquire(&self, constraints: MediaConstraints) -> BoxFuture<'_, BackendResult<Box<dyn MediaStream>>>;

    /// Backend identifier for logs
    fn name(&self) -> &str;
}

/// A live capture stream
pub trait MediaStream: Send + Sync {
    /// Settings the device actually negotiated
    fn settings(&self) -> StreamSettings;

    /// Grab the current frame at the stream's native size
    fn grab_frame(&self) -> BackendResult<CameraFrame>;

    /// Create a recorder bound to this stream
    fn create_recorder(&self) -> BackendResult<Box<dyn MediaRecorder>>;

    /// Stop every track of the stream; idempotent
    fn stop(&mut self);

    /// Whether the tracks are still running
    fn is_live(&self) -> bool;
}

/// Chunked recorder bound to a stream
///
/// Chunks are delivered in order on the channel handed to `start`. The
/// recorder drops its sender once the final chunk has been flushed by `stop`.
pub trait MediaRecorder: Send {
    /// Begin recording, emitting chunks on `chunks`
    fn start(&mut self, chunks: mpsc::UnboundedSender<Vec<u8>>) -> BackendResult<()>;

    /// Stop recording and flush the final chunk
    fn stop(&mut self) -> BoxFuture<'_, BackendResult<()>>;

    /// MIME type of the produced container
    fn mime_type(&self) -> &str;
}
