// SPDX-License-Identifier: MPL-2.0

//! Selfie Camera - capture, filter and record selfies
//!
//! This library provides the core of a selfie camera: camera negotiation with
//! resolution fallback, a debounced cosmetic filter chain, ambient-light
//! auto-tune, named filter presets and photo/clip capture.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: The page session and its operation handlers
//! - [`backends`]: Camera, recorder and light sensor abstraction
//! - [`filters`]: Filter parameters, quick filters and debounced apply
//! - [`auto_tune`]: Ambient light driven brightness/beauty adjustment
//! - [`presets`]: Named presets over a key-value store
//! - [`pipelines`]: Photo and video capture pipelines
//! - [`config`]: User configuration handling
//! - [`storage`]: Local key-value storage
//!
//! # Example
//!
//! ```ignore
//! let mut app = SelfieApp::new(Config::load(), services);
//! app.start().await?;
//! app.apply_quick_filter(QuickFilter::Pink);
//! let path = app.take_snapshot().await?;
//! ```

pub mod app;
pub mod auto_tune;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filters;
pub mod pipelines;
pub mod presets;
pub mod storage;

// Re-export commonly used types
pub use app::{DirectoryDownloads, DownloadSink, LogFilterSink, Notifier, SelfieApp, Services};
pub use backends::camera::{CameraBackend, DeviceClass, StreamSettings};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use filters::{FilterKind, FilterParams, FilterSink, QuickFilter};
pub use presets::{Preset, PresetStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
