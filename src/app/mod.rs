// SPDX-License-Identifier: MPL-2.0

//! Selfie camera session
//!
//! One [`SelfieApp`] owns everything a page session holds: the live stream,
//! the filter state, auto-tune, presets and the recording in progress.
//! Operations are split across the handler modules by domain.
//!
//! # Architecture
//!
//! - `state`: Recording state machine
//! - `surfaces`: Notifier, download and preview sink seams
//! - `handlers`: Session operations (camera, color, auto-tune, presets, capture)
//! - `utils`: Input parsing and lock helpers
//!
//! ```text
//!                 ┌────────────── SelfieApp ──────────────┐
//!  CameraBackend ─┤ CameraBackendManager   RecordingState ├─▶ DownloadSink
//!  LightSensor ───┤ AutoTune ──▶ FilterStore ─────────────┼─▶ FilterSink
//!  KeyValueStore ─┤ PresetStore                           ├─▶ Notifier
//!                 └───────────────────────────────────────┘
//! ```

mod handlers;
mod state;
mod surfaces;
pub(crate) mod utils;

pub use state::RecordingState;
pub use surfaces::{DirectoryDownloads, DownloadSink, LogFilterSink, Notifier};
pub use utils::{parse_hex_color, parse_number};

use crate::auto_tune::AutoTune;
use crate::backends::camera::{CameraBackend, CameraBackendManager, DeviceClass, Negotiated};
use crate::backends::sensor::AmbientLightSensor;
use crate::config::Config;
use crate::constants::APP_DIR_NAME;
use crate::errors::CameraError;
use crate::filters::{FilterSink, FilterStore};
use crate::pipelines::photo::PhotoPipeline;
use crate::presets::PresetStore;
use crate::storage::KeyValueStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Directory photos and recordings are downloaded to
pub fn get_download_directory() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::picture_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// External collaborators of a session
pub struct Services {
    pub camera: Arc<dyn CameraBackend>,
    pub sensor: Box<dyn AmbientLightSensor>,
    pub store: Box<dyn KeyValueStore>,
    pub filter_sink: Arc<dyn FilterSink>,
    pub notifier: Arc<dyn Notifier>,
    pub downloads: Arc<dyn DownloadSink>,
}

/// A selfie camera page session
pub struct SelfieApp {
    config: Config,
    device_class: DeviceClass,
    camera: CameraBackendManager,
    filters: FilterStore,
    auto_tune: AutoTune,
    presets: PresetStore,
    recording: RecordingState,
    photo: PhotoPipeline,
    notifier: Arc<dyn Notifier>,
    downloads: Arc<dyn DownloadSink>,
    sensor: Box<dyn AmbientLightSensor>,
    sensor_task: Option<JoinHandle<()>>,
    viewport_width: Option<u32>,
    preview_width: Option<u32>,
}

impl SelfieApp {
    pub fn new(config: Config, services: Services) -> Self {
        let filters = FilterStore::new(services.filter_sink, config.debounce());
        if let Err(e) = filters.set_color(&config.background_color) {
            warn!(error = %e, "Ignoring configured background color");
        }
        let auto_tune = AutoTune::new(config.auto_mode_cooldown(), config.smoothing_factor);

        info!(
            device_class = %config.device_class,
            backend = services.camera.name(),
            "Session created"
        );
        Self {
            device_class: config.device_class,
            camera: CameraBackendManager::new(services.camera),
            filters,
            auto_tune,
            presets: PresetStore::new(services.store),
            recording: RecordingState::default(),
            photo: PhotoPipeline::new(),
            notifier: services.notifier,
            downloads: services.downloads,
            sensor: services.sensor,
            sensor_task: None,
            viewport_width: None,
            preview_width: None,
            config,
        }
    }

    /// Session start: open the camera and probe the light sensor
    ///
    /// A missing sensor only disables auto mode; the camera result is returned.
    pub async fn start(&mut self) -> Result<Negotiated, CameraError> {
        let opened = self.open_camera().await;
        match self.start_ambient_light() {
            Ok(()) => info!(auto_mode = true, "Session started"),
            Err(e) => info!(auto_mode = false, reason = %e, "Session started without auto mode"),
        }
        opened
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    pub fn camera(&self) -> &CameraBackendManager {
        &self.camera
    }

    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    pub fn auto_tune(&self) -> &AutoTune {
        &self.auto_tune
    }

    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_recording()
    }

    /// Whole seconds of the recording in progress
    pub fn recording_elapsed_secs(&self) -> u64 {
        self.recording.elapsed_secs()
    }

    /// On-screen preview width from the last open or resize
    pub fn preview_width(&self) -> Option<u32> {
        self.preview_width
    }
}

impl Drop for SelfieApp {
    fn drop(&mut self) {
        if let Some(task) = self.sensor_task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for SelfieApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelfieApp")
            .field("device_class", &self.device_class)
            .field("camera", &self.camera)
            .field("filters", &self.filters)
            .field("recording", &self.recording)
            .finish()
    }
}
