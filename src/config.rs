// SPDX-License-Identifier: GPL-3.0-only

//! Persistent settings
//!
//! Read from `<config_dir>/selfie-camera/config.json`. Missing keys take their
//! defaults; a missing or malformed file yields the default configuration.

use crate::backends::camera::DeviceClass;
use crate::constants::{APP_DIR_NAME, DEFAULT_BACKGROUND_COLOR, SMOOTHING_FACTOR, timing};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quiet period before a slider change is applied (ms)
    pub debounce_ms: u64,
    /// How long manual input silences auto-tune (ms)
    pub auto_mode_cooldown_ms: u64,
    /// Fraction of the remaining distance covered per light reading
    pub smoothing_factor: f64,
    /// Resolution table to negotiate with
    pub device_class: DeviceClass,
    /// Initial page background color
    pub background_color: String,
    /// Where photos and recordings are written; user download dir when unset
    pub download_dir: Option<PathBuf>,
    /// Preset store file; `<data_dir>/selfie-camera/storage.json` when unset
    pub store_path: Option<PathBuf>,
    /// Whether the ambient light sensor may be read
    pub allow_ambient_light: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: timing::DEBOUNCE_DELAY.as_millis() as u64,
            auto_mode_cooldown_ms: timing::AUTO_MODE_COOLDOWN.as_millis() as u64,
            smoothing_factor: SMOOTHING_FACTOR,
            device_class: DeviceClass::default(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            download_dir: None,
            store_path: None,
            allow_ambient_light: true,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory on this system, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults when absent or malformed
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read config, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str::<Config>(&contents) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded config");
                config.sanitized()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed config, using defaults");
                Self::default()
            }
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Replace out-of-range values with their defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            warn!(
                smoothing_factor = self.smoothing_factor,
                "Smoothing factor out of range, using default"
            );
            self.smoothing_factor = defaults.smoothing_factor;
        }
        match crate::app::utils::parse_hex_color(&self.background_color) {
            Some(color) => self.background_color = color,
            None => {
                warn!(color = %self.background_color, "Invalid background color, using default");
                self.background_color = defaults.background_color;
            }
        }
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn auto_mode_cooldown(&self) -> Duration {
        Duration::from_millis(self.auto_mode_cooldown_ms)
    }

    /// `<config_dir>/selfie-camera/config.json`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.json"))
    }

    /// Directory downloads are written to
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(crate::app::get_download_directory)
    }

    /// Preset store file
    pub fn store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME)
                .join("storage.json")
        })
    }
}
