// SPDX-License-Identifier: GPL-3.0-only

//! Ambient light handlers
//!
//! Starts the light sensor, feeds its readings into the auto-tune loop and
//! handles the auto mode switch.

use crate::app::SelfieApp;
use crate::errors::SensorError;
use crate::filters::FilterParams;
use tracing::{info, warn};

impl SelfieApp {
    // =========================================================================
    // Ambient Light Handlers
    // =========================================================================

    /// Start the ambient light sensor and the task that samples it
    ///
    /// On failure auto mode is marked unavailable and the control disabled.
    /// When the sensor stops delivering readings auto mode becomes
    /// unavailable again.
    pub fn start_ambient_light(&mut self) -> Result<(), SensorError> {
        if let Some(task) = self.sensor_task.take() {
            task.abort();
        }

        let started = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => self.sensor.start().map(|readings| (runtime, readings)),
            Err(e) => Err(SensorError::StartFailed(format!("no async runtime: {}", e))),
        };
        let (runtime, mut readings) = match started {
            Ok(started) => started,
            Err(e) => {
                warn!(error = %e, "Ambient light unavailable, auto mode disabled");
                self.auto_tune.set_available(false);
                self.notifier.auto_mode_available(false);
                return Err(e);
            }
        };

        self.auto_tune.set_available(true);
        self.notifier.auto_mode_available(true);
        info!("Ambient light sensor started");

        let auto_tune = self.auto_tune.clone();
        let filters = self.filters.clone();
        let notifier = std::sync::Arc::clone(&self.notifier);
        self.sensor_task = Some(runtime.spawn(async move {
            while let Some(lux) = readings.recv().await {
                auto_tune.handle_reading(lux, &filters);
            }
            warn!("Ambient light sensor stopped");
            auto_tune.set_available(false);
            notifier.auto_mode_available(false);
        }));
        Ok(())
    }

    /// Flip auto mode; rejected while no sensor is available
    pub fn toggle_auto_mode(&mut self) -> Result<bool, SensorError> {
        match self.auto_tune.toggle() {
            Ok(enabled) => {
                let state = if enabled { "on" } else { "off" };
                self.notifier.toast(&format!("Auto mode {}", state));
                Ok(enabled)
            }
            Err(e) => {
                warn!(error = %e, "Auto mode unavailable");
                self.notifier.toast(&e.to_string());
                Err(e)
            }
        }
    }

    /// Feed one reading into the loop directly
    pub fn handle_light_reading(&self, lux: f64) -> Option<FilterParams> {
        self.auto_tune.handle_reading(lux, &self.filters)
    }
}
