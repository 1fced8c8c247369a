// SPDX-License-Identifier: MPL-2.0

//! Ambient light sensor backends
//!
//! The sensor is optional hardware. A host without one, or one that denies
//! access, reports a [`SensorError`] from `start` and the session degrades by
//! disabling auto mode.

use crate::constants::virtual_camera::SENSOR_INTERVAL;
use crate::errors::SensorError;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Source of illuminance readings in lux
pub trait AmbientLightSensor: Send {
    /// Start sampling; readings arrive on the returned channel
    fn start(&mut self) -> Result<mpsc::Receiver<f64>, SensorError>;
}

/// Host without an ambient light sensor
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSensor;

impl AmbientLightSensor for UnavailableSensor {
    fn start(&mut self) -> Result<mpsc::Receiver<f64>, SensorError> {
        Err(SensorError::Unsupported)
    }
}

/// Sensor the user has refused access to
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedSensor;

impl AmbientLightSensor for DeniedSensor {
    fn start(&mut self) -> Result<mpsc::Receiver<f64>, SensorError> {
        Err(SensorError::PermissionDenied)
    }
}

/// Sensor replaying a fixed list of readings at a fixed interval
#[derive(Debug, Clone)]
pub struct VirtualLightSensor {
    readings: Vec<f64>,
    interval: Duration,
}

impl VirtualLightSensor {
    pub fn new(readings: impl Into<Vec<f64>>) -> Self {
        Self {
            readings: readings.into(),
            interval: SENSOR_INTERVAL,
        }
    }

    /// Set the time between readings
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl AmbientLightSensor for VirtualLightSensor {
    fn start(&mut self) -> Result<mpsc::Receiver<f64>, SensorError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SensorError::StartFailed(e.to_string()))?;
        let (sender, receiver) = mpsc::channel(16);
        let readings = self.readings.clone();
        let interval = self.interval;

        info!(readings = readings.len(), ?interval, "Virtual light sensor started");
        runtime.spawn(async move {
            for lux in readings {
                tokio::time::sleep(interval).await;
                debug!(lux, "Light reading");
                if sender.send(lux).await.is_err() {
                    break;
                }
            }
        });

        Ok(receiver)
    }
}
