// SPDX-License-Identifier: MPL-2.0

//! Ambient light auto-tune loop
//!
//! Each qualifying illuminance reading picks a (brightness, beauty) target from
//! a fixed lux bucket table and moves the current values a fraction of the way
//! there. Manual input always wins: any slider or number-input change silences
//! auto-tune for the cooldown window without switching auto mode off.
//!
//! ```text
//! lux ──▶ bucket ──▶ target ──▶ smooth(current, target) ──▶ debounced apply
//!                                   ▲
//!              cooldown gate ───────┘ (last manual adjustment)
//! ```

use crate::app::utils::lock;
use crate::constants::{LIGHT_BUCKETS, SMOOTHING_FACTOR, timing};
use crate::errors::SensorError;
use crate::filters::{FilterParams, FilterStore};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Target values for a lighting condition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightTarget {
    pub brightness: f64,
    pub beauty: f64,
}

/// Map an illuminance reading to its bucket's target
pub fn light_target(lux: f64) -> LightTarget {
    let (_, brightness, beauty) = LIGHT_BUCKETS
        .iter()
        .copied()
        .find(|(upper, _, _)| lux < *upper)
        .unwrap_or(LIGHT_BUCKETS[LIGHT_BUCKETS.len() - 1]);
    LightTarget { brightness, beauty }
}

/// Move `current` a `factor` fraction of the remaining distance toward `target`
pub fn smooth(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Auto mode flags and the manual override timestamp
#[derive(Debug, Clone)]
pub struct AutoTuneState {
    /// Auto mode switched on by the user
    pub enabled: bool,
    /// A sensor is delivering readings
    pub available: bool,
    /// Most recent manual slider or number-input change
    pub last_manual_adjust: Option<Instant>,
    pub cooldown: Duration,
    pub smoothing: f64,
}

impl AutoTuneState {
    /// Whether a manual adjustment happened within the cooldown window
    pub fn in_cooldown(&self, now: Instant) -> bool {
        self.last_manual_adjust
            .is_some_and(|at| now.saturating_duration_since(at) < self.cooldown)
    }

    /// Whether a reading arriving at `now` may change the parameters
    pub fn accepts_reading(&self, now: Instant) -> bool {
        self.enabled && !self.in_cooldown(now)
    }
}

/// Shared handle to the auto-tune state
///
/// Cloning yields another handle to the same state, so the sensor task and
/// the session see the same cooldown.
#[derive(Debug, Clone)]
pub struct AutoTune {
    state: Arc<Mutex<AutoTuneState>>,
}

impl AutoTune {
    pub fn new(cooldown: Duration, smoothing: f64) -> Self {
        Self {
            state: Arc::new(Mutex::new(AutoTuneState {
                enabled: false,
                available: false,
                last_manual_adjust: None,
                cooldown,
                smoothing,
            })),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AutoTuneState {
        lock(&self.state).clone()
    }

    pub fn is_enabled(&self) -> bool {
        lock(&self.state).enabled
    }

    pub fn is_available(&self) -> bool {
        lock(&self.state).available
    }

    /// Mark the sensor as present or missing
    ///
    /// Losing the sensor also switches auto mode off.
    pub fn set_available(&self, available: bool) {
        let mut state = lock(&self.state);
        state.available = available;
        if !available {
            state.enabled = false;
        }
    }

    /// Switch auto mode on or off
    ///
    /// Switching on without a sensor is rejected.
    pub fn set_enabled(&self, enabled: bool) -> Result<bool, SensorError> {
        let mut state = lock(&self.state);
        if enabled && !state.available {
            return Err(SensorError::Unsupported);
        }
        state.enabled = enabled;
        info!(enabled, "Auto mode changed");
        Ok(enabled)
    }

    /// Flip auto mode, returning the new setting
    pub fn toggle(&self) -> Result<bool, SensorError> {
        let enabled = self.is_enabled();
        self.set_enabled(!enabled)
    }

    /// Record a manual adjustment, re-arming the cooldown
    pub fn record_manual_adjust(&self) {
        lock(&self.state).last_manual_adjust = Some(Instant::now());
    }

    pub fn last_manual_adjust(&self) -> Option<Instant> {
        lock(&self.state).last_manual_adjust
    }

    /// Feed one illuminance reading into the loop
    ///
    /// Returns the new parameters when the reading was applied, `None` when
    /// auto mode is off or a manual adjustment is still cooling down.
    pub fn handle_reading(&self, lux: f64, filters: &FilterStore) -> Option<FilterParams> {
        let (accepts, smoothing) = {
            let state = lock(&self.state);
            (state.accepts_reading(Instant::now()), state.smoothing)
        };
        if !accepts {
            debug!(lux, "Light reading ignored");
            return None;
        }

        let target = light_target(lux);
        let params = filters.update_params(|p| {
            p.brightness = smooth(p.brightness, target.brightness, smoothing);
            p.beauty = smooth(p.beauty, target.beauty, smoothing);
        });
        debug!(
            lux,
            target_brightness = target.brightness,
            target_beauty = target.beauty,
            brightness = params.brightness,
            beauty = params.beauty,
            "Auto-tune step"
        );
        filters.apply_filters(false);
        Some(params)
    }
}

impl Default for AutoTune {
    fn default() -> Self {
        Self::new(timing::AUTO_MODE_COOLDOWN, SMOOTHING_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_target_buckets() {
        assert_eq!(light_target(0.0), LightTarget { brightness: 150.0, beauty: 80.0 });
        assert_eq!(light_target(49.9), LightTarget { brightness: 150.0, beauty: 80.0 });
        assert_eq!(light_target(50.0), LightTarget { brightness: 120.0, beauty: 60.0 });
        assert_eq!(light_target(199.0), LightTarget { brightness: 120.0, beauty: 60.0 });
        assert_eq!(light_target(200.0), LightTarget { brightness: 100.0, beauty: 40.0 });
        assert_eq!(light_target(1000.0), LightTarget { brightness: 80.0, beauty: 20.0 });
        assert_eq!(light_target(100_000.0), LightTarget { brightness: 80.0, beauty: 20.0 });
    }

    #[test]
    fn test_smooth_moves_thirty_percent() {
        assert_eq!(smooth(100.0, 150.0, 0.3), 115.0);
        assert_eq!(smooth(100.0, 80.0, 0.3), 94.0);
        assert_eq!(smooth(80.0, 80.0, 0.3), 80.0);
    }

    #[test]
    fn test_enable_requires_sensor() {
        let auto = AutoTune::default();
        assert_eq!(auto.set_enabled(true), Err(SensorError::Unsupported));

        auto.set_available(true);
        assert_eq!(auto.toggle(), Ok(true));

        auto.set_available(false);
        assert!(!auto.is_enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_window() {
        let auto = AutoTune::default();
        let mut state = auto.state();
        state.enabled = true;
        let now = Instant::now();
        assert!(state.accepts_reading(now));

        state.last_manual_adjust = Some(now);
        assert!(!state.accepts_reading(now + Duration::from_millis(4999)));
        assert!(state.accepts_reading(now + Duration::from_millis(5000)));
    }
}
