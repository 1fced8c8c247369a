// SPDX-License-Identifier: GPL-3.0-only

//! Filter control handlers
//!
//! Slider and number-input changes, quick filters and the background color.
//! Manual control changes re-arm the auto-tune cooldown.

use crate::app::SelfieApp;
use crate::app::utils::parse_number;
use crate::errors::{AppError, PresetError};
use crate::filters::{FilterKind, FilterParams, QuickFilter};
use tracing::{debug, warn};

impl SelfieApp {
    // =========================================================================
    // Filter Control Handlers
    // =========================================================================

    /// Slider input: clamp, store and schedule a debounced apply
    ///
    /// Returns the stored value.
    pub fn set_param(&mut self, kind: FilterKind, value: f64) -> f64 {
        self.auto_tune.record_manual_adjust();
        self.filters.set_param(kind, value)
    }

    /// Number-input change; text that is not a number is rejected unchanged
    pub fn set_param_text(&mut self, kind: FilterKind, text: &str) -> Result<f64, AppError> {
        let Some(value) = parse_number(text) else {
            warn!(control = kind.display_name(), input = text, "Rejected non-numeric input");
            return Err(AppError::InvalidInput(format!(
                "{} must be a number, got {:?}",
                kind.display_name(),
                text
            )));
        };
        Ok(self.set_param(kind, value))
    }

    /// Set all four controls from a quick filter and apply immediately
    pub fn apply_quick_filter(&mut self, quick: QuickFilter) -> FilterParams {
        let params = self.filters.apply_quick_filter(quick);
        self.notifier
            .toast(&format!("Applied {} filter", quick.display_name()));
        params
    }

    /// Change the page background color
    pub fn set_color(&mut self, color: &str) -> Result<String, PresetError> {
        let color = self.filters.set_color(color).inspect_err(|e| {
            warn!(error = %e, "Rejected background color");
        })?;
        debug!(color = %color, "Background color changed");
        Ok(color)
    }
}
