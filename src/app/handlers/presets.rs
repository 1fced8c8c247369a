// SPDX-License-Identifier: GPL-3.0-only

//! Preset handlers
//!
//! Save, list, load and delete named presets. Loading writes every stored
//! field back and applies the filter without debounce; deleting asks first.

use crate::app::SelfieApp;
use crate::constants::MAX_PRESET_NAME_CHARS;
use crate::errors::PresetError;
use crate::presets::{Preset, StoredPreset};
use tracing::{info, warn};

impl SelfieApp {
    // =========================================================================
    // Preset Handlers
    // =========================================================================

    /// Ask for a name and save the current settings under it
    ///
    /// Returns `Ok(None)` when the prompt is cancelled.
    pub fn save_preset_interactive(&mut self) -> Result<Option<Preset>, PresetError> {
        let prompt = format!("Preset name (up to {} characters):", MAX_PRESET_NAME_CHARS);
        match self.notifier.prompt(&prompt) {
            Some(name) => self.save_preset(&name).map(Some),
            None => Ok(None),
        }
    }

    /// Save the current controls, color and quick filter as `name`
    pub fn save_preset(&mut self, name: &str) -> Result<Preset, PresetError> {
        let result = self.presets.save(
            name,
            self.filters.params(),
            &self.filters.color(),
            self.filters.quick_filter(),
        );
        match &result {
            Ok(preset) => self.notifier.toast(&format!("Saved {} filter", preset.name)),
            Err(e) => {
                warn!(error = %e, "Preset not saved");
                self.notifier.toast(&e.to_string());
            }
        }
        result
    }

    /// Every readable preset, in storage order
    pub fn saved_presets(&self) -> Vec<StoredPreset> {
        self.presets.list()
    }

    /// Restore a preset and apply it immediately
    pub fn load_preset(&mut self, preset: &Preset) {
        self.filters.replace_params(preset.params());
        if let Err(e) = self.filters.set_color(&preset.color) {
            warn!(error = %e, "Preset color ignored");
        }
        self.filters.set_quick_filter(preset.quick_filter);
        self.filters.apply_filters(true);

        info!(name = %preset.name, "Preset loaded");
        self.notifier
            .toast(&format!("Applied {} filter", preset.name));
    }

    /// Look up a preset by name and load it
    pub fn load_preset_by_name(&mut self, name: &str) -> Result<Preset, PresetError> {
        let preset = self
            .presets
            .get_by_name(name)?
            .ok_or_else(|| PresetError::NotFound(name.to_string()))?;
        self.load_preset(&preset);
        Ok(preset)
    }

    /// Delete the preset under `key` after confirmation
    ///
    /// Returns whether it was deleted; declining leaves it in place.
    pub fn delete_preset(&mut self, key: &str) -> Result<bool, PresetError> {
        let name = match self.presets.get(key) {
            Ok(Some(preset)) => preset.name,
            Ok(None) => return Err(PresetError::NotFound(key.to_string())),
            // Unreadable entries can still be removed
            Err(_) => key.to_string(),
        };

        if !self
            .notifier
            .confirm(&format!("Delete the \"{}\" filter?", name))
        {
            info!(key, "Preset deletion declined");
            return Ok(false);
        }

        let removed = self.presets.remove(key)?;
        if removed {
            self.notifier.toast("Filter deleted");
        }
        Ok(removed)
    }
}
