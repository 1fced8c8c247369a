// SPDX-License-Identifier: GPL-3.0-only

//! Named filter presets
//!
//! A preset is a snapshot of the four filter controls, the background color
//! and the selected quick filter, stored as JSON under `filter_<name>` in a
//! [`KeyValueStore`]. Saving under an existing name overwrites it.
//!
//! Entries written before the schema was versioned carry no `version` field
//! and store the numbers as strings; both shapes are read.

use crate::app::utils::{parse_hex_color, parse_number};
use crate::constants::{MAX_PRESET_NAME_CHARS, PRESET_KEY_PREFIX, PRESET_SCHEMA_VERSION};
use crate::errors::PresetError;
use crate::filters::{FilterParams, QuickFilter};
use crate::storage::KeyValueStore;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

/// Stored preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Schema version, 0 for unversioned entries
    #[serde(default)]
    pub version: u32,
    pub name: String,
    pub color: String,
    #[serde(deserialize_with = "number_or_string")]
    pub saturation: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub hue: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub brightness: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub beauty: f64,
    #[serde(rename = "filter", default, deserialize_with = "lenient_quick_filter")]
    pub quick_filter: Option<QuickFilter>,
}

impl Preset {
    pub fn new(
        name: &str,
        params: FilterParams,
        color: &str,
        quick_filter: Option<QuickFilter>,
    ) -> Self {
        Self {
            version: PRESET_SCHEMA_VERSION,
            name: name.to_string(),
            color: color.to_string(),
            saturation: params.saturation,
            hue: params.hue,
            brightness: params.brightness,
            beauty: params.beauty,
            quick_filter,
        }
    }

    /// Filter parameters, clamped to each control's range
    pub fn params(&self) -> FilterParams {
        FilterParams::new(self.saturation, self.hue, self.brightness, self.beauty)
    }

    /// Storage key for this preset
    pub fn key(&self) -> String {
        preset_key(&self.name)
    }

    /// Check the name, color and version; normalizes the color in place
    pub fn validate(&mut self) -> Result<(), PresetError> {
        validate_name(&self.name)?;
        for (field, value) in [
            ("saturation", self.saturation),
            ("hue", self.hue),
            ("brightness", self.brightness),
            ("beauty", self.beauty),
        ] {
            if !value.is_finite() {
                return Err(PresetError::InvalidValue(format!("{} = {}", field, value)));
            }
        }
        self.color = parse_hex_color(&self.color)
            .ok_or_else(|| PresetError::InvalidColor(self.color.clone()))?;
        if self.version > PRESET_SCHEMA_VERSION {
            return Err(PresetError::Corrupt {
                key: self.key(),
                reason: format!("unsupported schema version {}", self.version),
            });
        }
        Ok(())
    }
}

/// Storage key for a preset name
pub fn preset_key(name: &str) -> String {
    format!("{}{}", PRESET_KEY_PREFIX, name)
}

/// Check a preset name and return it trimmed
///
/// Names are limited to 10 characters; blank names are rejected.
pub fn validate_name(name: &str) -> Result<&str, PresetError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_PRESET_NAME_CHARS {
        return Err(PresetError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => parse_number(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("not a number: {:?}", text))),
    }
}

/// Unknown or empty quick filter ids read as no quick filter
fn lenient_quick_filter<'de, D>(deserializer: D) -> Result<Option<QuickFilter>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|id| id.parse().ok()))
}

/// Preset together with the key it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPreset {
    pub key: String,
    pub preset: Preset,
}

/// Preset CRUD over a key-value store
pub struct PresetStore {
    store: Box<dyn KeyValueStore>,
}

impl PresetStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Save the current settings under `name`, overwriting any preset of that name
    ///
    /// Nothing is written when the name, color or a value is rejected.
    pub fn save(
        &mut self,
        name: &str,
        params: FilterParams,
        color: &str,
        quick_filter: Option<QuickFilter>,
    ) -> Result<Preset, PresetError> {
        let name = validate_name(name)?;
        let mut preset = Preset::new(name, params, color, quick_filter);
        preset.validate()?;

        let json = serde_json::to_string(&preset).map_err(|e| PresetError::Corrupt {
            key: preset.key(),
            reason: e.to_string(),
        })?;
        self.store.set(&preset.key(), &json)?;
        info!(name = %preset.name, "Preset saved");
        Ok(preset)
    }

    /// All readable presets in storage order
    ///
    /// Unreadable entries are skipped.
    pub fn list(&self) -> Vec<StoredPreset> {
        self.store
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(PRESET_KEY_PREFIX))
            .filter_map(|key| match self.read(&key) {
                Ok(Some(preset)) => Some(StoredPreset { key, preset }),
                Ok(None) => None,
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping unreadable preset");
                    None
                }
            })
            .collect()
    }

    /// Read the preset stored under `key`
    pub fn get(&self, key: &str) -> Result<Option<Preset>, PresetError> {
        self.read(key)
    }

    /// Read the preset saved as `name`
    pub fn get_by_name(&self, name: &str) -> Result<Option<Preset>, PresetError> {
        self.read(&preset_key(name.trim()))
    }

    /// Delete the entry under `key`, returning whether it existed
    pub fn remove(&mut self, key: &str) -> Result<bool, PresetError> {
        if !self.store.contains(key) {
            debug!(key, "Preset already absent");
            return Ok(false);
        }
        self.store.remove(key)?;
        info!(key, "Preset deleted");
        Ok(true)
    }

    fn read(&self, key: &str) -> Result<Option<Preset>, PresetError> {
        let Some(raw) = self.store.get(key) else {
            return Ok(None);
        };
        let mut preset: Preset = serde_json::from_str(&raw).map_err(|e| PresetError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        preset.validate().map_err(|e| PresetError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(preset))
    }
}

impl std::fmt::Debug for PresetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetStore")
            .field("keys", &self.store.keys())
            .finish()
    }
}
