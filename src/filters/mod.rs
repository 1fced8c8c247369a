// SPDX-License-Identifier: GPL-3.0-only

//! Filter parameters and the composited filter string
//!
//! Four numeric controls drive the preview filter. The CSS filter string is a
//! pure function of their values and is written to the preview surface through
//! a [`FilterSink`], either immediately or after a short debounce that
//! coalesces rapid slider drags into a single write.

mod debounce;

pub use debounce::Debouncer;

use crate::app::utils::{lock, parse_hex_color};
use crate::constants::{BEAUTY_BLUR_PX, BEAUTY_CONTRAST_GAIN, DEFAULT_BACKGROUND_COLOR};
use crate::errors::PresetError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// One of the four filter controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Saturation in percent
    Saturation,
    /// Hue rotation in degrees
    Hue,
    /// Brightness in percent
    Brightness,
    /// Beauty (soft blur plus contrast) in percent
    Beauty,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Saturation,
        FilterKind::Hue,
        FilterKind::Brightness,
        FilterKind::Beauty,
    ];

    /// Declared `[min, max]` of the control
    pub fn range(&self) -> (f64, f64) {
        match self {
            FilterKind::Saturation => (0.0, 200.0),
            FilterKind::Hue => (-180.0, 180.0),
            FilterKind::Brightness => (0.0, 200.0),
            FilterKind::Beauty => (0.0, 100.0),
        }
    }

    /// Value of the control on a fresh page
    pub fn default_value(&self) -> f64 {
        match self {
            FilterKind::Saturation | FilterKind::Brightness => 100.0,
            FilterKind::Hue | FilterKind::Beauty => 0.0,
        }
    }

    /// Clamp a value to the control's range
    ///
    /// NaN has no place in the range and resets the control to its default.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default_value();
        }
        let (min, max) = self.range();
        value.clamp(min, max)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FilterKind::Saturation => "Saturation",
            FilterKind::Hue => "Hue",
            FilterKind::Brightness => "Brightness",
            FilterKind::Beauty => "Beauty",
        }
    }
}

impl std::str::FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "saturation" | "sat" => Ok(FilterKind::Saturation),
            "hue" => Ok(FilterKind::Hue),
            "brightness" | "bright" => Ok(FilterKind::Brightness),
            "beauty" => Ok(FilterKind::Beauty),
            other => Err(format!("unknown filter control: {}", other)),
        }
    }
}

/// Current values of the four controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    pub saturation: f64,
    pub hue: f64,
    pub brightness: f64,
    pub beauty: f64,
}

impl FilterParams {
    /// Build parameters, clamping each value to its control's range
    pub fn new(saturation: f64, hue: f64, brightness: f64, beauty: f64) -> Self {
        Self {
            saturation: FilterKind::Saturation.clamp(saturation),
            hue: FilterKind::Hue.clamp(hue),
            brightness: FilterKind::Brightness.clamp(brightness),
            beauty: FilterKind::Beauty.clamp(beauty),
        }
    }

    pub fn get(&self, kind: FilterKind) -> f64 {
        match kind {
            FilterKind::Saturation => self.saturation,
            FilterKind::Hue => self.hue,
            FilterKind::Brightness => self.brightness,
            FilterKind::Beauty => self.beauty,
        }
    }

    /// Store a clamped value and return what was stored
    pub fn set(&mut self, kind: FilterKind, value: f64) -> f64 {
        let value = kind.clamp(value);
        match kind {
            FilterKind::Saturation => self.saturation = value,
            FilterKind::Hue => self.hue = value,
            FilterKind::Brightness => self.brightness = value,
            FilterKind::Beauty => self.beauty = value,
        }
        value
    }

    /// Composited CSS filter string
    ///
    /// `saturate(s) hue-rotate(hdeg) brightness(b) contrast(1+0.3*beauty) blur(0.8*beauty px)`
    /// where saturation, brightness and beauty are fractions of 100.
    pub fn css_filter(&self) -> String {
        let beauty = self.beauty / 100.0;
        format!(
            "saturate({}) hue-rotate({}deg) brightness({}) contrast({}) blur({}px)",
            self.saturation / 100.0,
            self.hue,
            self.brightness / 100.0,
            1.0 + beauty * BEAUTY_CONTRAST_GAIN,
            beauty * BEAUTY_BLUR_PX,
        )
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            saturation: FilterKind::Saturation.default_value(),
            hue: FilterKind::Hue.default_value(),
            brightness: FilterKind::Brightness.default_value(),
            beauty: FilterKind::Beauty.default_value(),
        }
    }
}

/// Built-in named parameter combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickFilter {
    /// Bare face
    Original,
    /// Soft pink
    Pink,
    /// Cool fair skin
    Cold,
    /// Energetic orange
    Orange,
    /// Faded retro
    Vintage,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 5] = [
        QuickFilter::Original,
        QuickFilter::Pink,
        QuickFilter::Cold,
        QuickFilter::Orange,
        QuickFilter::Vintage,
    ];

    /// Fixed parameter table
    pub fn params(&self) -> FilterParams {
        let (saturation, hue, brightness, beauty) = match self {
            QuickFilter::Original => (100.0, 0.0, 100.0, 20.0),
            QuickFilter::Pink => (140.0, -15.0, 110.0, 60.0),
            QuickFilter::Cold => (80.0, 10.0, 130.0, 40.0),
            QuickFilter::Orange => (160.0, 25.0, 110.0, 30.0),
            QuickFilter::Vintage => (60.0, 40.0, 90.0, 10.0),
        };
        FilterParams {
            saturation,
            hue,
            brightness,
            beauty,
        }
    }

    /// Identifier used in storage and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            QuickFilter::Original => "original",
            QuickFilter::Pink => "pink",
            QuickFilter::Cold => "cold",
            QuickFilter::Orange => "orange",
            QuickFilter::Vintage => "vintage",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            QuickFilter::Original => "Original",
            QuickFilter::Pink => "Pink",
            QuickFilter::Cold => "Cold",
            QuickFilter::Orange => "Orange",
            QuickFilter::Vintage => "Vintage",
        }
    }
}

impl std::str::FromStr for QuickFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuickFilter::ALL
            .into_iter()
            .find(|q| q.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown quick filter: {}", s))
    }
}

/// Preview surface receiving the composited filter string
pub trait FilterSink: Send + Sync {
    fn apply_filter(&self, css: &str);

    /// Page background behind the preview
    fn apply_background(&self, _color: &str) {}
}

/// Mutable filter state shared between the store and its debounce task
#[derive(Debug, Clone)]
struct FilterState {
    params: FilterParams,
    color: String,
    quick_filter: Option<QuickFilter>,
    last_applied: Option<String>,
}

/// Filter parameter store with debounced application
///
/// Cloning yields another handle to the same state.
#[derive(Clone)]
pub struct FilterStore {
    state: Arc<Mutex<FilterState>>,
    sink: Arc<dyn FilterSink>,
    debouncer: Arc<Debouncer>,
}

impl FilterStore {
    pub fn new(sink: Arc<dyn FilterSink>, debounce: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(FilterState {
                params: FilterParams::default(),
                color: DEFAULT_BACKGROUND_COLOR.to_string(),
                quick_filter: None,
                last_applied: None,
            })),
            sink,
            debouncer: Arc::new(Debouncer::new(debounce)),
        }
    }

    /// Current parameters
    pub fn params(&self) -> FilterParams {
        lock(&self.state).params
    }

    /// Current value of one control
    pub fn param(&self, kind: FilterKind) -> f64 {
        lock(&self.state).params.get(kind)
    }

    /// Clamp and store a value, then schedule a debounced apply
    ///
    /// Returns the stored value.
    pub fn set_param(&self, kind: FilterKind, value: f64) -> f64 {
        let stored = lock(&self.state).params.set(kind, value);
        debug!(control = kind.display_name(), requested = value, stored, "Filter control set");
        self.apply_filters(false);
        stored
    }

    /// Mutate the parameters in place without applying
    ///
    /// Values are re-clamped after the closure runs.
    pub fn update_params(&self, update: impl FnOnce(&mut FilterParams)) -> FilterParams {
        let mut state = lock(&self.state);
        update(&mut state.params);
        let p = state.params;
        state.params = FilterParams::new(p.saturation, p.hue, p.brightness, p.beauty);
        state.params
    }

    /// Replace all parameters without applying
    pub fn replace_params(&self, params: FilterParams) {
        lock(&self.state).params =
            FilterParams::new(params.saturation, params.hue, params.brightness, params.beauty);
    }

    /// Set all four parameters from the quick filter table and apply at once
    pub fn apply_quick_filter(&self, quick: QuickFilter) -> FilterParams {
        {
            let mut state = lock(&self.state);
            state.params = quick.params();
            state.quick_filter = Some(quick);
        }
        info!(filter = quick.id(), "Quick filter selected");
        self.apply_filters(true);
        quick.params()
    }

    /// Last selected quick filter
    pub fn quick_filter(&self) -> Option<QuickFilter> {
        lock(&self.state).quick_filter
    }

    pub fn set_quick_filter(&self, quick: Option<QuickFilter>) {
        lock(&self.state).quick_filter = quick;
    }

    /// Background color as `#rrggbb`
    pub fn color(&self) -> String {
        lock(&self.state).color.clone()
    }

    /// Validate and store a background color
    pub fn set_color(&self, color: &str) -> Result<String, PresetError> {
        let color =
            parse_hex_color(color).ok_or_else(|| PresetError::InvalidColor(color.to_string()))?;
        lock(&self.state).color = color.clone();
        self.sink.apply_background(&color);
        debug!(color = %color, "Background color set");
        Ok(color)
    }

    /// Current composited filter string
    pub fn css(&self) -> String {
        self.params().css_filter()
    }

    /// Write the filter string to the sink
    ///
    /// Immediate application cancels any pending debounced write. Otherwise
    /// the pending write is replaced by a new one after the debounce window.
    pub fn apply_filters(&self, immediate: bool) {
        if immediate {
            self.debouncer.cancel();
            write_filter(&self.state, self.sink.as_ref());
        } else {
            let state = Arc::clone(&self.state);
            let sink = Arc::clone(&self.sink);
            self.debouncer
                .schedule(move || write_filter(&state, sink.as_ref()));
        }
    }

    /// Whether a debounced write is waiting
    pub fn has_pending_apply(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Filter string most recently written to the sink
    pub fn last_applied(&self) -> Option<String> {
        lock(&self.state).last_applied.clone()
    }
}

impl std::fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("FilterStore")
            .field("params", &state.params)
            .field("color", &state.color)
            .field("quick_filter", &state.quick_filter)
            .finish()
    }
}

fn write_filter(state: &Mutex<FilterState>, sink: &dyn FilterSink) {
    let css = {
        let mut state = lock(state);
        let css = state.params.css_filter();
        state.last_applied = Some(css.clone());
        css
    };
    sink.apply_filter(&css);
}
