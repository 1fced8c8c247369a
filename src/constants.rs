// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use crate::backends::camera::types::{Constraint, ResolutionCandidate};
use std::time::Duration;

/// Directory name under the user's config, data and download directories
pub const APP_DIR_NAME: &str = "selfie-camera";

/// Desktop resolution candidates, most preferred first (16:9, 16:9, 4:3)
pub const DESKTOP_RESOLUTIONS: [ResolutionCandidate; 3] = [
    ResolutionCandidate::new(Constraint::Ideal(1920), Constraint::Ideal(1080)),
    ResolutionCandidate::new(Constraint::Ideal(1280), Constraint::Ideal(720)),
    ResolutionCandidate::new(Constraint::Ideal(640), Constraint::Ideal(480)),
];

/// Mobile resolution candidates, portrait, most preferred first (9:16, 3:4, 9:16)
pub const MOBILE_RESOLUTIONS: [ResolutionCandidate; 3] = [
    ResolutionCandidate::new(Constraint::Ideal(720), Constraint::Ideal(1280)),
    ResolutionCandidate::new(Constraint::Ideal(480), Constraint::Ideal(640)),
    ResolutionCandidate::new(Constraint::Exact(360), Constraint::Exact(640)),
];

/// Ambient light buckets: (upper lux bound, target brightness %, target beauty %)
///
/// The last bucket has no upper bound.
/// - below 50 lux: dark room, evening indoors
/// - 50-200: ordinary indoor lighting
/// - 200-1000: bright indoors or overcast
/// - 1000 and above: direct daylight
pub const LIGHT_BUCKETS: [(f64, f64, f64); 4] = [
    (50.0, 150.0, 80.0),
    (200.0, 120.0, 60.0),
    (1000.0, 100.0, 40.0),
    (f64::INFINITY, 80.0, 20.0),
];

/// Fraction of the remaining distance covered per ambient light reading
pub const SMOOTHING_FACTOR: f64 = 0.3;

/// Preset key prefix in the local key-value store
pub const PRESET_KEY_PREFIX: &str = "filter_";

/// Maximum preset name length in characters
pub const MAX_PRESET_NAME_CHARS: usize = 10;

/// Current on-disk preset schema version
pub const PRESET_SCHEMA_VERSION: u32 = 1;

/// Default background color behind the preview
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffb6c1";

/// Beauty filter contrast gain per unit of beauty
pub const BEAUTY_CONTRAST_GAIN: f64 = 0.3;

/// Beauty filter blur radius in pixels per unit of beauty
pub const BEAUTY_BLUR_PX: f64 = 0.8;

/// Timing constants
pub mod timing {
    use super::Duration;

    /// Debounce window coalescing slider drags into one filter write
    pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(100);

    /// Manual adjustments silence auto-tune for this long
    pub const AUTO_MODE_COOLDOWN: Duration = Duration::from_millis(5000);

    /// Recording timer tick
    pub const RECORDING_TIMER_TICK: Duration = Duration::from_secs(1);
}

/// UI Constants
pub mod ui {
    /// Horizontal margin subtracted from the viewport on desktop previews
    pub const DESKTOP_PREVIEW_MARGIN_PX: u32 = 40;
}

/// Virtual device constants
pub mod virtual_camera {
    use super::Duration;

    /// Modes offered by the default virtual camera (landscape webcam modes)
    pub const DEFAULT_MODES: &[(u32, u32)] = &[(1920, 1080), (1280, 720), (640, 480)];

    /// Interval between recorder chunks
    pub const CHUNK_INTERVAL: Duration = Duration::from_secs(1);

    /// Interval between virtual ambient light readings
    pub const SENSOR_INTERVAL: Duration = Duration::from_millis(500);

    /// Device label reported in stream settings
    pub const DEVICE_LABEL: &str = "Virtual Selfie Camera";
}

/// Format an elapsed recording duration as `MM:SS`
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
