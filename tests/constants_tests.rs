// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use selfie_camera::backends::camera::Constraint;
use selfie_camera::constants::{
    DESKTOP_RESOLUTIONS, LIGHT_BUCKETS, MAX_PRESET_NAME_CHARS, MOBILE_RESOLUTIONS,
    format_elapsed, timing,
};
use std::time::Duration;

#[test]
fn test_desktop_resolutions_are_landscape_and_descending() {
    let widths: Vec<u32> = DESKTOP_RESOLUTIONS.iter().map(|c| c.width.target()).collect();
    assert_eq!(widths, vec![1920, 1280, 640]);
    assert!(
        DESKTOP_RESOLUTIONS
            .iter()
            .all(|c| c.width.target() > c.height.target())
    );
}

#[test]
fn test_mobile_resolutions_are_portrait_and_end_exact() {
    assert!(
        MOBILE_RESOLUTIONS
            .iter()
            .all(|c| c.height.target() > c.width.target())
    );
    let last = MOBILE_RESOLUTIONS[MOBILE_RESOLUTIONS.len() - 1];
    assert_eq!(last.width, Constraint::Exact(360));
    assert_eq!(last.height, Constraint::Exact(640));
}

#[test]
fn test_light_buckets_cover_every_reading() {
    let last = LIGHT_BUCKETS[LIGHT_BUCKETS.len() - 1];
    assert!(last.0.is_infinite());
    // Darker rooms get more brightness and more smoothing
    assert!(LIGHT_BUCKETS.windows(2).all(|w| w[0].1 > w[1].1 && w[0].2 > w[1].2));
}

#[test]
fn test_timing_defaults() {
    assert_eq!(timing::DEBOUNCE_DELAY, Duration::from_millis(100));
    assert_eq!(timing::AUTO_MODE_COOLDOWN, Duration::from_secs(5));
    assert_eq!(timing::RECORDING_TIMER_TICK, Duration::from_secs(1));
    assert_eq!(MAX_PRESET_NAME_CHARS, 10);
}

#[test]
fn test_format_elapsed() {
    assert_eq!(format_elapsed(0), "00:00");
    assert_eq!(format_elapsed(75), "01:15");
    assert_eq!(format_elapsed(600), "10:00");
}
