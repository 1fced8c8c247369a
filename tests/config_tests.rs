// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use selfie_camera::{Config, DeviceClass};
use std::path::PathBuf;
use std::time::Duration;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("selfie-camera-config-{}", uuid::Uuid::new_v4()))
        .join(name)
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.debounce(), Duration::from_millis(100));
    assert_eq!(config.auto_mode_cooldown(), Duration::from_millis(5000));
    assert_eq!(config.smoothing_factor, 0.3);
    assert_eq!(config.background_color, "#ffb6c1");
    assert_eq!(config.device_class, DeviceClass::Desktop);
    assert!(config.download_dir.is_none());
    assert!(config.allow_ambient_light);
}

#[test]
fn test_missing_file_yields_defaults() {
    let config = Config::load_from(&temp_path("absent.json"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_malformed_file_yields_defaults() {
    let path = temp_path("config.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let path = temp_path("config.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"device_class": "mobile", "debounce_ms": 250}"#).unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.device_class, DeviceClass::Mobile);
    assert_eq!(config.debounce(), Duration::from_millis(250));
    assert_eq!(config.auto_mode_cooldown(), Duration::from_millis(5000));
    assert_eq!(config.background_color, "#ffb6c1");
}

#[test]
fn test_ambient_light_can_be_refused() {
    let path = temp_path("config.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"allow_ambient_light": false}"#).unwrap();

    let config = Config::load_from(&path);
    assert!(!config.allow_ambient_light);
    assert_eq!(config.debounce(), Duration::from_millis(100));
}

#[test]
fn test_out_of_range_values_are_replaced() {
    let path = temp_path("config.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        r#"{"smoothing_factor": 1.5, "background_color": "pink"}"#,
    )
    .unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.smoothing_factor, 0.3);
    assert_eq!(config.background_color, "#ffb6c1");
}

#[test]
fn test_save_then_load() {
    let path = temp_path("nested/config.json");
    let config = Config {
        device_class: DeviceClass::Mobile,
        background_color: "#336699".to_string(),
        download_dir: Some(PathBuf::from("/tmp/selfies")),
        ..Config::default()
    };

    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path), config);
}
