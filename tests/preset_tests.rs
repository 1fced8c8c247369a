// SPDX-License-Identifier: MPL-2.0

//! Preset save, load and delete through a session

mod common;

use common::{Harness, HarnessBuilder, harness};
use selfie_camera::errors::PresetError;
use selfie_camera::presets::preset_key;
use selfie_camera::{FileStore, FilterKind, FilterParams, KeyValueStore, MemoryStore, QuickFilter};

fn dial_in_warm(h: &mut Harness) {
    h.app.set_param(FilterKind::Saturation, 140.0);
    h.app.set_param(FilterKind::Hue, 10.0);
    h.app.set_param(FilterKind::Brightness, 110.0);
    h.app.set_param(FilterKind::Beauty, 50.0);
    h.app.set_color("#FFE4B5").unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_save_and_load_round_trip() {
    let mut h = harness();
    dial_in_warm(&mut h);

    let saved = h.app.save_preset("Warm").unwrap();
    assert_eq!(saved.color, "#ffe4b5");
    assert_eq!(h.notifier.toasts(), vec!["Saved Warm filter"]);

    h.app.apply_quick_filter(QuickFilter::Vintage);
    h.app.set_color("#000000").unwrap();

    let loaded = h.app.load_preset_by_name("Warm").unwrap();
    let expected = FilterParams::new(140.0, 10.0, 110.0, 50.0);
    assert_eq!(loaded.params(), expected);
    assert_eq!(h.app.filters().params(), expected);
    assert_eq!(h.app.filters().color(), "#ffe4b5");
    assert_eq!(h.app.filters().quick_filter(), None);

    // Loading applies without waiting for the debounce
    assert_eq!(h.sink.filters().last(), Some(&expected.css_filter()));
    assert_eq!(
        h.notifier.toasts().last().map(String::as_str),
        Some("Applied Warm filter")
    );
}

#[tokio::test(start_paused = true)]
async fn test_quick_filter_is_saved_with_preset() {
    let mut h = harness();
    h.app.apply_quick_filter(QuickFilter::Cold);
    h.app.save_preset("Frosty").unwrap();

    h.app.apply_quick_filter(QuickFilter::Orange);
    h.app.load_preset_by_name("Frosty").unwrap();

    assert_eq!(h.app.filters().quick_filter(), Some(QuickFilter::Cold));
    assert_eq!(h.app.filters().params(), QuickFilter::Cold.params());
}

#[tokio::test(start_paused = true)]
async fn test_long_name_is_rejected() {
    let mut h = harness();

    let err = h.app.save_preset("ABCDEFGHIJKLMNO").unwrap_err();

    assert!(matches!(err, PresetError::InvalidName(_)));
    assert!(h.app.saved_presets().is_empty());
    assert_eq!(h.notifier.toasts().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_ten_character_names_fit() {
    let mut h = harness();

    let saved = h.app.save_preset("  Café Noir ").unwrap();

    assert_eq!(saved.name, "Café Noir");
    assert_eq!(h.app.saved_presets()[0].key, preset_key("Café Noir"));
}

#[tokio::test(start_paused = true)]
async fn test_saving_same_name_overwrites() {
    let mut h = harness();
    h.app.set_param(FilterKind::Hue, 30.0);
    h.app.save_preset("Mine").unwrap();
    h.app.set_param(FilterKind::Hue, -30.0);
    h.app.save_preset("Mine").unwrap();

    let listed = h.app.saved_presets();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].preset.hue, -30.0);
}

#[tokio::test(start_paused = true)]
async fn test_declined_delete_keeps_preset() {
    let mut h = harness();
    h.app.save_preset("Warm").unwrap();
    h.notifier.answer_confirm(false);

    assert!(!h.app.delete_preset(&preset_key("Warm")).unwrap());

    assert_eq!(h.app.saved_presets().len(), 1);
    assert_eq!(
        *h.notifier.confirms.lock().unwrap(),
        vec!["Delete the \"Warm\" filter?"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_confirmed_delete_removes_preset() {
    let mut h = harness();
    h.app.save_preset("Warm").unwrap();
    h.notifier.answer_confirm(true);

    assert!(h.app.delete_preset(&preset_key("Warm")).unwrap());

    assert!(h.app.saved_presets().is_empty());
    assert_eq!(
        h.notifier.toasts().last().map(String::as_str),
        Some("Filter deleted")
    );
    assert_eq!(
        h.app.delete_preset(&preset_key("Warm")).unwrap_err(),
        PresetError::NotFound(preset_key("Warm"))
    );
}

#[tokio::test(start_paused = true)]
async fn test_interactive_save_uses_prompt() {
    let mut h = harness();

    h.notifier.answer_prompt(None);
    assert_eq!(h.app.save_preset_interactive().unwrap(), None);
    assert!(h.app.saved_presets().is_empty());

    h.notifier.answer_prompt(Some("Sunny"));
    let saved = h.app.save_preset_interactive().unwrap().unwrap();
    assert_eq!(saved.name, "Sunny");
    assert_eq!(h.app.saved_presets().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_legacy_entries_load() {
    let mut store = MemoryStore::new();
    store
        .set(
            "filter_Old",
            r##"{"name":"Old","color":"#FFFFFF","saturation":"120","hue":"-20","brightness":"100","beauty":"250","filter":"sparkle"}"##,
        )
        .unwrap();
    store.set("filter_Broken", "{").unwrap();
    store.set("theme", "dark").unwrap();
    let mut h = HarnessBuilder::new().store(Box::new(store)).build();

    let listed = h.app.saved_presets();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].preset.version, 0);

    let loaded = h.app.load_preset_by_name("Old").unwrap();
    assert_eq!(loaded.params(), FilterParams::new(120.0, -20.0, 100.0, 100.0));
    assert_eq!(loaded.quick_filter, None);
    assert_eq!(h.app.filters().color(), "#ffffff");
    assert_eq!(
        h.app.load_preset_by_name("Missing").unwrap_err(),
        PresetError::NotFound("Missing".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_presets_survive_a_new_session() {
    let path = std::env::temp_dir()
        .join(format!("selfie-camera-presets-{}", uuid::Uuid::new_v4()))
        .join("storage.json");

    {
        let store = FileStore::open(&path).unwrap();
        let mut h = HarnessBuilder::new().store(Box::new(store)).build();
        dial_in_warm(&mut h);
        h.app.save_preset("Warm").unwrap();
    }

    let store = FileStore::open(&path).unwrap();
    let mut h = HarnessBuilder::new().store(Box::new(store)).build();
    let loaded = h.app.load_preset_by_name("Warm").unwrap();
    assert_eq!(loaded.params(), FilterParams::new(140.0, 10.0, 110.0, 50.0));
    assert_eq!(loaded.color, "#ffe4b5");
}

#[tokio::test(start_paused = true)]
async fn test_nan_input_still_saves_a_readable_preset() {
    let mut h = harness();
    h.app.set_param(FilterKind::Saturation, 140.0);
    h.app.set_param(FilterKind::Saturation, f64::NAN);
    h.app.set_param(FilterKind::Hue, f64::INFINITY);

    let params = h.app.filters().params();
    assert_eq!(params.saturation, 100.0);
    assert_eq!(params.hue, 180.0);

    h.app.save_preset("Odd").unwrap();
    let listed = h.app.saved_presets();
    assert_eq!(listed.len(), 1);
    assert_eq!(h.app.load_preset_by_name("Odd").unwrap().params(), params);
}
