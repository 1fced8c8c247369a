// SPDX-License-Identifier: GPL-3.0-only

//! Command-line operations
//!
//! Every command runs a session against the virtual camera and light sensor,
//! with presets in the configured store file and downloads in the configured
//! directory.

use selfie_camera::app::{DirectoryDownloads, LogFilterSink, Notifier, SelfieApp, Services};
use selfie_camera::backends::camera::manager::candidates_for;
use selfie_camera::backends::sensor::{
    AmbientLightSensor, DeniedSensor, UnavailableSensor, VirtualLightSensor,
};
use selfie_camera::backends::virtual_camera::VirtualCamera;
use selfie_camera::constants::{format_elapsed, timing, virtual_camera::SENSOR_INTERVAL};
use selfie_camera::presets::{PresetStore, preset_key};
use selfie_camera::{Config, DeviceClass, FileStore, FilterParams, QuickFilter};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Notifier printing to the terminal
struct ConsoleNotifier {
    assume_yes: bool,
}

impl Notifier for ConsoleNotifier {
    fn toast(&self, message: &str) {
        println!("{}", message);
    }

    fn alert(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    fn prompt(&self, message: &str) -> Option<String> {
        print!("{} ", message);
        std::io::stdout().flush().ok()?;
        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.prompt(&format!("{} [y/N]", message))
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    fn recording_timer(&self, label: Option<&str>) {
        match label {
            Some(label) => {
                print!("\rRecording: {}", label);
                let _ = std::io::stdout().flush();
            }
            None => println!(),
        }
    }

    fn auto_mode_available(&self, available: bool) {
        if !available {
            println!("Auto mode unavailable");
        }
    }
}

fn load_config(device: Option<DeviceClass>, output: Option<PathBuf>) -> Config {
    let mut config = Config::load();
    if let Some(device) = device {
        config.device_class = device;
    }
    if output.is_some() {
        config.download_dir = output;
    }
    config
}

fn open_presets(config: &Config) -> Result<PresetStore, Box<dyn std::error::Error>> {
    let store = FileStore::open(config.store_path())?;
    Ok(PresetStore::new(Box::new(store)))
}

fn session(
    config: Config,
    sensor: Box<dyn AmbientLightSensor>,
    assume_yes: bool,
) -> Result<SelfieApp, Box<dyn std::error::Error>> {
    let store = FileStore::open(config.store_path())?;
    let downloads = DirectoryDownloads::new(config.download_dir());
    Ok(SelfieApp::new(
        config,
        Services {
            camera: Arc::new(VirtualCamera::default()),
            sensor,
            store: Box::new(store),
            filter_sink: Arc::new(LogFilterSink),
            notifier: Arc::new(ConsoleNotifier { assume_yes }),
            downloads: Arc::new(downloads),
        },
    ))
}

/// Print the fallback list and negotiate against the virtual camera
pub async fn list_resolutions(device: Option<DeviceClass>) -> CliResult {
    let config = load_config(device, None);
    let class = config.device_class;

    println!("Resolution candidates ({}):", class);
    println!("{}", "-".repeat(40));
    for (index, candidate) in candidates_for(class).iter().enumerate() {
        println!("  [{}] {}", index, candidate);
    }
    println!();

    let mut app = session(config, Box::new(UnavailableSensor), false)?;
    let negotiated = app.open_camera().await?;
    println!(
        "Accepted candidate [{}] {} -> {} ({})",
        negotiated.attempt,
        negotiated.candidate,
        negotiated.settings,
        negotiated.settings.device_label
    );
    if let Some(width) = app.preview_width() {
        println!("Preview width: {}px", width);
    }
    Ok(())
}

/// Take one photo with an optional quick filter or preset
pub async fn take_photo(
    device: Option<DeviceClass>,
    quick_filter: Option<QuickFilter>,
    preset: Option<String>,
    output: Option<PathBuf>,
) -> CliResult {
    let config = load_config(device, output);
    let mut app = session(config, Box::new(UnavailableSensor), false)?;
    app.open_camera().await?;

    if let Some(quick) = quick_filter {
        app.apply_quick_filter(quick);
    }
    if let Some(name) = preset {
        app.load_preset_by_name(&name)?;
    }
    println!("Filter: {}", app.filters().css());

    let path = app.take_snapshot().await?;
    println!("Photo saved: {}", path.display());
    Ok(())
}

/// Record a clip for `duration` seconds or until Ctrl+C
pub async fn record_video(
    device: Option<DeviceClass>,
    duration: u64,
    output: Option<PathBuf>,
) -> CliResult {
    let config = load_config(device, output);
    let mut app = session(config, Box::new(UnavailableSensor), false)?;
    app.open_camera().await?;

    println!("Duration: {} seconds", duration);
    println!("Recording... (press Ctrl+C to stop early)");
    app.start_recording()?;

    // Set up Ctrl+C handler
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_clone = Arc::clone(&stop_flag);
    ctrlc::set_handler(move || {
        stop_flag_clone.store(true, Ordering::SeqCst);
    })?;

    let target = Duration::from_secs(duration);
    let started = tokio::time::Instant::now();
    while started.elapsed() < target {
        if stop_flag.load(Ordering::SeqCst) {
            println!();
            println!("Stopping early...");
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let path = app.stop_recording().await?;
    println!(
        "Video saved: {} ({})",
        path.display(),
        format_elapsed(started.elapsed().as_secs())
    );
    Ok(())
}

/// Print every readable preset
pub fn list_presets() -> CliResult {
    let presets = open_presets(&Config::load())?;
    let listed = presets.list();
    if listed.is_empty() {
        println!("No saved presets.");
        return Ok(());
    }

    println!("Saved presets:");
    println!("{}", "-".repeat(60));
    for stored in listed {
        let p = &stored.preset;
        println!(
            "  {:<10}  sat {:>5.1}  hue {:>6.1}  bright {:>5.1}  beauty {:>5.1}  {}  {}",
            p.name,
            p.saturation,
            p.hue,
            p.brightness,
            p.beauty,
            p.color,
            p.quick_filter.map(|q| q.id()).unwrap_or("-")
        );
    }
    Ok(())
}

/// Save a preset built from a quick filter and per-control overrides
pub fn save_preset(
    name: &str,
    quick_filter: Option<QuickFilter>,
    [saturation, hue, brightness, beauty]: [Option<f64>; 4],
    color: Option<&str>,
) -> CliResult {
    let config = Config::load();
    let mut presets = open_presets(&config)?;

    let base = quick_filter.map(|q| q.params()).unwrap_or_default();
    let params = FilterParams::new(
        saturation.unwrap_or(base.saturation),
        hue.unwrap_or(base.hue),
        brightness.unwrap_or(base.brightness),
        beauty.unwrap_or(base.beauty),
    );
    let color = color.unwrap_or(&config.background_color);

    let preset = presets.save(name, params, color, quick_filter)?;
    println!("Saved {} ({})", preset.name, preset.params().css_filter());
    Ok(())
}

/// Delete a preset, asking first unless `yes`
pub fn delete_preset(name: &str, yes: bool) -> CliResult {
    let mut app = session(Config::load(), Box::new(UnavailableSensor), yes)?;

    if !app.delete_preset(&preset_key(name.trim()))? {
        println!("Kept {}", name);
    }
    Ok(())
}

/// Replay readings through the sensor task with auto mode on
pub async fn auto_tune(device: Option<DeviceClass>, lux: Vec<f64>) -> CliResult {
    let config = load_config(device, None);
    let readings = lux.len();
    let sensor: Box<dyn AmbientLightSensor> = if config.allow_ambient_light {
        Box::new(VirtualLightSensor::new(lux).with_interval(SENSOR_INTERVAL))
    } else {
        Box::new(DeniedSensor)
    };
    let mut app = session(config, sensor, false)?;

    app.start_ambient_light()?;
    app.toggle_auto_mode()?;

    // The sensor task marks auto mode unavailable once the replay ends
    while app.auto_tune().is_available() {
        tokio::time::sleep(SENSOR_INTERVAL).await;
    }
    tokio::time::sleep(timing::DEBOUNCE_DELAY).await;

    let params = app.filters().params();
    println!("Readings: {}", readings);
    println!("Brightness: {:.1}", params.brightness);
    println!("Beauty: {:.1}", params.beauty);
    println!("Filter: {}", params.css_filter());
    Ok(())
}
