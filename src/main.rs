// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand, ValueEnum};
use selfie_camera::{DeviceClass, QuickFilter};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "selfie-camera")]
#[command(about = "Selfie camera with cosmetic filters, presets and ambient light auto-tune")]
#[command(version)]
struct Cli {
    /// Resolution table to negotiate with (default: from config)
    #[arg(long, global = true, value_enum)]
    device: Option<DeviceArg>,

    /// Pick the resolution table from a browser user agent when --device is absent
    #[arg(long, global = true)]
    user_agent: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum DeviceArg {
    Desktop,
    Mobile,
}

impl From<DeviceArg> for DeviceClass {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Desktop => DeviceClass::Desktop,
            DeviceArg::Mobile => DeviceClass::Mobile,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolution fallback list and what the camera accepts
    Resolutions,

    /// Take a photo
    Photo {
        /// Quick filter to apply (original, pink, cold, orange, vintage)
        #[arg(short, long)]
        quick_filter: Option<QuickFilter>,

        /// Saved preset to apply
        #[arg(short, long)]
        preset: Option<String>,

        /// Output directory (default: download directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Record a clip
    Video {
        /// Recording duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,

        /// Output directory (default: download directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage saved presets
    Presets {
        #[command(subcommand)]
        action: PresetCommand,
    },

    /// Replay ambient light readings and print the tuned parameters
    AutoTune {
        /// Illuminance readings in lux
        #[arg(long, num_args = 1.., required = true)]
        lux: Vec<f64>,
    },
}

#[derive(Subcommand)]
enum PresetCommand {
    /// List saved presets
    List,

    /// Save a preset from a quick filter and explicit values
    Save {
        /// Preset name (up to 10 characters)
        name: String,

        /// Start from this quick filter
        #[arg(short, long)]
        quick_filter: Option<QuickFilter>,

        #[arg(long)]
        saturation: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        hue: Option<f64>,

        #[arg(long)]
        brightness: Option<f64>,

        #[arg(long)]
        beauty: Option<f64>,

        /// Background color as #rrggbb
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a saved preset
    Delete {
        name: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=selfie_camera=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let device = cli
        .device
        .map(DeviceClass::from)
        .or_else(|| cli.user_agent.as_deref().map(DeviceClass::from_user_agent));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        match cli.command {
            Commands::Resolutions => cli::list_resolutions(device).await,
            Commands::Photo {
                quick_filter,
                preset,
                output,
            } => cli::take_photo(device, quick_filter, preset, output).await,
            Commands::Video { duration, output } => {
                cli::record_video(device, duration, output).await
            }
            Commands::Presets { action } => match action {
                PresetCommand::List => cli::list_presets(),
                PresetCommand::Save {
                    name,
                    quick_filter,
                    saturation,
                    hue,
                    brightness,
                    beauty,
                    color,
                } => cli::save_preset(
                    &name,
                    quick_filter,
                    [saturation, hue, brightness, beauty],
                    color.as_deref(),
                ),
                PresetCommand::Delete { name, yes } => cli::delete_preset(&name, yes),
            },
            Commands::AutoTune { lux } => cli::auto_tune(device, lux).await,
        }
    })
}
