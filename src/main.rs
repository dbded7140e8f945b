use anyhow::{Context, Result};
use clap::Parser;
use gtk4::prelude::*;
use gtk4::Application;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use flow_gauge::ui::build_demo_window;
use flow_gauge::DemoSettings;

const APP_ID: &str = "com.github.flow_gauge";

/// flow-gauge - A circular flow gauge demo
#[derive(Parser, Debug, Clone)]
#[command(name = "flow-gauge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Initial gauge value
    #[arg(long = "value", value_name = "N", allow_negative_numbers = true)]
    value: Option<f64>,

    /// Render the gauge to a PNG file and exit without opening a window
    #[arg(long = "snapshot", value_name = "PNG")]
    snapshot: Option<PathBuf>,

    /// Snapshot width and height in pixels
    #[arg(long = "size", value_name = "PX", default_value = "400",
          value_parser = clap::value_parser!(i32).range(1..=8192))]
    size: i32,
}

fn load_settings(path: Option<&Path>) -> DemoSettings {
    let result = match path {
        Some(path) if path.exists() => DemoSettings::load_from_path(path),
        Some(path) => {
            info!("{} does not exist yet, using defaults", path.display());
            Ok(DemoSettings::default())
        }
        None => DemoSettings::load(),
    };
    result.unwrap_or_else(|e| {
        warn!("Failed to load settings, using defaults: {:#}", e);
        DemoSettings::default()
    })
}

/// Render one frame headlessly, with the value shown without animation.
fn snapshot(settings: &DemoSettings, value: Option<f64>, size: i32, path: &Path) -> Result<()> {
    let mut gauge = settings.build_gauge()?;
    let value = value.unwrap_or_else(|| gauge.min());
    gauge.set_value(value, false, false);
    flow_gauge_render::render_png(&mut gauge, size, size, path)
        .with_context(|| format!("Snapshot of value {} failed", value))
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting flow-gauge v{}", env!("CARGO_PKG_VERSION"));

    let settings = load_settings(cli.config.as_deref());

    if let Some(path) = &cli.snapshot {
        if let Err(e) = snapshot(&settings, cli.value, cli.size, path) {
            error!("{:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let app = Application::builder().application_id(APP_ID).build();

    let config_path = cli.config.clone();
    let initial_value = cli.value;
    app.connect_activate(move |app| {
        let window = build_demo_window(app, settings.clone(), config_path.clone(), initial_value);
        window.present();
    });

    // Run the application (pass empty args since we already parsed them)
    app.run_with_args(&["flow-gauge"]);
}
