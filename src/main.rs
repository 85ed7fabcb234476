mod camera;
mod cli;
mod config;
mod diagnostics;
mod panel;
mod preview;
mod render;

use camera::{CameraConfig, CameraSession, NativeBackend};
use clap::Parser;
use cli::{Args, Command};
use config::Config;
use panel::PanelOptions;
use preview::CharSet;
use std::time::Duration;

fn main() {
    let args = Args::parse();

    match args.command {
        Some(Command::ListCameras) => cli::list_cameras(),
        Some(Command::Diagnose) => cli::diagnose(),
        Some(Command::Snapshot { ref output }) => cli::snapshot(output),
        Some(Command::ConfigPath) => cli::config_path(),
        None => {
            if let Err(e) = run_panel(&args) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Run the interactive panel with settings merged from CLI args and the
/// config file.
fn run_panel(args: &Args) -> Result<(), String> {
    // Load config file
    // If --config is specified, require the file to exist
    // Otherwise, fall back to defaults if the default config is not found
    let config = if let Some(path) = args.config.as_deref() {
        if !path.exists() {
            return Err(format!("config file not found: {}", path.display()));
        }
        Config::load(Some(path)).map_err(|e| e.to_string())?
    } else {
        match Config::load(None) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Warning: {}", e);
                eprintln!("Using default settings.\n");
                Config::default()
            }
        }
    };

    // Merge settings: CLI args > config file > built-in defaults
    let charset = args
        .charset
        .map(CharSet::from)
        .or_else(|| config.panel.charset.as_deref().and_then(CharSet::from_name))
        .unwrap_or_default();
    let invert = args.invert || config.panel.invert;
    let columns = args.columns.unwrap_or(config.panel.columns);
    let interval_ms = args.interval.unwrap_or(config.panel.interval_ms);

    let options = PanelOptions {
        interval: Duration::from_millis(interval_ms),
        columns,
        charset,
        invert,
    };

    let mut session = CameraSession::new(NativeBackend, CameraConfig::from(&config.camera));
    panel::run(&mut session, &options).map_err(|e| format!("terminal write failed: {}", e))
}
