//! Subcommand handlers.

use std::path::Path;

use crate::camera::{self, CameraConfig, CameraSession, NativeBackend, PROBE_ORDER};
use crate::config;
use crate::diagnostics;

/// Probe for cameras and print what was found.
pub fn list_cameras() {
    let mut backend = NativeBackend;
    let available = camera::probe_available(&mut backend, PROBE_ORDER.len() as u32);

    if available.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure a camera is connected and not in use by another application.");
        println!("Run 'camdeck diagnose' for a detailed report.");
        return;
    }

    // Names are best-effort; probing already proved the indices deliver frames.
    let names = camera::query_devices().unwrap_or_default();

    println!("Available cameras:");
    for index in available {
        match names.iter().find(|info| info.index == index) {
            Some(info) => println!("  {}", info),
            None => println!("  [{}] (no description available)", index),
        }
    }
    println!();
    println!("The panel uses the first camera that produces frames.");
}

/// Print the full diagnostics report.
pub fn diagnose() {
    let mut backend = NativeBackend;
    print!("{}", diagnostics::report(&mut backend));
}

/// Capture a single frame and write it to `output` as an image file.
///
/// When no camera is available this saves the rendered status image, so
/// the command always produces a file.
pub fn snapshot(output: &Path) {
    let mut session = CameraSession::new(NativeBackend, CameraConfig::default());
    let frame = session.start();
    if let Some(message) = session.last_error() {
        let first_line = message.lines().next().unwrap_or(message);
        eprintln!("Warning: {}", first_line);
        eprintln!("Saving the rendered status image instead of a camera frame.");
    }
    session.stop();

    let image = match image::RgbImage::from_raw(frame.width, frame.height, frame.data.clone()) {
        Some(image) => image,
        None => {
            eprintln!("Error: frame buffer does not match its dimensions");
            std::process::exit(1);
        }
    };

    if let Err(e) = image.save(output) {
        eprintln!("Error writing '{}': {}", output.display(), e);
        std::process::exit(1);
    }

    println!(
        "Saved {}x{} snapshot to {}",
        frame.width,
        frame.height,
        output.display()
    );
}

/// Print the config file location and whether it exists.
pub fn config_path() {
    let path = config::default_path();
    if path.exists() {
        println!("{} (exists)", path.display());
    } else {
        println!("{} (not found)", path.display());
    }
}
