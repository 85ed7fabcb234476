//! Camera troubleshooting report.
//!
//! A read-only procedure over a capture backend: enumerates usable
//! device indices, prints platform permission guidance, and tries one
//! read from index 0. It never touches session state.

use crate::camera::{probe_available, CaptureBackend, CaptureDevice, PROBE_ORDER};

/// Build the diagnostics report for the current platform.
pub fn report<B: CaptureBackend>(backend: &mut B) -> String {
    report_for(backend, std::env::consts::OS)
}

/// Build the diagnostics report for a named platform. Split out from
/// [`report`] so every guidance branch is reachable in tests.
pub fn report_for<B: CaptureBackend>(backend: &mut B, os: &str) -> String {
    let mut out = String::new();
    out.push_str("=== CAMERA DIAGNOSTICS ===\n");
    out.push_str(&format!(
        "System: {} ({})\n",
        os,
        std::env::consts::ARCH
    ));
    out.push_str(&format!("camdeck version: {}\n", env!("CARGO_PKG_VERSION")));
    out.push_str(&format!("Backend: {}\n", backend.name()));

    let available = probe_available(backend, PROBE_ORDER.len() as u32);
    out.push_str(&format!("Available camera indices: {:?}\n", available));

    out.push_str(permission_guidance(os));
    out.push('\n');

    out.push_str("Testing camera index 0...\n");
    match backend.open(0) {
        Ok(mut device) => match device.read_frame() {
            Ok(frame) if !frame.is_empty() => {
                out.push_str(&format!(
                    "  Camera 0 working: {}x{}\n",
                    frame.width, frame.height
                ));
            }
            Ok(_) => out.push_str("  Camera 0 opened but returned an empty frame\n"),
            Err(err) => out.push_str(&format!("  Camera 0 opened but read failed: {}\n", err)),
        },
        Err(err) => out.push_str(&format!("  Camera 0 not available: {}\n", err)),
    }

    out.push_str("=== END DIAGNOSTICS ===\n");
    out
}

/// Camera permission guidance for the given OS identifier (the values
/// of `std::env::consts::OS`). Unknown systems get the Linux guidance.
pub fn permission_guidance(os: &str) -> &'static str {
    match os {
        "windows" => {
            "On Windows:\n  1. Check Settings > Privacy > Camera\n  2. Allow desktop apps to access the camera"
        }
        "macos" => {
            "On macOS:\n  1. Open System Settings > Privacy & Security > Camera\n  2. Grant camera access to your terminal application"
        }
        _ => {
            "On Linux:\n  1. List devices and drivers: v4l2-ctl --list-devices\n  2. Ensure your user is in the 'video' group"
        }
    }
}
