//! Terminal panel: the driver loop for the camera session.
//!
//! Polls the session on a fixed cadence and paints every returned
//! frame as ASCII art with a one-line status footer. The session
//! absorbs all device failures, so the loop itself can only fail on
//! terminal I/O.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::info;

use crate::camera::{CameraSession, CaptureBackend, Frame};
use crate::preview::{self, CharSet};

/// Settings for the panel loop, merged from CLI flags and the config
/// file before the loop starts.
#[derive(Debug, Clone)]
pub struct PanelOptions {
    /// Delay between polls
    pub interval: Duration,
    /// Preview width in terminal columns
    pub columns: u16,
    /// Density ramp for the preview
    pub charset: CharSet,
    /// Flip the ramp for light terminals
    pub invert: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            columns: 100,
            charset: CharSet::default(),
            invert: false,
        }
    }
}

/// Global flag for handling Ctrl+C across the application
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Check if Ctrl+C has been received.
pub fn ctrlc_received() -> bool {
    CTRLC_RECEIVED.load(Ordering::SeqCst)
}

/// Set up the Ctrl+C handler.
///
/// This should be called once at program startup.
pub fn setup_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        CTRLC_RECEIVED.store(true, Ordering::SeqCst);
    })
}

/// Run the panel until Ctrl+C.
///
/// Starts the session, then polls and repaints on the configured
/// cadence. On exit the session is stopped and the cursor restored.
pub fn run<B: CaptureBackend>(
    session: &mut CameraSession<B>,
    options: &PanelOptions,
) -> std::io::Result<()> {
    if let Err(e) = setup_ctrlc_handler() {
        eprintln!("Warning: Could not set up Ctrl+C handler: {}", e);
    }

    let mut stdout = std::io::stdout();

    // Clear once; every repaint starts from the home position.
    stdout.write_all(b"\x1b[2J")?;

    let first = session.start();
    if let Some(message) = session.last_error() {
        info!("session started degraded: {}", message);
    }
    paint(&mut stdout, session, &first, options)?;

    loop {
        if ctrlc_received() {
            println!("\nShutting down...");
            break;
        }

        std::thread::sleep(options.interval);
        let frame = session.poll();
        paint(&mut stdout, session, &frame, options)?;
    }

    session.stop();
    stdout.write_all(b"\x1b[?25h")?; // Show cursor
    stdout.flush()?;

    Ok(())
}

/// Paint one frame plus the status footer.
fn paint<B: CaptureBackend>(
    stdout: &mut std::io::Stdout,
    session: &CameraSession<B>,
    frame: &Frame,
    options: &PanelOptions,
) -> std::io::Result<()> {
    let grid = preview::render_grid(frame, options.columns, options.charset, options.invert);

    let mut output = String::new();
    output.push_str("\x1b[H"); // Home
    output.push_str("\x1b[?25l"); // Hide cursor
    for line in grid.lines() {
        output.push_str(line);
        output.push_str("\x1b[K\n"); // Clear to end of line
    }
    output.push_str(&status_line(session, frame));
    output.push_str("\x1b[K");

    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn status_line<B: CaptureBackend>(session: &CameraSession<B>, frame: &Frame) -> String {
    let state = if session.is_running() {
        "running"
    } else {
        "stopped"
    };
    match session.last_error() {
        Some(message) => {
            let first_line = message.lines().next().unwrap_or(message);
            format!(
                "camdeck | {} | {}x{} | {}",
                state, frame.width, frame.height, first_line
            )
        }
        None => format!("camdeck | {} | {}x{}", state, frame.width, frame.height),
    }
}
