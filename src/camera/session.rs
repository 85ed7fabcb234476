//! Camera session state machine.
//!
//! Owns the device handle lifecycle: discovery with index fallback,
//! running/stopped state, the last good frame, and the diagnostic
//! message. Every operation returns a displayable frame; device
//! failures are logged and rendered into the returned image instead
//! of propagating.

use std::fmt;

use log::{debug, info, warn};

use super::backend::{probe_available, probe_read, CaptureBackend, CaptureDevice};
use super::types::{CameraConfig, Frame};
use crate::render;

/// Device indices tried during acquisition, in order.
pub const PROBE_ORDER: [u32; 3] = [0, 1, 2];

/// Shown when every candidate index failed to produce a frame.
pub const NO_CAMERA_DIAGNOSTIC: &str = "No working camera found. Possible issues:\n\
    1. Camera is being used by another application\n\
    2. Camera drivers not installed\n\
    3. Camera permissions denied\n\
    4. No camera connected";

const NOT_INITIALIZED: &str = "Camera not initialized";
const READ_FAILED: &str = "Failed to read frame from camera";
const OPENED_BUT_UNREADABLE: &str = "Camera opened but cannot read frames";

/// Camera session over a capture backend.
///
/// Every method takes `&mut self`, so a single owner drives the whole
/// lifecycle and operations can never overlap. The session holds at
/// most one device handle; the handle exists only while the session is
/// running and the most recent open attempt succeeded.
pub struct CameraSession<B: CaptureBackend> {
    backend: B,
    device: Option<B::Device>,
    running: bool,
    last_frame: Frame,
    last_error: Option<String>,
    config: CameraConfig,
}

impl<B: CaptureBackend> fmt::Debug for CameraSession<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraSession")
            .field("running", &self.running)
            .field("has_device", &self.device.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<B: CaptureBackend> CameraSession<B> {
    /// Create a stopped session seeded with the startup placeholder
    /// frame, so there is always something to display.
    pub fn new(backend: B, config: CameraConfig) -> Self {
        Self {
            backend,
            device: None,
            running: false,
            last_frame: render::placeholder_image(),
            last_error: None,
            config,
        }
    }

    /// Whether `start` has been called without a matching `stop`.
    ///
    /// Running does not imply a device is held: a failed `start`
    /// leaves the session running in a degraded state where `poll`
    /// reports "not initialized" until the next `start` call
    /// re-attempts acquisition.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Human-readable description of the last failure, if any.
    /// Cleared when a device is successfully acquired.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start the session.
    ///
    /// Acquires a device if none is held (indices [0, 1, 2], first one
    /// that opens and yields a frame wins), reads one frame, stores it
    /// as the last good frame, and returns it. On failure the returned
    /// image carries the diagnostic text; the session is running either
    /// way, and a later `start` retries acquisition.
    pub fn start(&mut self) -> Frame {
        info!("starting camera session");
        self.running = true;

        if !self.acquire() {
            let message = self
                .last_error
                .clone()
                .unwrap_or_else(|| "Camera initialization failed".to_string());
            return render::error_image(&message);
        }

        let Some(device) = self.device.as_mut() else {
            return render::error_image(NOT_INITIALIZED);
        };

        match device.read_frame() {
            Ok(frame) if !frame.is_empty() => {
                let frame = frame.into_rgb();
                self.last_frame = frame.clone();
                frame
            }
            Ok(_) => {
                warn!("camera opened but returned an empty frame");
                self.last_error = Some(OPENED_BUT_UNREADABLE.to_string());
                render::error_image(OPENED_BUT_UNREADABLE)
            }
            Err(err) => {
                warn!("error reading from camera: {}", err);
                let message = format!("Error reading from camera: {}", err);
                self.last_error = Some(message.clone());
                render::error_image(&message)
            }
        }
    }

    /// Stop the session and release the device handle.
    ///
    /// Returns the last good frame, not a blank one, so the display
    /// keeps showing the final image.
    pub fn stop(&mut self) -> Frame {
        info!("stopping camera session");
        self.running = false;
        if let Some(device) = self.device.take() {
            drop(device);
            debug!("camera handle released");
        }
        self.last_frame.clone()
    }

    /// Produce the next frame to display.
    ///
    /// A stopped session returns the last good frame without touching
    /// the device. A running session drains stale buffered frames,
    /// reads one, converts it to display channel order, stores it, and
    /// returns it. A failed read leaves the last good frame untouched
    /// and comes back as a rendered error image; the next `poll`
    /// simply tries again.
    pub fn poll(&mut self) -> Frame {
        if !self.running {
            return self.last_frame.clone();
        }

        let Some(device) = self.device.as_mut() else {
            return render::error_image(NOT_INITIALIZED);
        };

        // Discard queued frames so the one displayed is current.
        let depth = device.buffer_depth();
        for _ in 1..depth {
            let _ = device.read_frame();
        }

        match device.read_frame() {
            Ok(frame) if !frame.is_empty() => {
                let frame = frame.into_rgb();
                self.last_frame = frame.clone();
                frame
            }
            Ok(_) => {
                debug!("camera returned an empty frame");
                self.last_error = Some(READ_FAILED.to_string());
                render::error_image(READ_FAILED)
            }
            Err(err) => {
                warn!("error getting webcam frame: {}", err);
                self.last_error = Some(format!("Error getting webcam frame: {}", err));
                render::error_image(READ_FAILED)
            }
        }
    }

    /// Probe indices `0..max_index` in order and return those that
    /// produced a frame. Probed handles are always released; the
    /// session's own handle is not involved.
    pub fn available_devices(&mut self, max_index: u32) -> Vec<u32> {
        probe_available(&mut self.backend, max_index)
    }

    /// Ensure a device handle is held. Probes candidate indices in
    /// order and adopts the first that opens and yields a usable
    /// frame, applying the capture configuration to it. Returns true
    /// when a handle is held on exit.
    fn acquire(&mut self) -> bool {
        if self.device.is_some() {
            debug!("camera already acquired");
            return true;
        }

        for &index in PROBE_ORDER.iter() {
            info!("trying camera index {}", index);
            let mut device = match self.backend.open(index) {
                Ok(device) => device,
                Err(err) => {
                    warn!("camera {} failed to open: {}", index, err);
                    continue;
                }
            };
            if !probe_read(&mut device) {
                warn!("camera {} opened but produced no frame", index);
                continue;
            }
            // Unsupported settings are reported by the device but do
            // not invalidate it.
            if let Err(err) = device.configure(&self.config) {
                warn!("camera {} configuration not applied: {}", index, err);
            }
            info!("camera {} acquired", index);
            self.device = Some(device);
            self.last_error = None;
            return true;
        }

        warn!("no working camera found at indices {:?}", PROBE_ORDER);
        self.last_error = Some(NO_CAMERA_DIAGNOSTIC.to_string());
        false
    }
}
