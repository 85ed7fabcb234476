//! Device-access traits and probe helpers.
//!
//! Everything that touches capture hardware sits behind these traits,
//! returning explicit `Result`s. The session layer absorbs the errors;
//! tests drive the session through scripted fake implementations.

use log::debug;

use super::types::{CameraConfig, CameraError, Frame};

/// An open capture device. Dropping the value releases the
/// underlying device handle.
pub trait CaptureDevice {
    /// Read a single frame from the device.
    fn read_frame(&mut self) -> Result<Frame, CameraError>;

    /// Apply capture configuration to the device. A failed call
    /// leaves the device open and readable.
    fn configure(&mut self, config: &CameraConfig) -> Result<(), CameraError>;

    /// Number of frames the driver queues internally.
    fn buffer_depth(&self) -> u32;
}

/// Opens capture devices by index.
pub trait CaptureBackend {
    type Device: CaptureDevice;

    /// Open the device at `index`.
    fn open(&mut self, index: u32) -> Result<Self::Device, CameraError>;

    /// Short backend name for diagnostic reports.
    fn name(&self) -> &'static str;
}

/// One viability read. A device counts as usable only when it yields
/// a non-empty frame.
pub fn probe_read<D: CaptureDevice>(device: &mut D) -> bool {
    matches!(device.read_frame(), Ok(frame) if !frame.is_empty())
}

/// Probe indices `0..max_index` in order, releasing every opened
/// handle, and return the indices whose probe read succeeded.
pub fn probe_available<B: CaptureBackend>(backend: &mut B, max_index: u32) -> Vec<u32> {
    let mut available = Vec::new();
    for index in 0..max_index {
        match backend.open(index) {
            Ok(mut device) => {
                if probe_read(&mut device) {
                    available.push(index);
                }
                // dropping the device here releases the handle
            }
            Err(err) => debug!("camera {} not available: {}", index, err),
        }
    }
    available
}
