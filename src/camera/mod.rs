//! Camera access: session state machine and capture backends.
//!
//! This module provides a high-level API for camera operations:
//! - Session lifecycle via [`CameraSession`]
//! - The device-access seam via [`CaptureBackend`] and [`CaptureDevice`]
//! - The nokhwa-backed production backend via [`NativeBackend`]
//! - Device enumeration via [`query_devices`]

mod backend;
mod native;
mod session;
mod types;

pub use backend::{probe_available, probe_read, CaptureBackend, CaptureDevice};
pub use native::{query_devices, NativeBackend, NativeDevice};
pub use session::{CameraSession, NO_CAMERA_DIAGNOSTIC, PROBE_ORDER};
pub use types::{CameraConfig, CameraError, CameraInfo, Frame, FrameFormat};
