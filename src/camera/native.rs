//! nokhwa-backed capture backend.

use log::debug;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;
use std::time::Instant;

use super::backend::{CaptureBackend, CaptureDevice};
use super::types::{CameraConfig, CameraError, CameraInfo, Frame, FrameFormat};

/// Production backend over the operating system's camera stack.
#[derive(Debug, Default)]
pub struct NativeBackend;

/// An open nokhwa camera with its stream started.
pub struct NativeDevice {
    camera: Camera,
    buffer_depth: u32,
}

impl CaptureBackend for NativeBackend {
    type Device = NativeDevice;

    fn open(&mut self, index: u32) -> Result<NativeDevice, CameraError> {
        let camera_index = CameraIndex::Index(index);
        let mut camera = open_camera_with_fallback(&camera_index, index)?;

        if let Err(e) = camera.open_stream() {
            return Err(CameraError::OpenFailed {
                index,
                reason: e.to_string(),
            });
        }

        debug!(
            "opened camera {} at {}x{} @ {} fps",
            index,
            camera.resolution().width(),
            camera.resolution().height(),
            camera.frame_rate()
        );

        Ok(NativeDevice {
            camera,
            buffer_depth: 1,
        })
    }

    fn name(&self) -> &'static str {
        "nokhwa"
    }
}

impl CaptureDevice for NativeDevice {
    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CameraError::ReadFailed(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CameraError::ReadFailed(e.to_string()))?;
        let resolution = buffer.resolution();

        Ok(Frame {
            data: decoded.into_raw(),
            width: resolution.width(),
            height: resolution.height(),
            format: FrameFormat::Rgb,
            timestamp: Instant::now(),
        })
    }

    fn configure(&mut self, config: &CameraConfig) -> Result<(), CameraError> {
        // Record the depth first so the drain bound holds even when the
        // resolution or frame rate calls below are rejected.
        self.buffer_depth = config.buffer_depth;

        let resolution = nokhwa::utils::Resolution::new(config.width, config.height);
        self.camera
            .set_resolution(resolution)
            .map_err(|e| CameraError::ConfigureFailed(e.to_string()))?;
        self.camera
            .set_frame_rate(config.fps)
            .map_err(|e| CameraError::ConfigureFailed(e.to_string()))?;

        debug!(
            "camera configured: {}x{} @ {} fps",
            self.camera.resolution().width(),
            self.camera.resolution().height(),
            self.camera.frame_rate()
        );
        Ok(())
    }

    fn buffer_depth(&self) -> u32 {
        self.buffer_depth
    }
}

impl Drop for NativeDevice {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}

/// List all camera devices the system reports, with human-readable names.
///
/// Returns an empty vector (not an error) when no cameras are present.
pub fn query_devices() -> Result<Vec<CameraInfo>, CameraError> {
    let devices =
        nokhwa::query(ApiBackend::Auto).map_err(|e| CameraError::QueryFailed(e.to_string()))?;

    Ok(devices
        .into_iter()
        .map(|d| CameraInfo {
            index: d.index().as_index().unwrap_or(0),
            name: d.human_name(),
            description: d.description().to_string(),
        })
        .collect())
}

/// Try to open a camera with multiple format fallback strategies.
fn open_camera_with_fallback(
    camera_index: &CameraIndex,
    index: u32,
) -> Result<Camera, CameraError> {
    let nominal = CameraConfig::default();

    // Format strategies in order of preference:
    // 1. Closest match with NV12 (common on macOS)
    // 2. Closest match with MJPEG (widely supported)
    // 3. Highest resolution available (let camera decide format)
    let format_attempts: Vec<RequestedFormat> = vec![
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            nokhwa::utils::Resolution::new(nominal.width, nominal.height),
            NokhwaFrameFormat::NV12,
            nominal.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            nokhwa::utils::Resolution::new(nominal.width, nominal.height),
            NokhwaFrameFormat::MJPEG,
            nominal.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = None;

    for requested in format_attempts {
        match open_with_platform_backend(camera_index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                last_error = Some(e);
                continue;
            }
        }
    }

    let e = match last_error {
        Some(e) => e,
        None => {
            return Err(CameraError::OpenFailed {
                index,
                reason: "no format strategy attempted".to_string(),
            })
        }
    };
    let msg = e.to_string().to_lowercase();
    if msg.contains("permission")
        || msg.contains("denied")
        || msg.contains("authorization")
        || msg.contains("access")
    {
        Err(CameraError::PermissionDenied)
    } else {
        Err(CameraError::OpenFailed {
            index,
            reason: e.to_string(),
        })
    }
}

#[cfg(windows)]
fn open_with_platform_backend(
    index: CameraIndex,
    requested: RequestedFormat,
) -> Result<Camera, nokhwa::NokhwaError> {
    Camera::with_backend(index, requested, ApiBackend::MediaFoundation)
}

#[cfg(not(windows))]
fn open_with_platform_backend(
    index: CameraIndex,
    requested: RequestedFormat,
) -> Result<Camera, nokhwa::NokhwaError> {
    Camera::new(index, requested)
}
