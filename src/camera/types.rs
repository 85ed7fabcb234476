//! Camera types and data structures.

use std::fmt;
use std::time::Instant;

/// Information about an available camera device.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// Device index for selection
    pub index: u32,
    /// Human-readable device name
    pub name: String,
    /// Device description
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Channel order of a captured frame. Display order is RGB;
/// frames arriving in BGR are converted before they are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// Red, green, blue (3 bytes per pixel)
    Rgb,
    /// Blue, green, red (3 bytes per pixel)
    Bgr,
}

/// A captured or rendered image frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data, tightly packed rows
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Channel order of `data`
    pub format: FrameFormat,
    /// Timestamp when the frame was captured or rendered
    pub timestamp: Instant,
}

impl Frame {
    /// Get the number of bytes per pixel (3 for both supported orders).
    pub fn bytes_per_pixel(&self) -> usize {
        match self.format {
            FrameFormat::Rgb | FrameFormat::Bgr => 3,
        }
    }

    /// A frame with no pixels is unusable for display or probing.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.width == 0 || self.height == 0
    }

    /// Convert to display channel order. RGB frames pass through
    /// untouched; BGR frames get their first and third channels swapped.
    pub fn into_rgb(mut self) -> Frame {
        if self.format == FrameFormat::Bgr {
            for pixel in self.data.chunks_exact_mut(3) {
                pixel.swap(0, 2);
            }
            self.format = FrameFormat::Rgb;
        }
        self
    }
}

/// Capture configuration applied to an adopted device.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Target frame width in pixels
    pub width: u32,
    /// Target frame height in pixels
    pub height: u32,
    /// Target FPS (actual may vary)
    pub fps: u32,
    /// Frames the driver queues internally; drained before each read
    pub buffer_depth: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30,
            buffer_depth: 1,
        }
    }
}

/// Errors that can occur at the device-access seam.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("failed to open camera {index}: {reason}")]
    OpenFailed {
        /// Device index that was probed
        index: u32,
        /// Backend-reported reason
        reason: String,
    },

    #[error("failed to read frame: {0}")]
    ReadFailed(String),

    #[error("failed to configure camera: {0}")]
    ConfigureFailed(String),

    #[error("failed to query camera devices: {0}")]
    QueryFailed(String),

    #[error("camera permission denied. On macOS, grant access in System Settings > Privacy & Security > Camera")]
    PermissionDenied,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_frame(data: Vec<u8>, width: u32, height: u32) -> Frame {
        Frame {
            data,
            width,
            height,
            format: FrameFormat::Rgb,
            timestamp: Instant::now(),
        }
    }

    #[test]
    fn test_camera_info_display() {
        let info = CameraInfo {
            index: 0,
            name: "Test Camera".to_string(),
            description: "Built-in".to_string(),
        };
        assert_eq!(format!("{}", info), "[0] Test Camera (Built-in)");
    }

    #[test]
    fn test_camera_config_default() {
        let config = CameraConfig::default();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.fps, 30);
        assert_eq!(config.buffer_depth, 1);
    }

    #[test]
    fn test_frame_bytes_per_pixel() {
        let frame = rgb_frame(vec![0; 6], 2, 1);
        assert_eq!(frame.bytes_per_pixel(), 3);
    }

    #[test]
    fn test_frame_is_empty() {
        assert!(rgb_frame(vec![], 0, 0).is_empty());
        assert!(rgb_frame(vec![], 2, 1).is_empty());
        assert!(!rgb_frame(vec![0; 6], 2, 1).is_empty());
    }

    #[test]
    fn test_into_rgb_swaps_bgr_channels() {
        let frame = Frame {
            data: vec![10, 20, 30, 40, 50, 60],
            width: 2,
            height: 1,
            format: FrameFormat::Bgr,
            timestamp: Instant::now(),
        };
        let converted = frame.into_rgb();
        assert_eq!(converted.format, FrameFormat::Rgb);
        assert_eq!(converted.data, vec![30, 20, 10, 60, 50, 40]);
    }

    #[test]
    fn test_into_rgb_passes_rgb_through() {
        let frame = rgb_frame(vec![1, 2, 3], 1, 1);
        let converted = frame.into_rgb();
        assert_eq!(converted.format, FrameFormat::Rgb);
        assert_eq!(converted.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_camera_error_display() {
        let err = CameraError::OpenFailed {
            index: 1,
            reason: "busy".to_string(),
        };
        assert_eq!(format!("{}", err), "failed to open camera 1: busy");
        assert_eq!(
            format!("{}", CameraError::ReadFailed("timeout".to_string())),
            "failed to read frame: timeout"
        );
        assert!(format!("{}", CameraError::PermissionDenied).contains("permission denied"));
    }
}
