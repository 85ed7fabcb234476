//! Configuration file handling for camdeck.
//!
//! Loads configuration from `~/.config/camdeck/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::camera::CameraConfig;

/// Configuration file structure for camdeck.
/// Loaded from ~/.config/camdeck/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraSection,
    #[serde(default)]
    pub panel: PanelSection,
}

/// `[camera]` section: capture configuration applied to the device.
#[derive(Debug, Deserialize)]
pub struct CameraSection {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_buffer_depth")]
    pub buffer_depth: u32,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            buffer_depth: default_buffer_depth(),
        }
    }
}

impl From<&CameraSection> for CameraConfig {
    fn from(section: &CameraSection) -> Self {
        CameraConfig {
            width: section.width,
            height: section.height,
            fps: section.fps,
            buffer_depth: section.buffer_depth,
        }
    }
}

/// `[panel]` section: terminal preview loop settings.
#[derive(Debug, Deserialize)]
pub struct PanelSection {
    /// Poll cadence in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Preview width in terminal columns
    #[serde(default = "default_columns")]
    pub columns: u16,
    /// Charset name: "standard", "blocks", or "minimal"
    #[serde(default)]
    pub charset: Option<String>,
    /// Flip the brightness ramp for light terminals
    #[serde(default)]
    pub invert: bool,
}

impl Default for PanelSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            columns: default_columns(),
            charset: None,
            invert: false,
        }
    }
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    480
}

fn default_fps() -> u32 {
    30
}

fn default_buffer_depth() -> u32 {
    1
}

fn default_interval_ms() -> u64 {
    100
}

fn default_columns() -> u16 {
    100
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("camdeck").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/camdeck/config.toml")
        })
}
