//! CLI argument parsing with clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::preview::CharSet;

/// Terminal webcam control panel with a live ASCII preview
#[derive(Parser, Debug)]
#[command(name = "camdeck")]
#[command(version, about = "Webcam control panel for the terminal", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// ASCII character set for the preview
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Invert brightness (for light terminals)
    #[arg(long)]
    pub invert: bool,

    /// Preview width in terminal columns
    #[arg(long, value_parser = parse_columns)]
    pub columns: Option<u16>,

    /// Poll interval in milliseconds
    #[arg(long, value_parser = parse_interval)]
    pub interval: Option<u64>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Print the camera diagnostics report
    Diagnose,
    /// Capture a single frame and save it as PNG
    Snapshot {
        /// Output file path
        #[arg(short, long, default_value = "snapshot.png")]
        output: PathBuf,
    },
    /// Print the config file location
    ConfigPath,
}

/// ASCII character set for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    #[default]
    Standard,
    Blocks,
    Minimal,
}

impl From<CharacterSet> for CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Standard => CharSet::Standard,
            CharacterSet::Blocks => CharSet::Blocks,
            CharacterSet::Minimal => CharSet::Minimal,
        }
    }
}

fn parse_columns(s: &str) -> Result<u16, String> {
    let columns: u16 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid column count", s))?;
    if columns == 0 {
        return Err("column count must be at least 1".to_string());
    }
    Ok(columns)
}

fn parse_interval(s: &str) -> Result<u64, String> {
    let interval: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid interval", s))?;
    if interval == 0 {
        return Err("interval must be at least 1 millisecond".to_string());
    }
    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["camdeck"]);
        assert!(args.command.is_none());
        assert!(args.charset.is_none());
        assert!(!args.invert);
        assert!(args.columns.is_none());
        assert!(args.interval.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_args_invert_flag() {
        let args = Args::parse_from(["camdeck", "--invert"]);
        assert!(args.invert);
    }

    #[test]
    fn test_args_charset_values() {
        let args = Args::parse_from(["camdeck", "--charset", "standard"]);
        assert_eq!(args.charset, Some(CharacterSet::Standard));

        let args = Args::parse_from(["camdeck", "--charset", "blocks"]);
        assert_eq!(args.charset, Some(CharacterSet::Blocks));

        let args = Args::parse_from(["camdeck", "--charset", "minimal"]);
        assert_eq!(args.charset, Some(CharacterSet::Minimal));
    }

    #[test]
    fn test_args_columns_value() {
        let args = Args::parse_from(["camdeck", "--columns", "72"]);
        assert_eq!(args.columns, Some(72));
    }

    #[test]
    fn test_args_columns_rejects_zero() {
        let result = Args::try_parse_from(["camdeck", "--columns", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_columns_rejects_garbage() {
        let result = Args::try_parse_from(["camdeck", "--columns", "wide"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_interval_value() {
        let args = Args::parse_from(["camdeck", "--interval", "250"]);
        assert_eq!(args.interval, Some(250));
    }

    #[test]
    fn test_args_interval_rejects_zero() {
        let result = Args::try_parse_from(["camdeck", "--interval", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_config_option() {
        let args = Args::parse_from(["camdeck", "--config", "/tmp/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));

        let args = Args::parse_from(["camdeck", "-c", "/tmp/test.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_args_list_cameras_subcommand() {
        let args = Args::parse_from(["camdeck", "list-cameras"]);
        assert!(matches!(args.command, Some(Command::ListCameras)));
    }

    #[test]
    fn test_args_diagnose_subcommand() {
        let args = Args::parse_from(["camdeck", "diagnose"]);
        assert!(matches!(args.command, Some(Command::Diagnose)));
    }

    #[test]
    fn test_args_snapshot_default_output() {
        let args = Args::parse_from(["camdeck", "snapshot"]);
        match args.command {
            Some(Command::Snapshot { output }) => {
                assert_eq!(output, PathBuf::from("snapshot.png"));
            }
            _ => panic!("Expected Snapshot subcommand"),
        }
    }

    #[test]
    fn test_args_snapshot_custom_output() {
        let args = Args::parse_from(["camdeck", "snapshot", "-o", "/tmp/frame.png"]);
        match args.command {
            Some(Command::Snapshot { output }) => {
                assert_eq!(output, PathBuf::from("/tmp/frame.png"));
            }
            _ => panic!("Expected Snapshot subcommand"),
        }
    }

    #[test]
    fn test_args_config_path_subcommand() {
        let args = Args::parse_from(["camdeck", "config-path"]);
        assert!(matches!(args.command, Some(Command::ConfigPath)));
    }

    #[test]
    fn test_charset_conversion() {
        assert_eq!(CharSet::from(CharacterSet::Standard), CharSet::Standard);
        assert_eq!(CharSet::from(CharacterSet::Blocks), CharSet::Blocks);
        assert_eq!(CharSet::from(CharacterSet::Minimal), CharSet::Minimal);
    }

    #[test]
    fn test_args_combined_options() {
        let args = Args::parse_from([
            "camdeck",
            "--charset",
            "blocks",
            "--invert",
            "--columns",
            "80",
            "--interval",
            "50",
        ]);
        assert_eq!(args.charset, Some(CharacterSet::Blocks));
        assert!(args.invert);
        assert_eq!(args.columns, Some(80));
        assert_eq!(args.interval, Some(50));
    }
}
