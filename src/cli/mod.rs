//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing and subcommand handlers.

mod args;
mod commands;

pub use args::{Args, CharacterSet, Command};
pub use commands::{config_path, diagnose, list_cameras, snapshot};
