//! camdeck library crate.
//!
//! This module exposes the internal components for integration testing.

// Allow dead_code during development
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod camera;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod panel;
pub mod preview;
pub mod render;
