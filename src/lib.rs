//! Venv Sweeper - find Python virtual environments and reclaim their space
//!
//! This crate provides functionality for:
//! - Locating virtual environments by their `pyvenv.cfg` marker
//! - Measuring and ranking them by apparent size
//! - Building a shell-safe `rm -rf` command and copying it to the clipboard

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod shell;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SweeperError};
pub use scanner::{EnvScanner, EnvironmentRecord, IgnoredRecord, ScanOptions, ScanResult};
