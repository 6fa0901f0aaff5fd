use serde::Serialize;
use std::path::PathBuf;

/// A directory that directly contains a `pyvenv.cfg` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentRecord {
    /// Absolute path to the environment root
    pub path: PathBuf,

    /// Apparent size in bytes of every regular file beneath `path`
    pub size: u64,
}

/// A directory the scanner could not list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredRecord {
    /// Directory that could not be read
    pub path: PathBuf,

    /// Human-readable cause (e.g. "Permission denied (os error 13)")
    pub reason: String,
}

/// Everything collected by a single scan, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub environments: Vec<EnvironmentRecord>,
    pub ignored: Vec<IgnoredRecord>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}
