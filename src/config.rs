use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::clipboard::BACKEND_NAMES;
use crate::error::{ConfigError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub clipboard: ClipboardConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Descend into hidden directories
    pub include_hidden: bool,
    /// List directories that could not be read
    pub show_ignored: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Copy the command to the clipboard at all
    pub enabled: bool,
    /// Backend: auto, pbcopy, wl-copy, xclip, xsel
    pub backend: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Color mode: auto, always, never
    pub color: String,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: "auto".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: "auto".to_string(),
        }
    }
}

impl Config {
    /// Default location: `$XDG_CONFIG_HOME/venv-sweeper/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("venv-sweeper").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// read if present, otherwise defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Read and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let backend = self.clipboard.backend.as_str();
        if backend != "auto" && !BACKEND_NAMES.contains(&backend) {
            return Err(ConfigError::Invalid(format!(
                "clipboard.backend must be auto or one of {}, got '{}'",
                BACKEND_NAMES.join(", "),
                backend
            )));
        }

        if !matches!(self.output.color.as_str(), "auto" | "always" | "never") {
            return Err(ConfigError::Invalid(format!(
                "output.color must be auto, always or never, got '{}'",
                self.output.color
            )));
        }

        Ok(())
    }
}
