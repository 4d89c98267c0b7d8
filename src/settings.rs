//! Tool settings
//!
//! Settings are optional: without a settings file the binary is looked up
//! on `PATH` and in [`DEFAULT_FALLBACK_DIRS`], and no version pin applies.

use crate::error::{ComposeCtlError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directories searched after `PATH`; sudo resets `PATH` and drops these
pub const DEFAULT_FALLBACK_DIRS: &[&str] = &["/usr/local/bin"];

/// Settings file name inside the per-user config directory
pub const SETTINGS_FILE: &str = "config.yaml";

/// composectl settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Explicit docker-compose binary, skips discovery
    pub binary: Option<PathBuf>,
    /// Directories searched after `PATH`
    pub fallback_dirs: Vec<PathBuf>,
    /// Expected docker-compose version prefix, e.g. "1.29"
    pub expected_version: Option<String>,
    /// Treat a version mismatch as an error instead of a warning
    pub strict_version: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            binary: None,
            fallback_dirs: DEFAULT_FALLBACK_DIRS.iter().map(PathBuf::from).collect(),
            expected_version: None,
            strict_version: false,
        }
    }
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("composectl").join(SETTINGS_FILE))
    }

    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ComposeCtlError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            ComposeCtlError::InvalidConfig(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load from `path` if given, else from the default location if it exists
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default) if default.is_file() => {
                tracing::debug!(path = %default.display(), "Loading settings");
                Self::load(&default)
            }
            _ => Ok(Self::default()),
        }
    }
}
