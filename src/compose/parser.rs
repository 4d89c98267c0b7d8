//! Docker Compose file parser

use super::config::ComposeConfig;
use crate::error::{ComposeCtlError, Result};
use std::path::Path;

/// Compose file parser
pub struct ComposeParser;

impl ComposeParser {
    /// Parse compose file from path
    pub fn parse_file(path: &Path) -> Result<ComposeConfig> {
        if !path.is_file() {
            return Err(ComposeCtlError::InvalidLocation(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ComposeCtlError::ComposeParse(format!("Failed to read file: {}", e)))?;

        Self::parse_str(&content)
    }

    /// Parse compose file from string
    pub fn parse_str(content: &str) -> Result<ComposeConfig> {
        serde_yaml::from_str(content)
            .map_err(|e| ComposeCtlError::ComposeParse(format!("Failed to parse YAML: {}", e)))
    }
}
