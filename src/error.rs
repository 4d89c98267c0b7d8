//! Error types for composectl

use thiserror::Error;

/// Result type for composectl operations
pub type Result<T> = std::result::Result<T, ComposeCtlError>;

/// composectl error types
#[derive(Error, Debug)]
pub enum ComposeCtlError {
    #[error("docker-compose binary not found")]
    BinaryNotFound,

    #[error("Location does not exist. Enter full path and compose filename: {0}")]
    InvalidLocation(String),

    #[error("YAML cannot be decoded: {0}")]
    ComposeParse(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("docker-compose version {found} does not match expected {expected}")]
    VersionMismatch { expected: String, found: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ComposeCtlError {
    /// Whether this error was raised before any process ran
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ComposeCtlError::BinaryNotFound
                | ComposeCtlError::InvalidLocation(_)
                | ComposeCtlError::ComposeParse(_)
                | ComposeCtlError::InvalidArguments(_)
                | ComposeCtlError::InvalidConfig(_)
                | ComposeCtlError::VersionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(ComposeCtlError::BinaryNotFound.is_configuration());
        assert!(ComposeCtlError::InvalidArguments("down".to_string()).is_configuration());

        let io = ComposeCtlError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(!io.is_configuration());
    }
}
