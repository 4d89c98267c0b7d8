//! Module result record

use crate::classify::Classification;
use crate::error::ComposeCtlError;
use crate::runtime::ExecutionResult;
use serde::Serialize;

/// Message reported when classification marks a run as failed
pub const FAILED_MESSAGE: &str = "Build Failed.";

/// Diagnostic message of an [`Outcome`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Message {
    /// `[stderr line count, changed, failed]`
    Summary(usize, bool, bool),
    /// Free-form text
    Text(String),
}

/// Result of one module run, serialized for the calling framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Exit code of the main invocation, absent when nothing ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc: Option<i32>,
    /// The action altered system state
    pub changed: bool,
    /// The action did not complete successfully
    pub failed: bool,
    /// Diagnostic message
    pub msg: Message,
    /// Captured standard output
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    /// Captured standard error
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

impl Outcome {
    /// Build the outcome of a completed run
    pub fn from_execution(execution: ExecutionResult, classification: Classification) -> Self {
        let msg = if classification.failed {
            Message::Text(FAILED_MESSAGE.to_string())
        } else {
            Message::Summary(
                execution.stderr.lines().count(),
                classification.changed,
                classification.failed,
            )
        };

        Self {
            rc: Some(execution.rc),
            changed: classification.changed,
            failed: classification.failed,
            msg,
            stdout: execution.stdout,
            stderr: execution.stderr,
        }
    }

    /// Build the outcome of a run rejected before anything executed
    pub fn from_error(error: &ComposeCtlError) -> Self {
        Self {
            rc: None,
            changed: false,
            failed: true,
            msg: Message::Text(error.to_string()),
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}
