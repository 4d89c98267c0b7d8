//! External process execution

use crate::command::Invocation;
use crate::error::Result;
use serde::Serialize;
use std::process::Command;

/// Captured result of one process invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Exit code, -1 when the process was killed by a signal
    pub rc: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ExecutionResult {
    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.rc == 0
    }
}

/// Runs invocations to completion and captures their output
pub trait CommandRunner {
    /// Run `invocation`, blocking until it exits.
    ///
    /// A non-zero exit is not an error; only failure to spawn is.
    fn run(&self, invocation: &Invocation) -> Result<ExecutionResult>;
}

/// Runs invocations as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExecutionResult> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(ref dir) = invocation.working_dir {
            command.current_dir(dir);
        }

        tracing::debug!(command = %invocation, "Running");
        let output = command.output()?;

        let result = ExecutionResult {
            rc: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(command = %invocation, rc = result.rc, "Finished");
        Ok(result)
    }
}
