//! Command line assembly
//!
//! Turns an action and a service selection into the docker-compose
//! invocations to run. Nothing here touches the process table.

use super::action::Action;
use crate::error::{ComposeCtlError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A single external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute
    pub program: PathBuf,
    /// Arguments (excluding the program)
    pub args: Vec<String>,
    /// Working directory for the process
    pub working_dir: Option<PathBuf>,
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Invocations needed to carry out one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    /// Best-effort step run first; its result is not checked
    pub pre_step: Option<Invocation>,
    /// The invocation whose output decides the outcome
    pub main: Invocation,
}

/// Builds docker-compose command lines
#[derive(Debug, Clone)]
pub struct CommandAssembler {
    binary: PathBuf,
    compose_file: Option<PathBuf>,
    working_dir: Option<PathBuf>,
}

impl CommandAssembler {
    /// Create an assembler for the given docker-compose binary
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            compose_file: None,
            working_dir: None,
        }
    }

    /// Pass the compose file explicitly with `-f`
    pub fn compose_file(mut self, path: &Path) -> Self {
        self.compose_file = Some(path.to_path_buf());
        self
    }

    /// Run the invocations from this directory
    pub fn working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Assemble the plan for `action`.
    ///
    /// `requested` is the explicit service list given by the caller and
    /// `services` the effective selection after dependency expansion.
    pub fn assemble(
        &self,
        action: Action,
        requested: &[String],
        services: &BTreeSet<String>,
        remove_volumes: bool,
    ) -> Result<CommandPlan> {
        if !action.accepts_services() && !requested.is_empty() {
            return Err(ComposeCtlError::InvalidArguments(
                "You cannot specify the command as down and a number of services".to_string(),
            ));
        }

        let pre_step = if action.unpauses_first() {
            let mut args = vec![Action::Unpause.verb().to_string()];
            args.extend(services.iter().cloned());
            Some(self.invocation(args))
        } else {
            None
        };

        let mut args = vec![action.verb().to_string()];
        if action == Action::Up {
            args.push("-d".to_string());
        }

        if action.accepts_services() {
            args.extend(services.iter().cloned());
        } else if remove_volumes {
            args.push("-v".to_string());
        }

        let plan = CommandPlan {
            pre_step,
            main: self.invocation(args),
        };

        tracing::debug!(command = %plan.main, "Assembled docker-compose command");
        Ok(plan)
    }

    fn invocation(&self, verb_args: Vec<String>) -> Invocation {
        let mut args = Vec::with_capacity(verb_args.len() + 2);
        if let Some(ref file) = self.compose_file {
            args.push("-f".to_string());
            args.push(file.display().to_string());
        }
        args.extend(verb_args);

        Invocation {
            program: self.binary.clone(),
            args,
            working_dir: self.working_dir.clone(),
        }
    }
}
