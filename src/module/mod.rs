//! Module driver
//!
//! Ties parameter validation, service selection, command assembly, process
//! execution and output classification into a single run.

pub mod outcome;
pub mod params;

pub use outcome::{Message, Outcome};
pub use params::{ModuleParams, ValidatedParams};

use crate::classify::{classify, lines};
use crate::command::{Action, CommandAssembler, CommandPlan};
use crate::compose::{dependencies_of, effective_services};
use crate::error::Result;
use crate::runtime::{find_binary, verify_version, CommandRunner, SystemRunner};
use crate::settings::Settings;
use std::path::PathBuf;

/// Runs docker-compose actions through a [`CommandRunner`]
pub struct ComposeModule<R: CommandRunner> {
    binary: PathBuf,
    runner: R,
}

impl<R: CommandRunner> ComposeModule<R> {
    /// Create a module using `binary` as the docker-compose executable
    pub fn new(binary: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            binary: binary.into(),
            runner,
        }
    }

    /// Assemble the invocations for `params` without running anything
    pub fn plan(&self, params: &ValidatedParams) -> Result<CommandPlan> {
        let dependencies =
            dependencies_of(&params.compose, &params.services, params.ignore_dependencies);
        let services =
            effective_services(&params.compose, &params.services, params.ignore_dependencies);

        tracing::info!(
            action = %params.action,
            services = ?services,
            dependencies = ?dependencies,
            "Selected services"
        );

        CommandAssembler::new(&self.binary)
            .compose_file(&params.location)
            .working_dir(&params.working_dir)
            .assemble(params.action, &params.services, &services, params.remove_volumes)
    }

    /// Run the action described by `params` and classify its output.
    ///
    /// For `stop` and `down` the selection is unpaused first; that step may
    /// fail without affecting the result.
    pub fn run(&self, params: &ValidatedParams) -> Result<Outcome> {
        let plan = self.plan(params)?;
        self.run_plan(params.action, &plan)
    }

    /// Run an already assembled plan for `action` and classify its output
    pub fn run_plan(&self, action: Action, plan: &CommandPlan) -> Result<Outcome> {
        if let Some(ref pre_step) = plan.pre_step {
            match self.runner.run(pre_step) {
                Ok(result) => {
                    tracing::debug!(command = %pre_step, rc = result.rc, "Unpause step finished")
                }
                Err(e) => tracing::warn!(command = %pre_step, error = %e, "Unpause step failed"),
            }
        }

        let execution = self.runner.run(&plan.main)?;
        let classification = classify(
            action,
            &lines(&execution.stderr),
            &lines(&execution.stdout),
        );

        tracing::info!(
            action = %action,
            rc = execution.rc,
            changed = classification.changed,
            failed = classification.failed,
            "docker-compose finished"
        );

        Ok(Outcome::from_execution(execution, classification))
    }
}

/// Run `params` against the real docker-compose.
///
/// Configuration errors are returned before any process is spawned, apart
/// from the optional version check.
pub fn execute(params: ModuleParams, settings: &Settings) -> Result<Outcome> {
    let binary = find_binary(settings)?;
    let validated = params.validate()?;

    let module = ComposeModule::new(binary, SystemRunner);
    let plan = module.plan(&validated)?;
    verify_version(&SystemRunner, &module.binary, settings)?;

    module.run_plan(validated.action, &plan)
}

/// Resolve the binary and assemble the invocations for `params`, running nothing
pub fn dry_run(params: ModuleParams, settings: &Settings) -> Result<CommandPlan> {
    let binary = find_binary(settings)?;
    let validated = params.validate()?;

    ComposeModule::new(binary, SystemRunner).plan(&validated)
}
