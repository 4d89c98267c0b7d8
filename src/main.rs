//! composectl - idempotent docker-compose runner
//!
//! This is the main CLI entry point. The result of a run is printed to
//! stdout as a single JSON object; logs go to stderr.

use clap::Parser;
use composectl::command::{Action, CommandPlan};
use composectl::error::ComposeCtlError;
use composectl::module::{self, ModuleParams, Outcome};
use composectl::settings::Settings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// composectl - run docker-compose and report whether anything changed
#[derive(Parser)]
#[command(name = "composectl")]
#[command(author = "Evoker Industries")]
#[command(version)]
#[command(about = "Run docker-compose idempotently and report changed/failed state", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Settings file (defaults to the per-user composectl config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON arguments file holding the module parameters
    #[arg(long, conflicts_with_all = ["location", "service", "command", "ignore_dependencies", "keep_volumes"])]
    args: Option<PathBuf>,

    /// Absolute path to the compose file
    #[arg(short, long, required_unless_present = "args")]
    location: Option<PathBuf>,

    /// Service to act on (repeatable); all services when omitted
    #[arg(short, long)]
    service: Vec<String>,

    /// Action to run
    #[arg(short, long, value_enum)]
    command: Option<Action>,

    /// Do not add `depends_on` services to the selection
    #[arg(long)]
    ignore_dependencies: bool,

    /// Keep named volumes on `down`
    #[arg(long)]
    keep_volumes: bool,

    /// Print the docker-compose invocations without running them
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn params(&self) -> composectl::Result<ModuleParams> {
        if let Some(ref path) = self.args {
            return ModuleParams::from_file(path);
        }

        let location = self.location.clone().ok_or_else(|| {
            ComposeCtlError::InvalidArguments("--location is required without --args".to_string())
        })?;

        let mut params = ModuleParams::new(location, self.command.unwrap_or_default());
        params.services = self.service.clone();
        params.ignore_dependencies = self.ignore_dependencies;
        params.remove_volumes = !self.keep_volumes;
        Ok(params)
    }
}

/// What a run prints on stdout
enum Report {
    /// Result of an executed action
    Outcome(Outcome),
    /// Invocations of a dry run
    Plan(CommandPlan),
}

fn run(cli: &Cli) -> composectl::Result<Report> {
    let params = cli.params()?;
    let settings = Settings::resolve(cli.config.as_deref())?;

    if cli.dry_run {
        return module::dry_run(params, &settings).map(Report::Plan);
    }

    module::execute(params, &settings).map(Report::Outcome)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match run(&cli) {
        Ok(Report::Plan(plan)) => {
            if let Some(pre_step) = plan.pre_step {
                println!("{}", pre_step);
            }
            println!("{}", plan.main);
            return Ok(());
        }
        Ok(Report::Outcome(outcome)) => outcome,
        Err(e) => {
            tracing::error!(error = %e, configuration = e.is_configuration(), "Run aborted");
            Outcome::from_error(&e)
        }
    };

    println!("{}", serde_json::to_string(&outcome)?);

    if outcome.failed {
        std::process::exit(1);
    }

    Ok(())
}
