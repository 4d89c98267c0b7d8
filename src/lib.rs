//! composectl - idempotent docker-compose runner
//!
//! composectl drives the `docker-compose` CLI on behalf of configuration
//! management tooling and reports whether a run changed anything:
//!
//! - Service selection with `depends_on` expansion
//! - Command assembly for up, down, start, stop, pause, unpause, pull,
//!   create and build
//! - Changed/failed classification from the CLI's output

pub mod classify;
pub mod command;
pub mod compose;
pub mod error;
pub mod module;
pub mod runtime;
pub mod settings;

pub use error::{ComposeCtlError, Result};
