//! Process runtime
//!
//! The only place where external processes are spawned: locating
//! docker-compose, checking its version, and running invocations.

pub mod discovery;
pub mod executor;

pub use discovery::{find_binary, verify_version, COMPOSE_BINARY};
pub use executor::{CommandRunner, ExecutionResult, SystemRunner};
