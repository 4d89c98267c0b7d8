//! docker-compose command construction

pub mod action;
pub mod assembler;

pub use action::Action;
pub use assembler::{CommandAssembler, CommandPlan, Invocation};
