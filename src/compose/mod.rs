//! Docker Compose file handling
//!
//! Loading of compose files and selection of the services an action
//! applies to.

pub mod config;
pub mod parser;
pub mod resolver;

pub use config::{ComposeConfig, ServiceConfig};
pub use parser::ComposeParser;
pub use resolver::{dependencies_of, effective_services};
