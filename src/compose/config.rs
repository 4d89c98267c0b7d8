//! Docker Compose configuration types
//!
//! Only the parts of the compose schema that service selection needs are
//! modelled; every other key is accepted and ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Docker Compose file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Compose file version
    #[serde(default)]
    pub version: Option<String>,
    /// Project name
    #[serde(default)]
    pub name: Option<String>,
    /// Services
    #[serde(default)]
    pub services: HashMap<String, ServiceConfig>,
}

impl ComposeConfig {
    /// Declared dependencies of a service, empty for unknown services
    pub fn dependencies(&self, service: &str) -> Vec<String> {
        self.services
            .get(service)
            .and_then(|s| s.depends_on.as_ref())
            .map(DependsOnConfig::names)
            .unwrap_or_default()
    }
}

/// Service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Image name
    #[serde(default)]
    pub image: Option<String>,
    /// Service dependencies
    #[serde(default)]
    pub depends_on: Option<DependsOnConfig>,
}

/// Depends on configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependsOnConfig {
    /// Array of service names
    Array(Vec<String>),
    /// Map of service to condition
    Map(HashMap<String, DependsOnCondition>),
}

impl DependsOnConfig {
    /// Names of the services depended upon
    pub fn names(&self) -> Vec<String> {
        match self {
            DependsOnConfig::Array(arr) => arr.clone(),
            DependsOnConfig::Map(map) => map.keys().cloned().collect(),
        }
    }
}

/// Depends on condition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependsOnCondition {
    /// Condition to wait for
    #[serde(default)]
    pub condition: Option<String>,
}
