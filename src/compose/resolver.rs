//! Service selection with dependency expansion
//!
//! Expansion is a single forward pass: the `depends_on` entries of each
//! requested service are added, but dependencies of those dependencies are
//! not followed.

use super::config::ComposeConfig;
use std::collections::BTreeSet;

/// Collect the declared dependencies of the requested services.
///
/// Returns an empty set when `ignore_dependencies` is set. Unknown services
/// contribute nothing.
pub fn dependencies_of(
    config: &ComposeConfig,
    requested: &[String],
    ignore_dependencies: bool,
) -> BTreeSet<String> {
    if ignore_dependencies {
        return BTreeSet::new();
    }

    requested
        .iter()
        .flat_map(|service| config.dependencies(service))
        .collect()
}

/// Requested services plus their direct dependencies.
pub fn effective_services(
    config: &ComposeConfig,
    requested: &[String],
    ignore_dependencies: bool,
) -> BTreeSet<String> {
    let mut services: BTreeSet<String> = requested.iter().cloned().collect();
    services.extend(dependencies_of(config, requested, ignore_dependencies));

    tracing::debug!(
        requested = ?requested,
        effective = ?services,
        "Resolved service selection"
    );

    services
}
