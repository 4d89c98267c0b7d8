//! Per-service terminal state extraction
//!
//! docker-compose v1 reports progress as `<Verb>ing <service> ... <status>`
//! lines on stderr, followed by free-form `ERROR: ...` lines for failures.

use std::collections::BTreeMap;

/// Status recorded for a service whose line ended in `done`
pub const DONE: &str = "done";

/// Map each service mentioned in a completed `prefix` line to its terminal status.
///
/// Lines still in progress (ending in `...`) are skipped. A line ending in
/// `done` maps to [`DONE`]; a line ending in `error` maps to the text of the
/// `ERROR` line that names the service. Services with an error line but no
/// matching `ERROR` text are left out.
pub fn align_service_states(lines: &[&str], prefix: &str) -> BTreeMap<String, String> {
    let progress: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| line.starts_with(prefix) && !line.trim().ends_with("..."))
        .collect();
    let errors: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| line.starts_with("ERROR"))
        .collect();

    let mut states = BTreeMap::new();

    for service in progress
        .iter()
        .copied()
        .filter(|line| line.ends_with("error"))
        .filter_map(service_name)
    {
        for error in errors.iter().filter(|e| e.contains(service)) {
            states.insert(service.to_string(), error.to_string());
        }
    }

    for service in progress
        .iter()
        .copied()
        .filter(|line| line.ends_with(DONE))
        .filter_map(service_name)
    {
        states.insert(service.to_string(), DONE.to_string());
    }

    states
}

fn service_name(line: &str) -> Option<&str> {
    line.split_whitespace().nth(1)
}
