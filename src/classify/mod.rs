//! Output classification
//!
//! Decides whether a docker-compose run changed anything, or failed, by
//! scanning the human-readable text it printed. The markers below are those
//! of docker-compose 1.x; other releases word their output differently, so
//! classification is only as good as the match between the two.

pub mod state;

pub use state::align_service_states;

use crate::command::Action;
use serde::Serialize;

/// Changed/failed flags derived from a run's output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// The action altered system state
    pub changed: bool,
    /// The action did not complete successfully
    pub failed: bool,
}

/// Classify the captured output of `action`.
///
/// Never fails: when no marker line is present both flags stay false.
pub fn classify(action: Action, stderr_lines: &[&str], stdout_lines: &[&str]) -> Classification {
    let mut result = Classification::default();

    match action {
        Action::Up => {
            // `Starting web ... done` is a stopped service being started and
            // counts as changed; running services print `web is up-to-date`
            result.changed = stderr_lines
                .iter()
                .filter(|line| line.starts_with("Starting") || line.starts_with("Creating"))
                .any(|line| !line.ends_with("up-to-date"));
        }
        Action::Pull => {
            result.changed = stdout_lines
                .iter()
                .any(|line| line.contains("Status: Downloaded newer image"));
        }
        Action::Build => {
            result.failed = stderr_lines
                .iter()
                .any(|line| line.contains("failed to build"));
        }
        Action::Stop | Action::Create => {
            result.changed = !stderr_lines.is_empty();
        }
        // start prints nothing that tells a started service from a running one
        Action::Start | Action::Down => {}
        Action::Pause => {
            result.changed = align_service_states(stderr_lines, "Pausing")
                .values()
                .any(|state| !state.ends_with("is already paused"));
        }
        Action::Unpause => {
            result.changed = align_service_states(stderr_lines, "Unpausing")
                .values()
                .any(|state| !state.ends_with("is not paused"));
        }
    }

    result
}

/// Split captured process output into lines
pub fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}
