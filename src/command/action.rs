//! Compose actions

use serde::{Deserialize, Serialize};

/// A docker-compose verb this tool knows how to run and classify
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Create and start containers (always detached)
    #[default]
    Up,
    /// Stop and remove containers, networks and optionally volumes
    Down,
    /// Start existing containers
    Start,
    /// Stop running containers
    Stop,
    /// Pause running containers
    Pause,
    /// Unpause paused containers
    Unpause,
    /// Pull service images
    Pull,
    /// Create containers without starting them
    Create,
    /// Build service images
    Build,
}

impl Action {
    /// All actions, in declaration order
    pub const ALL: [Action; 9] = [
        Action::Up,
        Action::Down,
        Action::Start,
        Action::Stop,
        Action::Pause,
        Action::Unpause,
        Action::Pull,
        Action::Create,
        Action::Build,
    ];

    /// The docker-compose subcommand
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Pause => "pause",
            Action::Unpause => "unpause",
            Action::Pull => "pull",
            Action::Create => "create",
            Action::Build => "build",
        }
    }

    /// Whether containers are unpaused before this action runs
    pub fn unpauses_first(&self) -> bool {
        matches!(self, Action::Stop | Action::Down)
    }

    /// Whether the action accepts an explicit service list
    pub fn accepts_services(&self) -> bool {
        !matches!(self, Action::Down)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.verb())
    }
}
