use serde::{Deserialize, Serialize};

/// Believed status of the external process, as seen by the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Stopped,
    /// Start requested, waiting for the controller to confirm
    Starting,
    Running,
}

impl RunState {
    /// Whether a process is (or is about to be) alive
    pub fn is_active(self) -> bool {
        !matches!(self, RunState::Stopped)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Stopped => write!(f, "stopped"),
            RunState::Starting => write!(f, "starting"),
            RunState::Running => write!(f, "running"),
        }
    }
}
