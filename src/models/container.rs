// Container liveness as seen by the container runtime

use serde::{Deserialize, Serialize};

/// Classified liveness of the named container; serializes as "Running", "Stopped" or "NotFound".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContainerStatus {
    Running,
    Stopped,
    #[default]
    NotFound,
}

impl ContainerStatus {
    /// From the inspect API's `State.Running` flag. A container without state is treated as stopped.
    pub fn from_running_flag(running: Option<bool>) -> Self {
        match running {
            Some(true) => ContainerStatus::Running,
            _ => ContainerStatus::Stopped,
        }
    }

    /// From a list-API status string such as "Up 3 hours" or "Exited (0) 2 minutes ago".
    pub fn from_status_text(status: &str) -> Self {
        let prefix = status.trim_start().get(..2);
        if prefix.is_some_and(|p| p.eq_ignore_ascii_case("up")) {
            ContainerStatus::Running
        } else {
            ContainerStatus::Stopped
        }
    }
}
