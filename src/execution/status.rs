use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an AI endpoint node's execution.
///
/// `Idle -> Executing -> Completed | Failed`. A new execution may start from
/// any state except `Executing`; a reset returns the node to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    #[default]
    Idle,
    Executing,
    Completed,
    Failed,
}

impl ExecutionStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, ExecutionStatus::Completed | ExecutionStatus::Failed)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionStatus::Idle => "idle",
            ExecutionStatus::Executing => "executing",
            ExecutionStatus::Completed => "completed",
            ExecutionStatus::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}
