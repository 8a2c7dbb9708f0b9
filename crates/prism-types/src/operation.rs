//! Persisted workflow execution records and process phase markers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of rollout process an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessType {
    Deploy,
    BlueGreenDeploy,
    Undeploy,
}

impl ProcessType {
    pub fn is_blue_green(&self) -> bool {
        matches!(self, ProcessType::BlueGreenDeploy)
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessType::Deploy => write!(f, "DEPLOY"),
            ProcessType::BlueGreenDeploy => write!(f, "BLUE_GREEN_DEPLOY"),
            ProcessType::Undeploy => write!(f, "UNDEPLOY"),
        }
    }
}

/// Execution state of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationState {
    Running,
    Finished,
    Error,
    Aborted,
}

/// Coarse position of a rollout process, persisted as the `PHASE` variable.
///
/// A blue-green operation runs `Deploy` while the idle copy is being built
/// and `AfterResume` once traffic has been switched and the old live copy
/// is being wound down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessPhase {
    Deploy,
    AfterResume,
    Undeploy,
}

/// A persisted workflow execution record.
///
/// Immutable once written, apart from `state` and `has_acquired_lock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Workflow process instance id
    pub process_id: String,

    /// What kind of process this operation runs
    pub process_type: ProcessType,

    /// MTA this operation acts on
    pub mta_id: String,

    /// Target space on the cloud runtime
    pub space_id: String,

    /// Current execution state
    pub state: OperationState,

    /// Whether this operation holds the per-MTA serialization lock
    pub has_acquired_lock: bool,

    /// When the operation started
    pub started_at: chrono::DateTime<chrono::Utc>,
}
