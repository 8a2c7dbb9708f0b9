//! Step invocation phases
//!
//! A workflow step may be invoked several times: once to do its work, then
//! repeatedly to poll an async outcome, and a final time when done. Hooks
//! bind to the edges of that window, never to the polling middle.

use serde::{Deserialize, Serialize};

/// Position within one (possibly multi-invocation) step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepPhase {
    Execute,
    Poll,
    Done,
}
