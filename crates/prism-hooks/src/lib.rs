//! Prism Hooks - replay-safe lifecycle hook orchestration
//!
//! Computes, and exactly-once dispatches, user-declared lifecycle hooks
//! (pre/post start/stop, idle/live) per module of a rollout, safely across
//! workflow replays.
//!
//! ## Pipeline
//!
//! 1. [`HooksPhaseGetter`] asks the step for its declared hook phases
//!    (a capability with a `[None]` default).
//! 2. [`HooksCalculator`] selects the module hooks whose declared tokens
//!    intersect the step's candidate phases.
//! 3. [`ModuleHooksAggregator`] subtracts hooks already recorded in the
//!    persisted executed-hooks ledger, resolving generic idle/live tokens
//!    from the process's phase variables.
//! 4. [`HookExecutor`] dispatches each remaining hook as a sub-process
//!    started by message correlation - a suspension, not a call/return.
//!
//! ## Key Principle
//!
//! Every decision is re-derived from persisted state on every invocation.
//! No in-memory flag survives a step, so a crashed or paused operation can
//! replay any step without double-running a hook.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod aggregator;
pub mod calculator;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod phases;

// Re-exports
pub use aggregator::ModuleHooksAggregator;
pub use calculator::HooksCalculator;
pub use dispatch::{
    HookExecution, HookExecutor, HookProcessGetter, HookTask, TasksHookExecutor,
    HOOK_TASKS_SUB_PROCESS_ID,
};
pub use error::{HookError, Result};
pub use executor::HooksExecutor;
pub use phases::{HookPhaseProvider, HooksPhaseGetter, Step};
