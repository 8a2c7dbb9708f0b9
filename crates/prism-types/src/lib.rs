//! Prism Types - Core types for blue-green rollout orchestration
//!
//! Prism orchestrates zero-downtime rollouts of multi-module applications
//! (MTAs) on a cloud runtime, driven by a durable, resumable workflow
//! engine. This crate holds the shared data model:
//!
//! - **DeployedMta**: read-only snapshot of what is currently running
//! - **ApplicationColor**: the blue/green axis, always derived, never stored
//! - **Module/Hook**: immutable descriptor fragments declaring lifecycle hooks
//! - **HookPhase**: the closed vocabulary of lifecycle junctures
//! - **ExecutedHooksLedger**: the persisted idempotency record for hooks
//! - **Operation**: a persisted workflow execution record
//!
//! ## Key Principle
//!
//! Nothing here caches transient state. Every decision the rollout core
//! makes is re-derived from these persisted records, so any workflow step
//! can be replayed after a crash or pause without double-running hooks.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod color;
pub mod descriptor;
pub mod hook_phase;
pub mod ledger;
pub mod mta;
pub mod operation;
pub mod step;

// Re-export main types
pub use color::ApplicationColor;
pub use descriptor::{Hook, Module};
pub use hook_phase::{HookPhase, HookPhaseTarget};
pub use ledger::ExecutedHooksLedger;
pub use mta::{DeployedMta, DeployedMtaApplication, MtaMetadata, ProductizationState};
pub use operation::{Operation, OperationState, ProcessPhase, ProcessType};
pub use step::StepPhase;
