//! Well-known workflow variable names
//!
//! Variables are the only shared mutable state a rollout process owns.
//! Names are stable wire identifiers; renaming one breaks resumption of
//! in-flight operations.

/// Color parked as idle by a prior blue-green operation.
pub const IDLE_MTA_COLOR: &str = "idleMtaColor";

/// Color serving productive traffic, written for the resuming step.
pub const LIVE_MTA_COLOR: &str = "liveMtaColor";

/// Coarse process position, a [`prism_types::ProcessPhase`].
pub const PHASE: &str = "phase";

/// Phase of the innermost running sub-process; takes precedence over
/// [`PHASE`] when resolving generic hook tokens.
pub const SUBPROCESS_PHASE: &str = "subProcessPhase";

/// The executed-hooks ledger, a [`prism_types::ExecutedHooksLedger`].
pub const EXECUTED_HOOKS: &str = "executedHooks";

/// Descriptor module the current step deploys, a [`prism_types::Module`].
pub const MODULE_TO_DEPLOY: &str = "moduleToDeploy";

/// Message event a hook sub-process signals on completion.
pub const ON_COMPLETE_MESSAGE_EVENT_NAME: &str = "onCompleteMessageEventName";

/// Execution id of the step that dispatched a hook sub-process.
pub const PARENT_EXECUTION_ID: &str = "parentExecutionId";

/// Serialized task list handed to the hook tasks sub-process.
pub const HOOK_TASKS: &str = "hookTasks";

/// Process type of the running operation, a [`prism_types::ProcessType`].
pub const PROCESS_TYPE: &str = "processType";
