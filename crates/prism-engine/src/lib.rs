//! Prism Engine Seams - traits over the durable workflow engine
//!
//! The rollout core never talks to a concrete workflow engine. Everything
//! it needs - the current process's variables, historic variables of
//! finished operations, the operation history, message-correlated process
//! starts, and durable progress messages - goes through the traits in this
//! crate.
//!
//! ## In-Memory vs Persistent
//!
//! The crate provides in-memory implementations suitable for development
//! and testing. Production deployments wire in adapters over the real
//! engine (Flowable, Temporal, etc.) that implement the same traits.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod context;
pub mod error;
pub mod history;
pub mod memory;
pub mod messaging;
pub mod operations;
pub mod progress;
pub mod variables;

// Re-exports
pub use context::{ProcessContext, ProcessContextExt};
pub use error::{EngineError, Result};
pub use history::HistoryService;
pub use memory::{
    InMemoryHistoryService, InMemoryOperationService, InMemoryProcessContext,
    InMemoryProcessMessenger, InMemoryProgressMessageService, StartedProcess,
};
pub use messaging::ProcessMessenger;
pub use operations::OperationService;
pub use progress::{ProgressMessage, ProgressMessageService, ProgressMessageType};
