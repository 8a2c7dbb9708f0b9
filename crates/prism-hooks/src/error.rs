//! Hook orchestration error types
//!
//! Everything here is fatal for the current step: the surrounding engine
//! marks the operation failed rather than retrying blindly. No retries
//! happen inside this crate.

use prism_engine::EngineError;
use thiserror::Error;

/// Errors raised while selecting or dispatching hooks.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("Unsupported hook type \"{0}\"")]
    UnsupportedHookType(String),

    #[error("Hook task parameters must not be empty")]
    EmptyHookTaskParameters,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Hook task serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for hook operations
pub type Result<T> = std::result::Result<T, HookError>;
