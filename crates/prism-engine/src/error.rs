//! Engine seam error types

use thiserror::Error;

/// Errors crossing the workflow-engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Variable \"{name}\" could not be read: {reason}")]
    Variable { name: String, reason: String },

    #[error("Message-based process start failed for \"{message_name}\": {reason}")]
    Messaging {
        message_name: String,
        reason: String,
    },
}

/// Result type for engine seam operations
pub type Result<T> = std::result::Result<T, EngineError>;
