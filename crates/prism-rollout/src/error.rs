//! Rollout error types

use prism_engine::EngineError;
use thiserror::Error;

/// Errors raised while deriving rollout state.
#[derive(Debug, Error)]
pub enum RolloutError {
    /// Applications of one MTA imply more than one color. Never resolved
    /// by heuristic; the deployment is in a state an operator must untangle.
    #[error("Deployed MTA \"{mta_id}\" contains applications of multiple colors")]
    ColorConflict { mta_id: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for rollout operations
pub type Result<T> = std::result::Result<T, RolloutError>;
