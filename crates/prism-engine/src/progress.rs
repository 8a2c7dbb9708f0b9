//! Durable progress messages
//!
//! Operators read these, not stack traces. Fatal conditions persist an
//! ERROR message before raising so the cause survives even if the raw
//! error is later swallowed by the engine.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a progress message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressMessageType {
    Info,
    Warning,
    Error,
}

/// One durable, operator-visible progress record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressMessage {
    /// Unique message id
    pub id: Uuid,

    /// Process the message belongs to
    pub process_id: String,

    /// Activity (step) that produced the message
    pub task_id: String,

    /// Severity
    pub message_type: ProgressMessageType,

    /// Human-readable text
    pub text: String,

    /// When the message was recorded
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ProgressMessage {
    /// Build an ERROR message for the given process/task.
    pub fn error(process_id: &str, task_id: &str, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            process_id: process_id.to_owned(),
            task_id: task_id.to_owned(),
            message_type: ProgressMessageType::Error,
            text: text.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Durable sink for progress messages.
#[async_trait]
pub trait ProgressMessageService: Send + Sync {
    /// Persist a message.
    async fn add(&self, message: ProgressMessage) -> Result<()>;
}
