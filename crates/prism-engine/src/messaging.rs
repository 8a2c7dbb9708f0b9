//! Message-correlated process starts
//!
//! Starting a sub-process by message is the one true suspension point of
//! the rollout core: the caller hands over a variables map and returns
//! immediately. Completion arrives later as a message the engine
//! correlates back to the waiting parent; nothing here ever blocks on it.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Fire-and-forget process starts through the engine's message API.
#[async_trait]
pub trait ProcessMessenger: Send + Sync {
    /// Start a new process instance for `message_name`, seeding it with
    /// `variables`. Returns the new instance's id.
    async fn start_process_by_message(
        &self,
        message_name: &str,
        variables: BTreeMap<String, Value>,
    ) -> Result<String>;
}
