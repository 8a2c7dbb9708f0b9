//! Historic variable lookup
//!
//! Variables persisted by past process instances outlive those instances.
//! Color detection reads them to reconstruct what a prior blue-green
//! operation decided.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Read-only access to variables of historic process instances.
#[async_trait]
pub trait HistoryService: Send + Sync {
    /// Variable `name` as persisted by process `process_id`, or `None` if
    /// that process never set it.
    async fn historic_variable(&self, process_id: &str, name: &str) -> Result<Option<Value>>;
}
