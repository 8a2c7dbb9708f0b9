//! Operation history queries

use crate::error::Result;
use async_trait::async_trait;
use prism_types::Operation;

/// Query access to persisted operation records.
#[async_trait]
pub trait OperationService: Send + Sync {
    /// All operations recorded for `mta_id`, most recent first.
    async fn operations_for_mta(&self, mta_id: &str) -> Result<Vec<Operation>>;

    /// The operation that owns process `process_id`, if any.
    async fn find_operation(&self, process_id: &str) -> Result<Option<Operation>>;

    /// Record a new operation.
    async fn add(&self, operation: Operation) -> Result<()>;
}
