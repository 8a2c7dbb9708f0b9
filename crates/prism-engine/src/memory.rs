//! In-memory implementations of the engine seams
//!
//! These are suitable for development and testing. Production deployments
//! wire in adapters over the real workflow engine.

use crate::context::ProcessContext;
use crate::error::{EngineError, Result};
use crate::history::HistoryService;
use crate::messaging::ProcessMessenger;
use crate::operations::OperationService;
use crate::progress::{ProgressMessage, ProgressMessageService};
use async_trait::async_trait;
use dashmap::DashMap;
use prism_types::Operation;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// In-memory process context
pub struct InMemoryProcessContext {
    process_id: String,
    execution_id: String,
    activity_id: String,
    variables: DashMap<String, Value>,
}

impl InMemoryProcessContext {
    pub fn new(process_id: impl Into<String>) -> Self {
        let process_id = process_id.into();
        Self {
            execution_id: format!("{process_id}/execution"),
            activity_id: "step".to_owned(),
            process_id,
            variables: DashMap::new(),
        }
    }

    /// Builder-style variable seeding for tests and local setups.
    pub fn with_variable(self, name: &str, value: Value) -> Self {
        self.variables.insert(name.to_owned(), value);
        self
    }

    pub fn with_activity_id(mut self, activity_id: impl Into<String>) -> Self {
        self.activity_id = activity_id.into();
        self
    }
}

#[async_trait]
impl ProcessContext for InMemoryProcessContext {
    fn process_id(&self) -> &str {
        &self.process_id
    }

    fn execution_id(&self) -> &str {
        &self.execution_id
    }

    fn activity_id(&self) -> &str {
        &self.activity_id
    }

    async fn get_variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name).map(|v| v.clone())
    }

    async fn set_variable(&self, name: &str, value: Value) {
        self.variables.insert(name.to_owned(), value);
    }
}

/// In-memory historic variable store
#[derive(Default)]
pub struct InMemoryHistoryService {
    variables: DashMap<(String, String), Value>,
}

impl InMemoryHistoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a variable as if process `process_id` had persisted it.
    pub fn put(&self, process_id: &str, name: &str, value: Value) {
        self.variables
            .insert((process_id.to_owned(), name.to_owned()), value);
    }
}

#[async_trait]
impl HistoryService for InMemoryHistoryService {
    async fn historic_variable(&self, process_id: &str, name: &str) -> Result<Option<Value>> {
        Ok(self
            .variables
            .get(&(process_id.to_owned(), name.to_owned()))
            .map(|v| v.clone()))
    }
}

/// In-memory operation history
#[derive(Default)]
pub struct InMemoryOperationService {
    operations: DashMap<String, Operation>,
}

impl InMemoryOperationService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OperationService for InMemoryOperationService {
    async fn operations_for_mta(&self, mta_id: &str) -> Result<Vec<Operation>> {
        let mut result: Vec<Operation> = self
            .operations
            .iter()
            .filter(|entry| entry.value().mta_id == mta_id)
            .map(|entry| entry.value().clone())
            .collect();
        result.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(result)
    }

    async fn find_operation(&self, process_id: &str) -> Result<Option<Operation>> {
        Ok(self.operations.get(process_id).map(|o| o.clone()))
    }

    async fn add(&self, operation: Operation) -> Result<()> {
        self.operations
            .insert(operation.process_id.clone(), operation);
        Ok(())
    }
}

/// One recorded message-correlated process start.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedProcess {
    /// Id assigned to the started instance
    pub process_instance_id: String,

    /// Message the start was correlated on
    pub message_name: String,

    /// Variables the instance was seeded with
    pub variables: BTreeMap<String, Value>,
}

/// In-memory process messenger that records every start for assertion.
#[derive(Default)]
pub struct InMemoryProcessMessenger {
    started: Mutex<Vec<StartedProcess>>,
    rejected: Mutex<BTreeSet<String>>,
}

impl InMemoryProcessMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make starts correlated on `message_name` fail, the way a real engine
    /// rejects a message with no matching start event.
    pub fn rejecting(self, message_name: &str) -> Self {
        if let Ok(mut rejected) = self.rejected.lock() {
            rejected.insert(message_name.to_owned());
        }
        self
    }

    /// Everything started so far, in dispatch order.
    pub fn started_processes(&self) -> Vec<StartedProcess> {
        self.started.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ProcessMessenger for InMemoryProcessMessenger {
    async fn start_process_by_message(
        &self,
        message_name: &str,
        variables: BTreeMap<String, Value>,
    ) -> Result<String> {
        let rejected = self
            .rejected
            .lock()
            .map(|r| r.contains(message_name))
            .unwrap_or(false);
        if rejected {
            return Err(EngineError::Messaging {
                message_name: message_name.to_owned(),
                reason: "no matching message start event".to_owned(),
            });
        }
        let process_instance_id = Uuid::new_v4().to_string();
        debug!(message_name, %process_instance_id, "Starting process by message");
        if let Ok(mut started) = self.started.lock() {
            started.push(StartedProcess {
                process_instance_id: process_instance_id.clone(),
                message_name: message_name.to_owned(),
                variables,
            });
        }
        Ok(process_instance_id)
    }
}

/// In-memory progress message sink.
#[derive(Default)]
pub struct InMemoryProgressMessageService {
    messages: Mutex<Vec<ProgressMessage>>,
}

impl InMemoryProgressMessageService {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, in order.
    pub fn messages(&self) -> Vec<ProgressMessage> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ProgressMessageService for InMemoryProgressMessageService {
    async fn add(&self, message: ProgressMessage) -> Result<()> {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
        Ok(())
    }
}
