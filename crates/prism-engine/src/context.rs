//! Process context - typed variable access for the running step
//!
//! The context is the step's window onto the variables persisted for its
//! process instance. Reads always reflect durable state: a replayed step
//! on another worker sees exactly what the crashed one had persisted.

use crate::error::{EngineError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// The running process instance, as visible to one step.
#[async_trait]
pub trait ProcessContext: Send + Sync {
    /// Process instance id (equals the operation's process id).
    fn process_id(&self) -> &str;

    /// Id of the current execution within the process.
    fn execution_id(&self) -> &str;

    /// Id of the activity (step definition) currently running.
    fn activity_id(&self) -> &str;

    /// Read a raw variable; `None` when it was never set.
    async fn get_variable(&self, name: &str) -> Option<Value>;

    /// Persist a raw variable.
    async fn set_variable(&self, name: &str, value: Value);
}

/// Typed variable access on any process context.
#[async_trait]
pub trait ProcessContextExt: ProcessContext {
    /// Read a variable and deserialize it. A missing variable is `Ok(None)`;
    /// a present but malformed one is an error, never a panic.
    async fn get_typed<T: DeserializeOwned + Send>(&self, name: &str) -> Result<Option<T>> {
        match self.get_variable(name).await {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| EngineError::Variable {
                    name: name.to_owned(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Serialize and persist a variable.
    async fn set_typed<T: Serialize + Sync>(&self, name: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|e| EngineError::Variable {
            name: name.to_owned(),
            reason: e.to_string(),
        })?;
        self.set_variable(name, value).await;
        Ok(())
    }
}

impl<C: ProcessContext + ?Sized> ProcessContextExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryProcessContext;
    use prism_types::ApplicationColor;

    #[tokio::test]
    async fn test_typed_round_trip() {
        let ctx = InMemoryProcessContext::new("op-1");

        ctx.set_typed("idleMtaColor", &ApplicationColor::Green)
            .await
            .unwrap();
        let color: Option<ApplicationColor> = ctx.get_typed("idleMtaColor").await.unwrap();
        assert_eq!(color, Some(ApplicationColor::Green));
    }

    #[tokio::test]
    async fn test_missing_variable_is_none() {
        let ctx = InMemoryProcessContext::new("op-1");
        let color: Option<ApplicationColor> = ctx.get_typed("idleMtaColor").await.unwrap();
        assert_eq!(color, None);
    }

    #[tokio::test]
    async fn test_malformed_variable_is_error_not_panic() {
        let ctx = InMemoryProcessContext::new("op-1");
        ctx.set_variable("idleMtaColor", serde_json::json!(42)).await;
        let result: Result<Option<ApplicationColor>> = ctx.get_typed("idleMtaColor").await;
        assert!(matches!(result, Err(EngineError::Variable { .. })));
    }
}
