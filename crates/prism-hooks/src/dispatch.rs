//! Hook dispatch
//!
//! A selected hook becomes a sub-process started by message correlation.
//! Dispatch is fire-and-forget: the step returns "not complete" and the
//! engine resumes it when the sub-process signals the on-complete event.
//! Recording the execution in the ledger happens on that resumption path,
//! not here.

use crate::error::{HookError, Result};
use prism_engine::{
    variables, ProcessContext, ProcessMessenger, ProgressMessage, ProgressMessageService,
};
use prism_types::{Hook, HookPhase};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Process definition started for `"task"` hooks.
pub const HOOK_TASKS_SUB_PROCESS_ID: &str = "executeHookTasksSubProcess";

/// One hook selected for dispatch at a concrete phase.
#[derive(Debug, Clone, PartialEq)]
pub struct HookExecution {
    /// Phase the hook is dispatched for
    pub phase: HookPhase,

    /// The hook, unmutated from the descriptor
    pub hook: Hook,

    /// Message event the sub-process signals when done
    pub on_complete_message_event_name: String,
}

impl HookExecution {
    pub fn new(phase: HookPhase, hook: Hook) -> Self {
        // Unique per (hook, phase) so a replayed step re-correlates with
        // the same event instead of minting a new one.
        let on_complete_message_event_name = format!("{}.{phase}", hook.name);
        Self {
            phase,
            hook,
            on_complete_message_event_name,
        }
    }
}

/// A task executed by the hook tasks sub-process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookTask {
    /// Task name shown in operation logs
    pub name: String,

    /// Command the sub-process runs
    pub command: String,
}

impl HookTask {
    fn from_hook(hook: &Hook) -> Self {
        let name = hook
            .parameters
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(&hook.name)
            .to_owned();
        let command = hook
            .parameters
            .get("command")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        Self { name, command }
    }
}

/// Maps a hook to the sub-process definition that executes it.
pub struct HookProcessGetter {
    context: Arc<dyn ProcessContext>,
    progress_messages: Arc<dyn ProgressMessageService>,
}

impl HookProcessGetter {
    pub fn new(
        context: Arc<dyn ProcessContext>,
        progress_messages: Arc<dyn ProgressMessageService>,
    ) -> Self {
        Self {
            context,
            progress_messages,
        }
    }

    /// Process definition id for `hook`. An unknown hook type is fatal and
    /// leaves a durable ERROR progress message behind, so operators see
    /// the cause even if the raw error is later swallowed.
    pub async fn get_process_definition_id(&self, hook: &Hook) -> Result<&'static str> {
        if hook.kind == "task" {
            return Ok(HOOK_TASKS_SUB_PROCESS_ID);
        }
        let error = HookError::UnsupportedHookType(hook.kind.clone());
        self.progress_messages
            .add(ProgressMessage::error(
                self.context.process_id(),
                self.context.activity_id(),
                error.to_string(),
            ))
            .await?;
        Err(error)
    }
}

/// Starts the hook tasks sub-process for one hook execution.
pub struct TasksHookExecutor {
    context: Arc<dyn ProcessContext>,
    messenger: Arc<dyn ProcessMessenger>,
}

impl TasksHookExecutor {
    pub fn new(context: Arc<dyn ProcessContext>, messenger: Arc<dyn ProcessMessenger>) -> Self {
        Self { context, messenger }
    }

    /// Serialize the hook's task list and start the sub-process by a
    /// message named after the hook phase. Returns the started instance id.
    pub async fn execute_hook(&self, execution: &HookExecution) -> Result<String> {
        if execution.hook.parameters.is_empty() {
            return Err(HookError::EmptyHookTaskParameters);
        }

        let tasks = vec![HookTask::from_hook(&execution.hook)];
        let serialized_tasks = serde_json::to_string(&tasks)?;

        let mut process_variables = BTreeMap::new();
        process_variables.insert(
            variables::ON_COMPLETE_MESSAGE_EVENT_NAME.to_owned(),
            Value::String(execution.on_complete_message_event_name.clone()),
        );
        process_variables.insert(
            variables::PARENT_EXECUTION_ID.to_owned(),
            Value::String(self.context.execution_id().to_owned()),
        );
        process_variables.insert(
            variables::HOOK_TASKS.to_owned(),
            Value::String(serialized_tasks),
        );

        let message_name = execution.phase.to_string();
        let process_instance_id = self
            .messenger
            .start_process_by_message(&message_name, process_variables)
            .await?;

        info!(
            hook = %execution.hook.name,
            phase = %execution.phase,
            %process_instance_id,
            "Hook dispatched"
        );
        Ok(process_instance_id)
    }
}

/// Dispatches a selection of hooks, fatally failing on the first error.
pub struct HookExecutor {
    process_getter: HookProcessGetter,
    tasks_executor: TasksHookExecutor,
}

impl HookExecutor {
    pub fn new(
        context: Arc<dyn ProcessContext>,
        messenger: Arc<dyn ProcessMessenger>,
        progress_messages: Arc<dyn ProgressMessageService>,
    ) -> Self {
        Self {
            process_getter: HookProcessGetter::new(context.clone(), progress_messages),
            tasks_executor: TasksHookExecutor::new(context, messenger),
        }
    }

    /// Dispatch each hook at its phase, in the given (declaration) order.
    pub async fn execute(&self, executions: &[HookExecution]) -> Result<()> {
        for execution in executions {
            let definition_id = self
                .process_getter
                .get_process_definition_id(&execution.hook)
                .await?;
            match definition_id {
                HOOK_TASKS_SUB_PROCESS_ID => {
                    self.tasks_executor.execute_hook(execution).await?;
                }
                other => {
                    // get_process_definition_id only returns known ids
                    return Err(HookError::UnsupportedHookType(other.to_owned()));
                }
            }
        }
        Ok(())
    }
}
