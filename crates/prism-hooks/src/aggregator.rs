//! Ledger subtraction per module
//!
//! The aggregator turns candidate hooks into hooks that still owe an
//! execution: it reconstructs the executed-hooks ledger from the persisted
//! process variables on every call (a replayed step may run on a different
//! worker) and keeps a hook only while some candidate phase of it is not
//! yet recorded. Generic `application.*` tokens are resolved to their
//! concrete idle/live form from the running process's phase variables
//! before the ledger comparison.

use crate::error::Result;
use prism_engine::{variables, ProcessContext, ProcessContextExt};
use prism_types::{
    ExecutedHooksLedger, Hook, HookPhase, HookPhaseTarget, Module, ProcessPhase, ProcessType,
};
use std::sync::Arc;
use tracing::debug;

/// Per-module hook aggregation over the persisted ledger.
pub struct ModuleHooksAggregator {
    context: Arc<dyn ProcessContext>,
    module: Module,
}

impl ModuleHooksAggregator {
    pub fn new(context: Arc<dyn ProcessContext>, module: Module) -> Self {
        Self { context, module }
    }

    /// Hooks of the module that intersect `current_phases` and still have a
    /// pending phase, in declaration order, each returned unmutated.
    ///
    /// A (module, hook, phase) already in the ledger is never re-selected,
    /// but a hook with another phase still pending is.
    pub async fn aggregate_hooks(&self, current_phases: &[HookPhase]) -> Result<Vec<Hook>> {
        let target = self.resolution_target().await?;
        let ledger = self.executed_hooks().await?;

        let mut selected = Vec::new();
        for hook in &self.module.hooks {
            let executed = ledger.phases_for(&self.module.name, &hook.name);
            let mut intersects = false;
            let mut pending = false;

            for token in &hook.phases {
                let Some(phase) = HookPhase::from_token(token) else {
                    continue;
                };
                let resolved = match target {
                    Some(target) if phase.is_generic() => phase.for_target(target),
                    _ => phase,
                };
                if !current_phases.contains(&phase) && !current_phases.contains(&resolved) {
                    continue;
                }
                intersects = true;
                let resolved_token = resolved.token().unwrap_or(token.as_str());
                if !executed.contains(resolved_token) {
                    pending = true;
                    break;
                }
            }

            if intersects && pending {
                selected.push(hook.clone());
            } else if intersects {
                debug!(
                    module = %self.module.name,
                    hook = %hook.name,
                    "All candidate phases already executed, skipping hook"
                );
            }
        }
        Ok(selected)
    }

    /// Idle/live target for resolving generic phase tokens, derived from
    /// the process type and phase variables. `None` means no resolution:
    /// generic tokens are then compared against the ledger as written.
    ///
    /// SUBPROCESS_PHASE wins over PHASE: it is written by the innermost
    /// running sub-process and names the juncture actually executing.
    ///
    /// Dispatch uses the same target, so the phase a hook is started at is
    /// the phase the ledger later records.
    pub async fn resolution_target(&self) -> Result<Option<HookPhaseTarget>> {
        let context = &self.context;
        let process_type: Option<ProcessType> =
            context.get_typed(variables::PROCESS_TYPE).await?;

        if let Some(process_type) = process_type {
            if !process_type.is_blue_green() {
                // One copy only, and it serves traffic.
                return Ok(Some(HookPhaseTarget::Live));
            }
        }

        let subprocess_phase: Option<ProcessPhase> =
            context.get_typed(variables::SUBPROCESS_PHASE).await?;
        let phase: Option<ProcessPhase> = context.get_typed(variables::PHASE).await?;

        Ok(subprocess_phase.or(phase).map(|phase| match phase {
            ProcessPhase::Deploy => HookPhaseTarget::Idle,
            ProcessPhase::AfterResume | ProcessPhase::Undeploy => HookPhaseTarget::Live,
        }))
    }

    /// Reconstruct the executed-hooks ledger from persisted storage.
    async fn executed_hooks(&self) -> Result<ExecutedHooksLedger> {
        let ledger: Option<ExecutedHooksLedger> = self
            .context
            .get_typed(variables::EXECUTED_HOOKS)
            .await?;
        Ok(ledger.unwrap_or_default())
    }
}
