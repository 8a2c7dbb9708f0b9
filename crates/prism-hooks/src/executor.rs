//! Top-level hook orchestration for one step
//!
//! Combines the calculator (candidate selection), the aggregator (ledger
//! subtraction) and the dispatcher. Every invocation derives its decisions
//! fresh from persisted state, so re-running the same step after a crash
//! or pause dispatches only the hooks that have not run yet.

use crate::aggregator::ModuleHooksAggregator;
use crate::calculator::HooksCalculator;
use crate::dispatch::{HookExecution, HookExecutor};
use crate::error::Result;
use crate::phases::Step;
use prism_engine::{
    variables, ProcessContext, ProcessContextExt, ProcessMessenger, ProgressMessageService,
};
use prism_types::{Hook, HookPhase, HookPhaseTarget, Module, StepPhase};
use std::sync::Arc;
use tracing::info;

/// Hook orchestration entry point for one step invocation.
///
/// The module whose hooks are due comes from the persisted `moduleToDeploy`
/// variable; an invocation without one dispatches nothing.
pub struct HooksExecutor {
    context: Arc<dyn ProcessContext>,
    calculator: HooksCalculator,
    dispatcher: HookExecutor,
    step_name: String,
}

impl HooksExecutor {
    pub fn new(
        context: Arc<dyn ProcessContext>,
        messenger: Arc<dyn ProcessMessenger>,
        progress_messages: Arc<dyn ProgressMessageService>,
        step: &dyn Step,
    ) -> Self {
        Self {
            calculator: HooksCalculator::for_step(step),
            dispatcher: HookExecutor::new(context.clone(), messenger, progress_messages),
            step_name: step.name().to_owned(),
            context,
        }
    }

    /// Select and dispatch the hooks due before the step's own work.
    /// Returns the selected hooks; empty when there is no module to deploy
    /// or the step is not in its pre-execute phase.
    pub async fn execute_before_step_hooks(&self, step_phase: StepPhase) -> Result<Vec<Hook>> {
        if !self.calculator.is_in_pre_execute_step_phase(step_phase) {
            return Ok(Vec::new());
        }
        self.execute(step_phase).await
    }

    /// Select and dispatch the hooks due after the step's own work.
    pub async fn execute_after_step_hooks(&self, step_phase: StepPhase) -> Result<Vec<Hook>> {
        if !self.calculator.is_in_post_execute_step_phase(step_phase) {
            return Ok(Vec::new());
        }
        self.execute(step_phase).await
    }

    async fn execute(&self, step_phase: StepPhase) -> Result<Vec<Hook>> {
        let Some(module) = self
            .context
            .get_typed::<Module>(variables::MODULE_TO_DEPLOY)
            .await?
        else {
            return Ok(Vec::new());
        };

        // Calculator pre-selection, then aggregator ledger subtraction.
        let candidates = self
            .calculator
            .calculate_hooks_for_execution(&module, step_phase);
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let current_phases = self.calculator.candidate_phases(step_phase);
        let aggregator = ModuleHooksAggregator::new(
            self.context.clone(),
            Module {
                name: module.name.clone(),
                hooks: candidates,
            },
        );
        let target = aggregator.resolution_target().await?;
        let hooks = aggregator.aggregate_hooks(current_phases).await?;
        if hooks.is_empty() {
            return Ok(hooks);
        }

        info!(
            step = %self.step_name,
            module = %module.name,
            count = hooks.len(),
            "Dispatching hooks"
        );
        let executions: Vec<HookExecution> = hooks
            .iter()
            .map(|hook| {
                HookExecution::new(dispatch_phase(hook, current_phases, target), hook.clone())
            })
            .collect();
        self.dispatcher.execute(&executions).await?;
        Ok(hooks)
    }
}

/// Concrete phase a hook is dispatched at: its first declared phase that is
/// a candidate right now, with generic tokens resolved to the same idle/live
/// form the ledger comparison used. Dispatching at the resolved phase keeps
/// the message name identical to the token the resuming step records, so a
/// replay sees the execution as already done. Falls back to the first
/// parseable declared phase; an aggregator-selected hook always has one.
fn dispatch_phase(
    hook: &Hook,
    current_phases: &[HookPhase],
    target: Option<HookPhaseTarget>,
) -> HookPhase {
    let declared: Vec<HookPhase> = hook
        .phases
        .iter()
        .filter_map(|token| HookPhase::from_token(token))
        .map(|phase| match target {
            Some(target) if phase.is_generic() => phase.for_target(target),
            _ => phase,
        })
        .collect();
    declared
        .iter()
        .find(|phase| current_phases.contains(*phase))
        .or_else(|| declared.first())
        .copied()
        .unwrap_or(HookPhase::None)
}
