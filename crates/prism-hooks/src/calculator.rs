//! Candidate hook selection
//!
//! The calculator is pure: given the step's declared before/after phase
//! lists and its current invocation phase, it picks the module hooks whose
//! declared tokens intersect the candidate set. A matched hook is returned
//! whole, with all its declared phases; subtracting already-executed
//! phases is the aggregator's job.

use crate::phases::{HooksPhaseGetter, Step};
use prism_types::{Hook, HookPhase, HookPhaseTarget, Module, StepPhase};

/// Immutable selection logic for one step.
#[derive(Clone, Debug)]
pub struct HooksCalculator {
    hook_phases_before_step: Vec<HookPhase>,
    hook_phases_after_step: Vec<HookPhase>,
}

impl HooksCalculator {
    pub fn new(
        hook_phases_before_step: Vec<HookPhase>,
        hook_phases_after_step: Vec<HookPhase>,
    ) -> Self {
        Self {
            hook_phases_before_step,
            hook_phases_after_step,
        }
    }

    /// Build a calculator from a step's declared capability.
    pub fn for_step(step: &dyn Step) -> Self {
        Self::new(
            HooksPhaseGetter::hook_phases_before_step(step),
            HooksPhaseGetter::hook_phases_after_step(step),
        )
    }

    /// Whether hooks-before-step may run in this step phase.
    pub fn is_in_pre_execute_step_phase(&self, step_phase: StepPhase) -> bool {
        step_phase == StepPhase::Execute
    }

    /// Whether hooks-after-step may run in this step phase.
    pub fn is_in_post_execute_step_phase(&self, step_phase: StepPhase) -> bool {
        step_phase == StepPhase::Done
    }

    /// Candidate phases for the given step phase. Empty while polling:
    /// hooks bind to the edges of a step, never its middle.
    pub fn candidate_phases(&self, step_phase: StepPhase) -> &[HookPhase] {
        match step_phase {
            StepPhase::Execute => &self.hook_phases_before_step,
            StepPhase::Done => &self.hook_phases_after_step,
            StepPhase::Poll => &[],
        }
    }

    /// Hooks of `module` whose declared phase tokens intersect the
    /// candidate set, in declaration order. Unknown tokens match nothing.
    /// A generic token counts as intersecting when either of its concrete
    /// idle/live forms does; which form applies is the aggregator's call.
    pub fn calculate_hooks_for_execution(&self, module: &Module, step_phase: StepPhase) -> Vec<Hook> {
        let candidates = self.candidate_phases(step_phase);
        if candidates.is_empty() {
            return Vec::new();
        }
        module
            .hooks
            .iter()
            .filter(|hook| {
                hook.phases
                    .iter()
                    .filter_map(|token| HookPhase::from_token(token))
                    .any(|phase| phase_is_candidate(phase, candidates))
            })
            .cloned()
            .collect()
    }
}

fn phase_is_candidate(phase: HookPhase, candidates: &[HookPhase]) -> bool {
    if candidates.contains(&phase) {
        return true;
    }
    phase.is_generic()
        && candidates.iter().any(|candidate| {
            *candidate == phase.for_target(HookPhaseTarget::Idle)
                || *candidate == phase.for_target(HookPhaseTarget::Live)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn make_hook(name: &str, phases: &[&str]) -> Hook {
        Hook {
            name: name.into(),
            kind: "task".into(),
            phases: phases.iter().map(|p| (*p).to_owned()).collect(),
            parameters: BTreeMap::new(),
        }
    }

    fn make_module(hooks: Vec<Hook>) -> Module {
        Module {
            name: "m".into(),
            hooks,
        }
    }

    fn make_calculator() -> HooksCalculator {
        HooksCalculator::new(
            vec![HookPhase::ApplicationBeforeStartIdle],
            vec![HookPhase::ApplicationAfterStartIdle],
        )
    }

    #[test]
    fn test_poll_selects_nothing() {
        let module = make_module(vec![make_hook("h", &["application.before-start.idle"])]);
        assert!(make_calculator()
            .calculate_hooks_for_execution(&module, StepPhase::Poll)
            .is_empty());
    }

    #[test]
    fn test_execute_matches_only_before_phases() {
        let module = make_module(vec![
            make_hook("pre", &["application.before-start.idle"]),
            make_hook("post", &["application.after-start.idle"]),
        ]);
        let selected = make_calculator().calculate_hooks_for_execution(&module, StepPhase::Execute);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "pre");
    }

    #[test]
    fn test_done_matches_only_after_phases() {
        let module = make_module(vec![
            make_hook("pre", &["application.before-start.idle"]),
            make_hook("post", &["application.after-start.idle"]),
        ]);
        let selected = make_calculator().calculate_hooks_for_execution(&module, StepPhase::Done);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "post");
    }

    #[test]
    fn test_matched_hook_is_returned_whole() {
        let hook = make_hook(
            "h",
            &["application.before-start.idle", "application.after-start.idle"],
        );
        let module = make_module(vec![hook.clone()]);
        let selected = make_calculator().calculate_hooks_for_execution(&module, StepPhase::Execute);
        assert_eq!(selected, vec![hook]);
    }

    #[test]
    fn test_generic_token_is_candidate_for_its_concrete_forms() {
        let module = make_module(vec![make_hook("h", &["application.before-start"])]);
        let selected = make_calculator().calculate_hooks_for_execution(&module, StepPhase::Execute);
        assert_eq!(selected.len(), 1);
        // ...but not for a different juncture
        let module = make_module(vec![make_hook("h", &["application.before-stop"])]);
        assert!(make_calculator()
            .calculate_hooks_for_execution(&module, StepPhase::Execute)
            .is_empty());
    }

    #[test]
    fn test_unknown_tokens_match_nothing() {
        let module = make_module(vec![make_hook("h", &["application.during-lunch"])]);
        assert!(make_calculator()
            .calculate_hooks_for_execution(&module, StepPhase::Execute)
            .is_empty());
    }

    #[test]
    fn test_declaration_order_preserved() {
        let module = make_module(vec![
            make_hook("b", &["application.before-start.idle"]),
            make_hook("a", &["application.before-start.idle"]),
        ]);
        let selected = make_calculator().calculate_hooks_for_execution(&module, StepPhase::Execute);
        let names: Vec<&str> = selected.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_step_phase_predicates() {
        let calculator = make_calculator();
        assert!(calculator.is_in_pre_execute_step_phase(StepPhase::Execute));
        assert!(!calculator.is_in_pre_execute_step_phase(StepPhase::Poll));
        assert!(calculator.is_in_post_execute_step_phase(StepPhase::Done));
        assert!(!calculator.is_in_post_execute_step_phase(StepPhase::Execute));
    }
}
