//! Step hook-phase capability
//!
//! Whether a step has hooks around it is a capability of the step type,
//! not a property this crate hardcodes: a step that declares phases
//! implements [`HookPhaseProvider`]; every other step implicitly declares
//! [`HookPhase::None`]. The capability accessor replaces downcasting on
//! the step type.

use prism_types::HookPhase;

/// Declares which hook phases surround a step.
pub trait HookPhaseProvider {
    /// Phases whose hooks run before the step's own work.
    fn hook_phases_before_step(&self) -> Vec<HookPhase>;

    /// Phases whose hooks run after the step's own work.
    fn hook_phases_after_step(&self) -> Vec<HookPhase>;
}

/// The minimal view of a workflow step this crate needs.
pub trait Step {
    /// Step name, for logs.
    fn name(&self) -> &str;

    /// The hook-phase capability, if this step type declares one.
    fn hook_phase_provider(&self) -> Option<&dyn HookPhaseProvider> {
        None
    }
}

/// Resolves a step's declared hook phases, defaulting to `[None]`.
pub struct HooksPhaseGetter;

impl HooksPhaseGetter {
    pub fn hook_phases_before_step(step: &dyn Step) -> Vec<HookPhase> {
        match step.hook_phase_provider() {
            Some(provider) => provider.hook_phases_before_step(),
            None => vec![HookPhase::None],
        }
    }

    pub fn hook_phases_after_step(step: &dyn Step) -> Vec<HookPhase> {
        match step.hook_phase_provider() {
            Some(provider) => provider.hook_phases_after_step(),
            None => vec![HookPhase::None],
        }
    }
}
