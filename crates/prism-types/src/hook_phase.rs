//! The closed vocabulary of hook lifecycle junctures
//!
//! Descriptors declare phases as lowercase dotted tokens
//! (e.g. `application.before-stop.idle`); the executed-hooks ledger stores
//! the same literal tokens. Translation between tokens and this enum is the
//! rollout core's responsibility and must never fail hard: an unrecognized
//! token simply matches nothing.
//!
//! The unqualified `application.*` tokens are *generic*: in a blue-green
//! operation they stand for either the idle or the live juncture and get
//! resolved to a concrete phase from the running process's phase variables.
//! The `blue-green.*` tokens are the older, already-concrete spellings and
//! are kept for descriptor compatibility.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which copy of the application a generic phase resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HookPhaseTarget {
    Idle,
    Live,
}

/// One canonical lifecycle juncture a hook can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HookPhase {
    ApplicationBeforeStart,
    ApplicationBeforeStartIdle,
    ApplicationBeforeStartLive,
    ApplicationAfterStart,
    ApplicationAfterStartIdle,
    ApplicationAfterStartLive,
    ApplicationBeforeStop,
    ApplicationBeforeStopIdle,
    ApplicationBeforeStopLive,
    ApplicationAfterStop,
    ApplicationAfterStopIdle,
    ApplicationAfterStopLive,
    BlueGreenApplicationBeforeStartIdle,
    BlueGreenApplicationBeforeStartLive,
    BlueGreenApplicationAfterStartIdle,
    BlueGreenApplicationAfterStartLive,
    BlueGreenApplicationBeforeStopIdle,
    BlueGreenApplicationBeforeStopLive,
    BlueGreenApplicationAfterStopIdle,
    BlueGreenApplicationAfterStopLive,
    /// A step that declares no hook phases
    None,
}

impl HookPhase {
    /// The literal descriptor token, or `None` for [`HookPhase::None`],
    /// which has no descriptor spelling.
    pub fn token(&self) -> Option<&'static str> {
        use HookPhase::*;
        Some(match self {
            ApplicationBeforeStart => "application.before-start",
            ApplicationBeforeStartIdle => "application.before-start.idle",
            ApplicationBeforeStartLive => "application.before-start.live",
            ApplicationAfterStart => "application.after-start",
            ApplicationAfterStartIdle => "application.after-start.idle",
            ApplicationAfterStartLive => "application.after-start.live",
            ApplicationBeforeStop => "application.before-stop",
            ApplicationBeforeStopIdle => "application.before-stop.idle",
            ApplicationBeforeStopLive => "application.before-stop.live",
            ApplicationAfterStop => "application.after-stop",
            ApplicationAfterStopIdle => "application.after-stop.idle",
            ApplicationAfterStopLive => "application.after-stop.live",
            BlueGreenApplicationBeforeStartIdle => "blue-green.application.before-start.idle",
            BlueGreenApplicationBeforeStartLive => "blue-green.application.before-start.live",
            BlueGreenApplicationAfterStartIdle => "blue-green.application.after-start.idle",
            BlueGreenApplicationAfterStartLive => "blue-green.application.after-start.live",
            BlueGreenApplicationBeforeStopIdle => "blue-green.application.before-stop.idle",
            BlueGreenApplicationBeforeStopLive => "blue-green.application.before-stop.live",
            BlueGreenApplicationAfterStopIdle => "blue-green.application.after-stop.idle",
            BlueGreenApplicationAfterStopLive => "blue-green.application.after-stop.live",
            None => return Option::None,
        })
    }

    /// Parse a descriptor token. Unknown tokens yield `None` rather than an
    /// error: a descriptor may carry phases this core does not know about,
    /// and those simply never match.
    pub fn from_token(token: &str) -> Option<HookPhase> {
        use HookPhase::*;
        Some(match token {
            "application.before-start" => ApplicationBeforeStart,
            "application.before-start.idle" => ApplicationBeforeStartIdle,
            "application.before-start.live" => ApplicationBeforeStartLive,
            "application.after-start" => ApplicationAfterStart,
            "application.after-start.idle" => ApplicationAfterStartIdle,
            "application.after-start.live" => ApplicationAfterStartLive,
            "application.before-stop" => ApplicationBeforeStop,
            "application.before-stop.idle" => ApplicationBeforeStopIdle,
            "application.before-stop.live" => ApplicationBeforeStopLive,
            "application.after-stop" => ApplicationAfterStop,
            "application.after-stop.idle" => ApplicationAfterStopIdle,
            "application.after-stop.live" => ApplicationAfterStopLive,
            "blue-green.application.before-start.idle" => BlueGreenApplicationBeforeStartIdle,
            "blue-green.application.before-start.live" => BlueGreenApplicationBeforeStartLive,
            "blue-green.application.after-start.idle" => BlueGreenApplicationAfterStartIdle,
            "blue-green.application.after-start.live" => BlueGreenApplicationAfterStartLive,
            "blue-green.application.before-stop.idle" => BlueGreenApplicationBeforeStopIdle,
            "blue-green.application.before-stop.live" => BlueGreenApplicationBeforeStopLive,
            "blue-green.application.after-stop.idle" => BlueGreenApplicationAfterStopIdle,
            "blue-green.application.after-stop.live" => BlueGreenApplicationAfterStopLive,
            _ => return Option::None,
        })
    }

    /// Whether this is an unqualified `application.*` phase that still needs
    /// idle/live resolution.
    pub fn is_generic(&self) -> bool {
        matches!(
            self,
            HookPhase::ApplicationBeforeStart
                | HookPhase::ApplicationAfterStart
                | HookPhase::ApplicationBeforeStop
                | HookPhase::ApplicationAfterStop
        )
    }

    /// Resolve a generic phase to its concrete idle/live form. Phases that
    /// are already concrete (and `None`) return themselves.
    pub fn for_target(&self, target: HookPhaseTarget) -> HookPhase {
        use HookPhase::*;
        match (self, target) {
            (ApplicationBeforeStart, HookPhaseTarget::Idle) => ApplicationBeforeStartIdle,
            (ApplicationBeforeStart, HookPhaseTarget::Live) => ApplicationBeforeStartLive,
            (ApplicationAfterStart, HookPhaseTarget::Idle) => ApplicationAfterStartIdle,
            (ApplicationAfterStart, HookPhaseTarget::Live) => ApplicationAfterStartLive,
            (ApplicationBeforeStop, HookPhaseTarget::Idle) => ApplicationBeforeStopIdle,
            (ApplicationBeforeStop, HookPhaseTarget::Live) => ApplicationBeforeStopLive,
            (ApplicationAfterStop, HookPhaseTarget::Idle) => ApplicationAfterStopIdle,
            (ApplicationAfterStop, HookPhaseTarget::Live) => ApplicationAfterStopLive,
            (other, _) => *other,
        }
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token() {
            Some(token) => write!(f, "{token}"),
            Option::None => write!(f, "none"),
        }
    }
}
