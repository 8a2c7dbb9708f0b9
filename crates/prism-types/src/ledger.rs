//! Executed-hooks ledger
//!
//! The durable idempotency record for hook dispatch: which
//! (module, hook, phase) combinations have already run. Persisted as a
//! workflow variable with the logical layout
//! `module name -> (hook name -> set of phase tokens)`, using the literal
//! lowercase dotted descriptor tokens, not enum names. Append-only across
//! replays.
//!
//! The ledger is reconstructed from persisted storage on every step
//! invocation; a replayed step may run on a different worker, so nothing
//! is ever cached in memory.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Persisted record of executed hook phases, keyed by module and hook name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutedHooksLedger {
    entries: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl ExecutedHooksLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase tokens already recorded for `hook` of `module`; empty if the
    /// module or hook has no entry yet.
    pub fn phases_for(&self, module: &str, hook: &str) -> BTreeSet<String> {
        self.entries
            .get(module)
            .and_then(|hooks| hooks.get(hook))
            .cloned()
            .unwrap_or_default()
    }

    /// Whether `(module, hook, token)` has already executed.
    pub fn contains(&self, module: &str, hook: &str, token: &str) -> bool {
        self.entries
            .get(module)
            .and_then(|hooks| hooks.get(hook))
            .is_some_and(|tokens| tokens.contains(token))
    }

    /// Append one executed phase. Recording the same combination twice is a
    /// no-op, which is what makes replayed bookkeeping safe.
    pub fn record(&mut self, module: &str, hook: &str, token: &str) {
        self.entries
            .entry(module.to_owned())
            .or_default()
            .entry(hook.to_owned())
            .or_default()
            .insert(token.to_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
