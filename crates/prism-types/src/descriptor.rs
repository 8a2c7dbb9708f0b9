//! Descriptor fragments
//!
//! Modules and hooks come from the MTA deployment descriptor and are
//! immutable from the rollout core's point of view. Hook order within a
//! module is declaration order and must be preserved by every selection
//! pass.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A user-declared lifecycle action bound to specific phases of a module's
/// deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    /// Hook name, unique within its module
    pub name: String,

    /// Hook type, e.g. `"task"`
    #[serde(rename = "type")]
    pub kind: String,

    /// Declared phase tokens (lowercase dotted descriptor strings);
    /// one hook may bind to several phases
    #[serde(default)]
    pub phases: Vec<String>,

    /// Free-form hook parameters from the descriptor
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
}

/// A module of the deployment descriptor, reduced to what hook selection
/// needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Module name
    pub name: String,

    /// Declared hooks, in declaration order
    #[serde(default)]
    pub hooks: Vec<Hook>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_type_field_rename() {
        let json = r#"{
            "name": "backup-db",
            "type": "task",
            "phases": ["application.before-stop.live"],
            "parameters": {"command": "run-backup"}
        }"#;
        let hook: Hook = serde_json::from_str(json).unwrap();
        assert_eq!(hook.kind, "task");
        assert_eq!(hook.phases, vec!["application.before-stop.live"]);
        assert_eq!(
            hook.parameters.get("command"),
            Some(&Value::String("run-backup".into()))
        );
    }

    #[test]
    fn test_module_defaults() {
        let module: Module = serde_json::from_str(r#"{"name": "web"}"#).unwrap();
        assert!(module.hooks.is_empty());
    }
}
