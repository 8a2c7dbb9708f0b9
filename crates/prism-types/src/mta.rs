//! Deployed MTA snapshot types
//!
//! A DeployedMta is a read-only view of what the cloud controller reports
//! as currently running for one multi-module application. The rollout core
//! never mutates these records in place; relabeling produces copies.

use crate::color::ApplicationColor;
use serde::{Deserialize, Serialize};

/// LIVE/IDLE label on a deployed application instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductizationState {
    /// Serving productive traffic
    Live,
    /// Deployed but parked (the other color)
    Idle,
}

/// Identifying metadata of a deployed MTA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MtaMetadata {
    /// MTA identifier from the deployment descriptor
    pub id: String,

    /// Descriptor version, when the runtime reports one
    pub version: Option<String>,
}

/// One application belonging to a deployed MTA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedMtaApplication {
    /// Name of the descriptor module this application was deployed from
    pub module_name: String,

    /// Runtime application name; may carry a -blue/-green suffix
    pub name: String,

    /// When the application was created on the runtime
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Current LIVE/IDLE label
    pub productization_state: ProductizationState,
}

impl DeployedMtaApplication {
    /// Color implied by this application's name suffix.
    pub fn color(&self) -> ApplicationColor {
        ApplicationColor::from_application_name(&self.name)
    }

    /// Copy of this record with a different productization state.
    pub fn with_productization_state(&self, state: ProductizationState) -> Self {
        Self {
            productization_state: state,
            ..self.clone()
        }
    }
}

/// Read-only snapshot of a deployed multi-module application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedMta {
    /// Identifying metadata
    pub metadata: MtaMetadata,

    /// Applications currently deployed for this MTA
    pub applications: Vec<DeployedMtaApplication>,

    /// Service instances bound into this MTA
    pub services: Vec<String>,
}
