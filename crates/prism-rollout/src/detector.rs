//! Live color detection
//!
//! No single persisted field says which color is live. The detector
//! reconstructs it from two durable sources: the naming convention of the
//! deployed applications, and the variables the most recent other
//! operation on the same MTA left behind. Read-only; the only side effects
//! are queries.

use crate::error::{RolloutError, Result};
use prism_engine::{variables, EngineError, HistoryService, OperationService};
use prism_types::{ApplicationColor, DeployedMta, ProcessPhase};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Derives the deployed and live colors of an MTA from persisted facts.
pub struct ApplicationColorDetector {
    operations: Arc<dyn OperationService>,
    history: Arc<dyn HistoryService>,
}

impl ApplicationColorDetector {
    pub fn new(operations: Arc<dyn OperationService>, history: Arc<dyn HistoryService>) -> Self {
        Self { operations, history }
    }

    /// The single color implied by the MTA's application names, or `None`
    /// when nothing is deployed. Unsuffixed names imply Blue. More than one
    /// implied color is a fatal conflict, never resolved by heuristic.
    pub fn detect_singular_deployed_application_color(
        &self,
        deployed_mta: Option<&DeployedMta>,
    ) -> Result<Option<ApplicationColor>> {
        let Some(mta) = deployed_mta else {
            return Ok(None);
        };
        if mta.applications.is_empty() {
            return Ok(None);
        }

        let colors: BTreeSet<&'static str> = mta
            .applications
            .iter()
            .map(|app| app.color().suffix())
            .collect();
        if colors.len() > 1 {
            return Err(RolloutError::ColorConflict {
                mta_id: mta.metadata.id.clone(),
            });
        }
        Ok(Some(mta.applications[0].color()))
    }

    /// The color currently serving productive traffic, or `None` when
    /// nothing is deployed.
    ///
    /// Derived from the most recent operation on this MTA other than the
    /// current one (`correlation_id`): the live color is the opposite of
    /// the idle color that operation persisted. Without a resolvable prior
    /// operation, or when it was an undeploy, the answer defaults to Green
    /// deterministically.
    pub async fn detect_live_application_color(
        &self,
        deployed_mta: Option<&DeployedMta>,
        correlation_id: &str,
    ) -> Result<Option<ApplicationColor>> {
        let Some(mta) = deployed_mta else {
            return Ok(None);
        };

        let operations = self.operations.operations_for_mta(&mta.metadata.id).await?;
        let Some(operation) = operations
            .into_iter()
            .find(|op| op.process_id != correlation_id)
        else {
            debug!(mta_id = %mta.metadata.id, "No prior operation, defaulting live color");
            return Ok(Some(ApplicationColor::Green));
        };

        let phase: Option<ProcessPhase> = self
            .historic_typed(&operation.process_id, variables::PHASE)
            .await?;
        let idle_color: Option<ApplicationColor> = self
            .historic_typed(&operation.process_id, variables::IDLE_MTA_COLOR)
            .await?;

        let live_color = match (phase, idle_color) {
            (Some(ProcessPhase::Undeploy), _) | (None, _) | (_, None) => ApplicationColor::Green,
            (Some(_), Some(idle_color)) => idle_color.opposite(),
        };
        debug!(
            mta_id = %mta.metadata.id,
            prior_operation = %operation.process_id,
            %live_color,
            "Detected live color"
        );
        Ok(Some(live_color))
    }

    async fn historic_typed<T: DeserializeOwned>(
        &self,
        process_id: &str,
        name: &str,
    ) -> Result<Option<T>> {
        match self.history.historic_variable(process_id, name).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| {
                    RolloutError::Engine(EngineError::Variable {
                        name: name.to_owned(),
                        reason: e.to_string(),
                    })
                }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use prism_engine::{InMemoryHistoryService, InMemoryOperationService};
    use prism_types::{
        DeployedMtaApplication, MtaMetadata, Operation, OperationState, ProcessType,
        ProductizationState,
    };
    use serde_json::json;

    fn make_application(module: &str, name: &str) -> DeployedMtaApplication {
        DeployedMtaApplication {
            module_name: module.into(),
            name: name.into(),
            created_at: Utc::now(),
            productization_state: ProductizationState::Idle,
        }
    }

    fn make_mta(applications: Vec<DeployedMtaApplication>) -> DeployedMta {
        DeployedMta {
            metadata: MtaMetadata {
                id: "anatz".into(),
                version: Some("1.0.0".into()),
            },
            applications,
            services: vec![],
        }
    }

    fn make_operation(process_id: &str, age_minutes: i64) -> Operation {
        Operation {
            process_id: process_id.into(),
            process_type: ProcessType::BlueGreenDeploy,
            mta_id: "anatz".into(),
            space_id: "space-1".into(),
            state: OperationState::Finished,
            has_acquired_lock: false,
            started_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    struct Fixture {
        detector: ApplicationColorDetector,
        operations: Arc<InMemoryOperationService>,
        history: Arc<InMemoryHistoryService>,
    }

    fn make_fixture() -> Fixture {
        let operations = Arc::new(InMemoryOperationService::new());
        let history = Arc::new(InMemoryHistoryService::new());
        Fixture {
            detector: ApplicationColorDetector::new(operations.clone(), history.clone()),
            operations,
            history,
        }
    }

    #[test]
    fn test_singular_color_none_for_absent_or_empty() {
        let fixture = make_fixture();
        assert_eq!(
            fixture
                .detector
                .detect_singular_deployed_application_color(None)
                .unwrap(),
            None
        );
        assert_eq!(
            fixture
                .detector
                .detect_singular_deployed_application_color(Some(&make_mta(vec![])))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_singular_color_consistent_suffixes() {
        let fixture = make_fixture();
        let mta = make_mta(vec![
            make_application("web", "web-green"),
            make_application("db", "db-green"),
        ]);
        assert_eq!(
            fixture
                .detector
                .detect_singular_deployed_application_color(Some(&mta))
                .unwrap(),
            Some(ApplicationColor::Green)
        );
    }

    #[test]
    fn test_singular_color_unsuffixed_implies_blue() {
        let fixture = make_fixture();
        let mta = make_mta(vec![
            make_application("web", "web"),
            make_application("db", "db-blue"),
        ]);
        // Unsuffixed and -blue agree on blue
        assert_eq!(
            fixture
                .detector
                .detect_singular_deployed_application_color(Some(&mta))
                .unwrap(),
            Some(ApplicationColor::Blue)
        );
    }

    #[test]
    fn test_singular_color_conflict_is_fatal_and_names_mta() {
        let fixture = make_fixture();
        let mta = make_mta(vec![
            make_application("web", "web-green"),
            make_application("db", "db-blue"),
        ]);
        let error = fixture
            .detector
            .detect_singular_deployed_application_color(Some(&mta))
            .unwrap_err();
        assert!(error.to_string().contains("anatz"));
    }

    #[tokio::test]
    async fn test_live_color_none_for_absent_mta() {
        let fixture = make_fixture();
        assert_eq!(
            fixture
                .detector
                .detect_live_application_color(None, "op-current")
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_live_color_defaults_to_green_without_prior_operation() {
        let fixture = make_fixture();
        let mta = make_mta(vec![make_application("web", "web-blue")]);
        assert_eq!(
            fixture
                .detector
                .detect_live_application_color(Some(&mta), "op-current")
                .await
                .unwrap(),
            Some(ApplicationColor::Green)
        );
    }

    #[tokio::test]
    async fn test_live_color_ignores_current_operation() {
        let fixture = make_fixture();
        fixture
            .operations
            .add(make_operation("op-current", 1))
            .await
            .unwrap();
        let mta = make_mta(vec![make_application("web", "web-blue")]);
        // The only recorded operation is the current one, so no prior
        // operation resolves and the default applies.
        assert_eq!(
            fixture
                .detector
                .detect_live_application_color(Some(&mta), "op-current")
                .await
                .unwrap(),
            Some(ApplicationColor::Green)
        );
    }

    #[tokio::test]
    async fn test_live_color_defaults_to_green_without_persisted_variables() {
        let fixture = make_fixture();
        fixture
            .operations
            .add(make_operation("op-prior", 30))
            .await
            .unwrap();
        let mta = make_mta(vec![make_application("web", "web-blue")]);
        assert_eq!(
            fixture
                .detector
                .detect_live_application_color(Some(&mta), "op-current")
                .await
                .unwrap(),
            Some(ApplicationColor::Green)
        );
    }

    #[tokio::test]
    async fn test_live_color_is_opposite_of_persisted_idle_color() {
        let fixture = make_fixture();
        fixture
            .operations
            .add(make_operation("op-prior", 30))
            .await
            .unwrap();
        fixture.history.put("op-prior", "phase", json!("AFTER_RESUME"));
        fixture.history.put("op-prior", "idleMtaColor", json!("GREEN"));

        let mta = make_mta(vec![make_application("web", "web-blue")]);
        assert_eq!(
            fixture
                .detector
                .detect_live_application_color(Some(&mta), "op-current")
                .await
                .unwrap(),
            Some(ApplicationColor::Blue)
        );
    }

    #[tokio::test]
    async fn test_live_color_defaults_to_green_after_undeploy() {
        let fixture = make_fixture();
        fixture
            .operations
            .add(make_operation("op-prior", 30))
            .await
            .unwrap();
        fixture.history.put("op-prior", "phase", json!("UNDEPLOY"));
        fixture.history.put("op-prior", "idleMtaColor", json!("GREEN"));

        let mta = make_mta(vec![make_application("web", "web-blue")]);
        assert_eq!(
            fixture
                .detector
                .detect_live_application_color(Some(&mta), "op-current")
                .await
                .unwrap(),
            Some(ApplicationColor::Green)
        );
    }

    #[tokio::test]
    async fn test_live_color_uses_most_recent_prior_operation() {
        let fixture = make_fixture();
        fixture
            .operations
            .add(make_operation("op-old", 120))
            .await
            .unwrap();
        fixture
            .operations
            .add(make_operation("op-recent", 10))
            .await
            .unwrap();
        fixture.history.put("op-old", "phase", json!("DEPLOY"));
        fixture.history.put("op-old", "idleMtaColor", json!("BLUE"));
        fixture.history.put("op-recent", "phase", json!("DEPLOY"));
        fixture.history.put("op-recent", "idleMtaColor", json!("GREEN"));

        let mta = make_mta(vec![make_application("web", "web-blue")]);
        assert_eq!(
            fixture
                .detector
                .detect_live_application_color(Some(&mta), "op-current")
                .await
                .unwrap(),
            Some(ApplicationColor::Blue)
        );
    }
}
