//! Productization-state relabeling
//!
//! Once the live color is known, every deployed application gets its
//! LIVE/IDLE label re-derived per module group. Input records are never
//! mutated; the updater returns copies.

use prism_types::{ApplicationColor, DeployedMtaApplication, ProductizationState};
use std::collections::BTreeMap;
use tracing::debug;

/// Relabels deployed applications LIVE/IDLE for a detected live color.
pub struct ProductizationStateUpdater {
    live_color: ApplicationColor,
}

impl ProductizationStateUpdater {
    pub fn new(live_color: ApplicationColor) -> Self {
        Self { live_color }
    }

    /// Copies of `applications` with their productization state set: within
    /// each module group at most one application goes Live - the suffixed
    /// one matching the live color, or, failing that, the legacy unsuffixed
    /// one when Blue is live - and every other application is Idle. Empty
    /// input yields empty output.
    pub fn update_applications_productization_state(
        &self,
        applications: &[DeployedMtaApplication],
    ) -> Vec<DeployedMtaApplication> {
        let mut groups: BTreeMap<&str, Vec<&DeployedMtaApplication>> = BTreeMap::new();
        for application in applications {
            groups
                .entry(application.module_name.as_str())
                .or_default()
                .push(application);
        }
        let live_names: BTreeMap<&str, &str> = groups
            .iter()
            .filter_map(|(module, group)| {
                self.live_application(group)
                    .map(|live| (*module, live.name.as_str()))
            })
            .collect();

        applications
            .iter()
            .map(|application| {
                let is_live = live_names.get(application.module_name.as_str())
                    == Some(&application.name.as_str());
                let state = if is_live {
                    ProductizationState::Live
                } else {
                    ProductizationState::Idle
                };
                debug!(
                    module = %application.module_name,
                    application = %application.name,
                    ?state,
                    "Relabeled productization state"
                );
                application.with_productization_state(state)
            })
            .collect()
    }

    /// The one application of a module group that serves traffic. An
    /// explicit color suffix wins; the legacy unsuffixed application only
    /// counts as the blue copy when no suffixed application matches. A
    /// group may have no live application at all, e.g. when only the idle
    /// copy is deployed.
    fn live_application<'a>(
        &self,
        group: &[&'a DeployedMtaApplication],
    ) -> Option<&'a DeployedMtaApplication> {
        group
            .iter()
            .find(|application| {
                ApplicationColor::has_color_suffix(&application.name)
                    && application.color() == self.live_color
            })
            .or_else(|| {
                if self.live_color != ApplicationColor::Blue {
                    return None;
                }
                group
                    .iter()
                    .find(|application| !ApplicationColor::has_color_suffix(&application.name))
            })
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn make_application(module: &str, name: &str) -> DeployedMtaApplication {
        DeployedMtaApplication {
            module_name: module.into(),
            name: name.into(),
            created_at: chrono::Utc::now(),
            productization_state: ProductizationState::Idle,
        }
    }

    fn live_count_per_module(applications: &[DeployedMtaApplication]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for application in applications {
            let live = application.productization_state == ProductizationState::Live;
            *counts.entry(application.module_name.clone()).or_insert(0) += usize::from(live);
        }
        counts
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let updater = ProductizationStateUpdater::new(ApplicationColor::Green);
        assert!(updater
            .update_applications_productization_state(&[])
            .is_empty());
    }

    #[test]
    fn test_exactly_one_live_per_module_group() {
        let applications = vec![
            make_application("web", "web-blue"),
            make_application("web", "web-green"),
            make_application("db", "db-blue"),
            make_application("db", "db-green"),
        ];
        let updater = ProductizationStateUpdater::new(ApplicationColor::Green);
        let updated = updater.update_applications_productization_state(&applications);

        let counts = live_count_per_module(&updated);
        assert_eq!(counts["web"], 1);
        assert_eq!(counts["db"], 1);
        for application in &updated {
            let expected = if application.name.ends_with("-green") {
                ProductizationState::Live
            } else {
                ProductizationState::Idle
            };
            assert_eq!(application.productization_state, expected);
        }
    }

    #[test]
    fn test_mixed_legacy_and_suffixed_group_has_single_live() {
        let applications = vec![
            make_application("web", "web"),
            make_application("web", "web-blue"),
        ];
        let updater = ProductizationStateUpdater::new(ApplicationColor::Blue);
        let updated = updater.update_applications_productization_state(&applications);

        assert_eq!(live_count_per_module(&updated)["web"], 1);
        // The explicitly suffixed copy wins over the legacy fallback
        for application in &updated {
            let expected = if application.name == "web-blue" {
                ProductizationState::Live
            } else {
                ProductizationState::Idle
            };
            assert_eq!(application.productization_state, expected);
        }
    }

    #[test]
    fn test_legacy_unsuffixed_application_is_live_when_blue_is_live() {
        let applications = vec![make_application("web", "web")];
        let updater = ProductizationStateUpdater::new(ApplicationColor::Blue);
        let updated = updater.update_applications_productization_state(&applications);
        assert_eq!(updated[0].productization_state, ProductizationState::Live);
    }

    #[test]
    fn test_legacy_unsuffixed_application_is_idle_when_green_is_live() {
        let applications = vec![make_application("web", "web")];
        let updater = ProductizationStateUpdater::new(ApplicationColor::Green);
        let updated = updater.update_applications_productization_state(&applications);
        assert_eq!(updated[0].productization_state, ProductizationState::Idle);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let applications = vec![make_application("web", "web-green")];
        let updater = ProductizationStateUpdater::new(ApplicationColor::Green);
        let updated = updater.update_applications_productization_state(&applications);

        assert_eq!(
            applications[0].productization_state,
            ProductizationState::Idle
        );
        assert_eq!(updated[0].productization_state, ProductizationState::Live);
    }
}
