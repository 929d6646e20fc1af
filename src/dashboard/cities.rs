//! City Directory Loader
//!
//! Fills the city selector from `GET /cities` at startup. On any failure
//! the selector gets the configured fallback list instead. No retries.

use std::sync::Arc;

use super::error::DashboardError;
use super::notify::Notifier;
use super::policy::FailureVisibility;
use super::view::DashboardView;
use crate::api::DashboardApi;
use crate::config::CitiesConfig;

/// What the loader put into the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityLoadOutcome {
    /// Directory loaded from the backend
    Loaded { count: usize },
    /// Backend failed; fallback list in use
    Fallback { reason: String },
}

impl CityLoadOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, CityLoadOutcome::Fallback { .. })
    }
}

pub struct CityDirectoryLoader {
    api: Arc<dyn DashboardApi>,
    view: Arc<DashboardView>,
    notifier: Arc<dyn Notifier>,
    config: CitiesConfig,
    visibility: FailureVisibility,
}

impl CityDirectoryLoader {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        view: Arc<DashboardView>,
        notifier: Arc<dyn Notifier>,
        config: CitiesConfig,
        visibility: FailureVisibility,
    ) -> Self {
        Self {
            api,
            view,
            notifier,
            config,
            visibility,
        }
    }

    pub async fn load(&self) -> CityLoadOutcome {
        tracing::info!("Loading cities...");

        match self.api.fetch_cities().await {
            Ok(cities) => {
                tracing::info!(count = cities.len(), "Cities received");

                let preferred = cities
                    .iter()
                    .any(|c| *c == self.config.preferred)
                    .then_some(self.config.preferred.as_str());
                self.view.set_cities(&cities, preferred).await;

                CityLoadOutcome::Loaded {
                    count: cities.len(),
                }
            }
            Err(e) => {
                let error = DashboardError::DirectoryUnavailable(e);
                tracing::error!(error = %error, "Error fetching cities, using fallback list");
                if self.visibility.alerts() {
                    self.notifier.alert(&error.user_message());
                }

                let selected = self
                    .view
                    .set_cities(&self.config.fallback, Some(&self.config.preferred))
                    .await;
                if !selected {
                    tracing::warn!(
                        city = %self.config.preferred,
                        "preferred city missing from fallback list"
                    );
                }

                CityLoadOutcome::Fallback {
                    reason: error.to_string(),
                }
            }
        }
    }
}
