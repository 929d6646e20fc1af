//! AQI Dashboard
//!
//! Ties the backend, the view state and the charts together.
//!
//! ## Architecture
//!
//! - **CityDirectoryLoader**: fills the city selector once at startup
//! - **PredictionCoordinator**: submit → request → response → render
//! - **DashboardView**: selector, trigger control, result and chart panels
//! - **ErrorPolicy**: which backend failures reach the user
//!
//! ## Data Flow
//!
//! 1. `start()` loads the city directory (fallback list on failure)
//! 2. `submit()` parses the form and requests a prediction
//! 3. On success the result panel is filled and both charts are rendered
//! 4. The trigger control is released however the submission ends

mod cities;
mod coordinator;
mod error;
mod notify;
mod policy;
mod view;

pub use cities::{CityDirectoryLoader, CityLoadOutcome};
pub use coordinator::{PredictionCoordinator, SubmissionOutcome};
pub use error::DashboardError;
pub use notify::{ConsoleNotifier, Notifier};
pub use policy::{ErrorPolicy, FailureVisibility};
pub use view::{
    CitySelector, DashboardView, Panels, ResultPanel, SelectOption, TriggerControl, TriggerGuard,
    ViewSnapshot,
};

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::api::DashboardApi;
use crate::charts::{
    BreakdownChartRenderer, ChartInstance, ChartRegistry, ChartSlot, TrendChartRenderer,
    TrendRender,
};
use crate::config::Config;
use crate::model::PredictionForm;

/// The dashboard: one session's view, charts and backend
pub struct Dashboard {
    view: Arc<DashboardView>,
    registry: Arc<ChartRegistry>,
    notifier: Arc<dyn Notifier>,
    loader: CityDirectoryLoader,
    coordinator: PredictionCoordinator,
    trend: TrendChartRenderer,
    policy: ErrorPolicy,
    cities: OnceCell<CityLoadOutcome>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>, config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        let view = Arc::new(DashboardView::new(config.cities.placeholder.clone()));
        let registry = Arc::new(ChartRegistry::new());
        let policy = config.errors;

        let loader = CityDirectoryLoader::new(
            Arc::clone(&api),
            Arc::clone(&view),
            Arc::clone(&notifier),
            config.cities.clone(),
            policy.cities,
        );

        let trend = TrendChartRenderer::new(Arc::clone(&api), Arc::clone(&registry))
            .short_dates(config.trend.short_dates);

        let coordinator = PredictionCoordinator::new(
            api,
            Arc::clone(&view),
            Arc::clone(&notifier),
            BreakdownChartRenderer::new(Arc::clone(&registry)),
            trend.clone(),
            policy,
        );

        Self {
            view,
            registry,
            notifier,
            loader,
            coordinator,
            trend,
            policy,
            cities: OnceCell::new(),
        }
    }

    /// Load the city directory; later calls return the first outcome
    pub async fn start(&self) -> CityLoadOutcome {
        self.cities.get_or_init(|| self.loader.load()).await.clone()
    }

    /// Submit the prediction form
    pub async fn submit(&self, form: &PredictionForm) -> SubmissionOutcome {
        self.coordinator.submit(form).await
    }

    /// Refetch the history and redraw the trend chart on its own
    pub async fn refresh_trend(&self) -> Result<TrendRender, DashboardError> {
        match self.trend.render().await {
            Ok(render) => Ok(render),
            Err(e) => {
                let error = DashboardError::HistoryUnavailable(e);
                tracing::error!(error = %error, "Error loading history chart");
                if self.policy.history.alerts() {
                    self.notifier.alert(&error.user_message());
                }
                Err(error)
            }
        }
    }

    pub fn view(&self) -> &Arc<DashboardView> {
        &self.view
    }

    pub fn registry(&self) -> &Arc<ChartRegistry> {
        &self.registry
    }

    pub async fn chart(&self, slot: ChartSlot) -> Option<ChartInstance> {
        self.registry.get(slot).await
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.view.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedApi;
    use crate::api::{ApiError, Endpoint};
    use crate::dashboard::notify::RecordingNotifier;
    use crate::model::{HistoricalRecord, Pollutant, PredictionResult};

    fn build(api: Arc<ScriptedApi>, config: &Config) -> (Dashboard, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        (Dashboard::new(api, config, notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn test_start_runs_once() {
        let api = Arc::new(ScriptedApi::new());
        api.push_cities(Ok(vec!["Ahmedabad".to_string(), "Delhi".to_string()]));
        let (dashboard, _) = build(api.clone(), &Config::default());

        let first = dashboard.start().await;
        let second = dashboard.start().await;
        assert_eq!(first, CityLoadOutcome::Loaded { count: 2 });
        assert_eq!(first, second);
        assert_eq!(api.calls(Endpoint::Cities), 1);
        assert_eq!(dashboard.snapshot().await.selector.selected(), "Ahmedabad");
    }

    #[tokio::test]
    async fn test_full_session() {
        let api = Arc::new(ScriptedApi::new());
        api.push_cities(Err(ApiError::Unavailable("down".to_string())));
        api.push_prediction(Ok(PredictionResult::new(123.4, "Moderate")));
        api.push_history(Ok(vec![
            HistoricalRecord::new("2024-03-02", 130.0),
            HistoricalRecord::new("2024-03-01", 120.0),
        ]));
        let mut config = Config::default();
        config.trend.short_dates = true;
        let (dashboard, notifier) = build(api, &config);

        assert!(dashboard.start().await.is_fallback());
        let city = dashboard.snapshot().await.selector.selected().to_string();
        assert_eq!(city, "Ahmedabad");

        let mut form = PredictionForm::new(city);
        for pollutant in Pollutant::ALL {
            form = form.field(pollutant, "12");
        }
        assert!(dashboard.submit(&form).await.is_success());

        let snapshot = dashboard.snapshot().await;
        assert_eq!(snapshot.panels.result.score_text, "123");
        assert_eq!(snapshot.panels.result.category_class, "category cat-Moderate bg-opacity-20");

        let trend = dashboard.chart(ChartSlot::Trend).await.unwrap();
        assert_eq!(trend.spec.labels, vec!["03/01", "03/02"]);
        assert!(notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_trend_failure() {
        let api = Arc::new(ScriptedApi::new());
        api.push_history(Err(ApiError::Decode("bad".to_string())));
        let (dashboard, notifier) = build(api, &Config::default());

        let err = dashboard.refresh_trend().await.unwrap_err();
        assert!(matches!(err, DashboardError::HistoryUnavailable(_)));
        assert!(notifier.alerts().is_empty());
        assert!(dashboard.chart(ChartSlot::Trend).await.is_none());
    }
}
