//! Prediction Request Coordinator
//!
//! Drives one submission through its states:
//!
//! ```text
//! Idle ─▶ Submitting ─┬─▶ Success ────▶ Idle
//!                     ├─▶ Failure ────▶ Idle
//!                     └─▶ Superseded ─▶ Idle
//! ```
//!
//! Input that does not parse is rejected before Submitting. Every
//! submission gets a generation number; a response whose generation is no
//! longer the latest is dropped without touching the view or the charts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use super::error::DashboardError;
use super::notify::Notifier;
use super::policy::ErrorPolicy;
use super::view::DashboardView;
use crate::api::DashboardApi;
use crate::charts::{BreakdownChartRenderer, TrendChartRenderer, TrendRender};
use crate::model::{InputError, PollutantReading, PredictionForm, PredictionResult};

/// How a submission ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Form did not parse; nothing was sent
    Rejected(InputError),
    /// Result displayed and charts rendered
    Succeeded(PredictionResult),
    /// Backend call failed
    Failed(String),
    /// A newer submission started before this one settled
    Superseded,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded(_))
    }
}

pub struct PredictionCoordinator {
    api: Arc<dyn DashboardApi>,
    view: Arc<DashboardView>,
    notifier: Arc<dyn Notifier>,
    breakdown: BreakdownChartRenderer,
    trend: TrendChartRenderer,
    policy: ErrorPolicy,
    generation: Arc<AtomicU64>,
}

impl PredictionCoordinator {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        view: Arc<DashboardView>,
        notifier: Arc<dyn Notifier>,
        breakdown: BreakdownChartRenderer,
        trend: TrendChartRenderer,
        policy: ErrorPolicy,
    ) -> Self {
        Self {
            api,
            view,
            notifier,
            breakdown,
            trend,
            policy,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Generation of the most recent submission (0 before the first)
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run one submission to completion
    pub async fn submit(&self, form: &PredictionForm) -> SubmissionOutcome {
        let request = match form.parse() {
            Ok(request) => request,
            Err(e) => {
                let error = DashboardError::InvalidInput(e.clone());
                tracing::warn!(error = %error, "Submission rejected");
                self.notifier.alert(&error.user_message());
                return SubmissionOutcome::Rejected(e);
            }
        };

        // Released on every exit path, including unwinding out of rendering
        let _trigger = self.view.trigger().engage();

        // Allocated before the first await
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.hide_panels().await;

        let span = tracing::info_span!(
            "submission",
            id = %Uuid::new_v4(),
            generation,
            city = %request.city()
        );

        async move {
            tracing::info!("Requesting prediction");
            let response = self.api.predict(&request).await;

            if !self.is_current(generation) {
                tracing::info!(ok = response.is_ok(), "Discarding superseded response");
                return SubmissionOutcome::Superseded;
            }

            match response {
                Ok(result) => {
                    if let Some(message) = &result.message {
                        tracing::debug!(%message, "backend message");
                    }
                    tracing::info!(aqi = result.aqi, category = %result.category, "Prediction received");

                    let counter = Arc::clone(&self.generation);
                    let shown = self
                        .view
                        .show_result_if(&result, move || {
                            counter.load(Ordering::SeqCst) == generation
                        })
                        .await;
                    if !shown {
                        tracing::info!("Discarding superseded response");
                        return SubmissionOutcome::Superseded;
                    }
                    self.render_charts(request.reading(), generation).await;

                    SubmissionOutcome::Succeeded(result)
                }
                Err(e) => {
                    let error = DashboardError::PredictionFailed(e);
                    self.report(&error);
                    SubmissionOutcome::Failed(error.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Draw both charts for a successful submission
    ///
    /// The reading comes straight from the submission being rendered.
    async fn render_charts(&self, reading: &PollutantReading, generation: u64) {
        self.breakdown.render(reading).await;

        let counter = Arc::clone(&self.generation);
        let still_current = move || counter.load(Ordering::SeqCst) == generation;

        match self.trend.render_if(still_current).await {
            Ok(TrendRender::Rendered(id)) => {
                tracing::debug!(%id, "Trend chart rendered");
            }
            Ok(TrendRender::Discarded) => {
                tracing::debug!("Trend chart skipped, submission superseded");
            }
            Err(e) => self.report(&DashboardError::HistoryUnavailable(e)),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.latest_generation() == generation
    }

    /// Log a backend failure and alert if the policy says so
    fn report(&self, error: &DashboardError) {
        tracing::error!(error = %error, "Backend request failed");

        let alerts = error
            .endpoint()
            .map(|endpoint| self.policy.for_endpoint(endpoint).alerts())
            .unwrap_or(true);
        if alerts {
            self.notifier.alert(&error.user_message());
        }
    }
}

impl std::fmt::Debug for PredictionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionCoordinator")
            .field("policy", &self.policy)
            .field("generation", &self.latest_generation())
            .finish_non_exhaustive()
    }
}
