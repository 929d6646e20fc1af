//! Historical AQI trend chart
//!
//! `/history` answers newest-first. The chart reverses the series so the
//! x axis reads oldest to newest, left to right.

use chrono::NaiveDate;
use std::sync::Arc;

use super::registry::{ChartInstanceId, ChartRegistry, ChartSlot};
use super::spec::{ChartKind, ChartSpec, Dataset};
use crate::api::{ApiResult, DashboardApi};
use crate::model::HistoricalRecord;

pub const TREND_LABEL: &str = "AQI History";
pub const TREND_BORDER: &str = "#6366f1";
pub const TREND_FILL: &str = "rgba(99, 102, 241, 0.2)";
pub const TREND_TENSION: f64 = 0.4;

/// Build the trend chart from newest-first records
pub fn trend_chart(mut newest_first: Vec<HistoricalRecord>, short_dates: bool) -> ChartSpec {
    newest_first.reverse();
    let records = newest_first;

    let labels = records
        .iter()
        .map(|r| {
            if short_dates {
                short_date(&r.date)
            } else {
                r.date.clone()
            }
        })
        .collect();

    let mut dataset = Dataset::new(TREND_LABEL, records.iter().map(|r| r.aqi).collect());
    dataset.border = Some(TREND_BORDER);
    dataset.background = vec![TREND_FILL];
    dataset.border_width = 1.0;
    dataset.fill = true;
    dataset.tension = TREND_TENSION;

    ChartSpec {
        kind: ChartKind::Line,
        labels,
        dataset,
        y_begin_at_zero: false,
        show_legend: true,
    }
}

/// `2024-01-15` (optionally followed by a time) becomes `01/15`
///
/// Labels that are not dates are returned unchanged.
pub fn short_date(label: &str) -> String {
    label
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(|date| date.format("%m/%d").to_string())
        .unwrap_or_else(|| label.to_string())
}

/// Result of a trend render attempt that reached the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendRender {
    /// Chart installed in the trend slot
    Rendered(ChartInstanceId),
    /// History arrived after the caller stopped caring; slot untouched
    Discarded,
}

/// Fetches `/history` and draws the trend chart into its slot
#[derive(Clone)]
pub struct TrendChartRenderer {
    api: Arc<dyn DashboardApi>,
    registry: Arc<ChartRegistry>,
    short_dates: bool,
}

impl TrendChartRenderer {
    pub fn new(api: Arc<dyn DashboardApi>, registry: Arc<ChartRegistry>) -> Self {
        Self {
            api,
            registry,
            short_dates: false,
        }
    }

    /// Builder method: shorten date labels
    pub fn short_dates(mut self, enabled: bool) -> Self {
        self.short_dates = enabled;
        self
    }

    /// Fetch and render unconditionally
    pub async fn render(&self) -> ApiResult<TrendRender> {
        self.render_if(|| true).await
    }

    /// Fetch, then render only if `still_current()` holds once the data is in
    ///
    /// On fetch failure the slot keeps whatever it held before.
    pub async fn render_if<F>(&self, still_current: F) -> ApiResult<TrendRender>
    where
        F: Fn() -> bool + Send + Sync,
    {
        let history = self.api.fetch_history().await?;

        if !still_current() {
            tracing::debug!(records = history.len(), "discarding superseded history");
            return Ok(TrendRender::Discarded);
        }

        let spec = trend_chart(history, self.short_dates);
        let id = self.registry.create_or_replace(ChartSlot::Trend, spec).await;
        Ok(TrendRender::Rendered(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedApi;
    use crate::api::ApiError;

    fn newest_first() -> Vec<HistoricalRecord> {
        vec![
            HistoricalRecord::new("d3", 10.0),
            HistoricalRecord::new("d2", 20.0),
            HistoricalRecord::new("d1", 30.0),
        ]
    }

    #[test]
    fn test_reverses_to_oldest_first() {
        let chart = trend_chart(newest_first(), false);
        assert_eq!(chart.labels, vec!["d1", "d2", "d3"]);
        assert_eq!(chart.dataset.values, vec![30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_line_styling() {
        let chart = trend_chart(newest_first(), false);
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.dataset.label, "AQI History");
        assert_eq!(chart.dataset.border, Some("#6366f1"));
        assert_eq!(chart.dataset.background_at(0), Some("rgba(99, 102, 241, 0.2)"));
        assert!(chart.dataset.fill);
        assert_eq!(chart.dataset.tension, 0.4);
    }

    #[test]
    fn test_empty_history() {
        let chart = trend_chart(Vec::new(), false);
        assert!(chart.is_empty());
        assert!(chart.labels.is_empty());
    }

    #[test]
    fn test_short_dates() {
        assert_eq!(short_date("2024-01-15"), "01/15");
        assert_eq!(short_date("2024-01-15 08:30:00"), "01/15");
        assert_eq!(short_date("d1"), "d1");
        assert_eq!(short_date("2024-13-45"), "2024-13-45");

        let chart = trend_chart(
            vec![
                HistoricalRecord::new("2024-02-02", 1.0),
                HistoricalRecord::new("2024-02-01", 2.0),
            ],
            true,
        );
        assert_eq!(chart.labels, vec!["02/01", "02/02"]);
    }

    #[tokio::test]
    async fn test_render_installs_chart() {
        let api = Arc::new(ScriptedApi::new());
        api.push_history(Ok(newest_first()));
        let registry = Arc::new(ChartRegistry::new());

        let renderer = TrendChartRenderer::new(api, Arc::clone(&registry));
        let outcome = renderer.render().await.unwrap();
        assert!(matches!(outcome, TrendRender::Rendered(_)));

        let chart = registry.get(ChartSlot::Trend).await.unwrap();
        assert_eq!(chart.spec.labels, vec!["d1", "d2", "d3"]);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_chart() {
        let api = Arc::new(ScriptedApi::new());
        api.push_history(Ok(newest_first()));
        api.push_history(Err(ApiError::Status {
            status: 500,
            reason: "Internal Server Error".to_string(),
        }));
        let registry = Arc::new(ChartRegistry::new());
        let renderer = TrendChartRenderer::new(api, Arc::clone(&registry));

        let TrendRender::Rendered(first) = renderer.render().await.unwrap() else {
            panic!("expected a rendered chart");
        };
        assert!(renderer.render().await.is_err());

        assert_eq!(registry.get(ChartSlot::Trend).await.unwrap().id, first);
    }

    #[tokio::test]
    async fn test_failure_on_first_render_leaves_slot_empty() {
        let api = Arc::new(ScriptedApi::new());
        api.push_history(Err(ApiError::Unavailable("connection refused".to_string())));
        let registry = Arc::new(ChartRegistry::new());

        let renderer = TrendChartRenderer::new(api, Arc::clone(&registry));
        assert!(renderer.render().await.is_err());
        assert!(registry.get(ChartSlot::Trend).await.is_none());
    }

    #[tokio::test]
    async fn test_superseded_history_is_discarded() {
        let api = Arc::new(ScriptedApi::new());
        api.push_history(Ok(newest_first()));
        let registry = Arc::new(ChartRegistry::new());

        let renderer = TrendChartRenderer::new(api, Arc::clone(&registry));
        let outcome = renderer.render_if(|| false).await.unwrap();
        assert_eq!(outcome, TrendRender::Discarded);
        assert_eq!(registry.live_instances().await, 0);
    }
}
