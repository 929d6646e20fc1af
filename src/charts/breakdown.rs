//! Pollutant breakdown chart
//!
//! Bar chart of the submitted concentrations, one bar per pollutant in
//! `Pollutant::ALL` order.

use std::sync::Arc;

use super::registry::{ChartInstanceId, ChartRegistry, ChartSlot};
use super::spec::{ChartKind, ChartSpec, Dataset};
use crate::model::{Pollutant, PollutantReading};

/// Bar colors, indexed like `Pollutant::ALL`
pub const BREAKDOWN_COLORS: [&str; 6] = [
    "rgba(255, 99, 132, 0.7)",  // PM2.5
    "rgba(54, 162, 235, 0.7)",  // PM10
    "rgba(255, 206, 86, 0.7)",  // NO2
    "rgba(75, 192, 192, 0.7)",  // SO2
    "rgba(153, 102, 255, 0.7)", // CO
    "rgba(255, 159, 64, 0.7)",  // O3
];

pub const BREAKDOWN_LABEL: &str = "Concentration (µg/m³)";

/// Build the breakdown chart for a reading
pub fn breakdown_chart(reading: &PollutantReading) -> ChartSpec {
    let mut dataset = Dataset::new(BREAKDOWN_LABEL, reading.values().to_vec());
    dataset.background = BREAKDOWN_COLORS.to_vec();
    dataset.border_width = 1.0;

    ChartSpec {
        kind: ChartKind::Bar,
        labels: Pollutant::ALL.iter().map(|p| p.label().to_string()).collect(),
        dataset,
        y_begin_at_zero: true,
        show_legend: false,
    }
}

/// Draws the breakdown chart into its slot
#[derive(Debug, Clone)]
pub struct BreakdownChartRenderer {
    registry: Arc<ChartRegistry>,
}

impl BreakdownChartRenderer {
    pub fn new(registry: Arc<ChartRegistry>) -> Self {
        Self { registry }
    }

    pub async fn render(&self, reading: &PollutantReading) -> ChartInstanceId {
        self.registry
            .create_or_replace(ChartSlot::Breakdown, breakdown_chart(reading))
            .await
    }
}
