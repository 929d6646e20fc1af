//! Dashboard Charts
//!
//! - **spec**: plain chart descriptions (`ChartSpec`)
//! - **registry**: one live instance per slot (`ChartRegistry`)
//! - **breakdown**: pollutant bar chart
//! - **trend**: historical AQI line chart
//! - **text**: terminal drawing of chart specs
//!
//! # Render Path
//!
//! ```text
//! PollutantReading ──▶ breakdown_chart ──▶ create_or_replace(Breakdown)
//! GET /history ──▶ reverse ──▶ trend_chart ──▶ create_or_replace(Trend)
//! ```

pub mod breakdown;
pub mod registry;
pub mod spec;
pub mod text;
pub mod trend;

pub use breakdown::{breakdown_chart, BreakdownChartRenderer, BREAKDOWN_COLORS};
pub use registry::{ChartInstance, ChartInstanceId, ChartRegistry, ChartSlot, RegistryStats};
pub use spec::{ChartKind, ChartSpec, Dataset};
pub use text::TextCanvas;
pub use trend::{short_date, trend_chart, TrendChartRenderer, TrendRender};
