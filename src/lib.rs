//! # AQI Dashboard
//!
//! Client for an air-quality prediction backend: submit pollutant
//! readings, show the predicted AQI, and chart the submitted readings and
//! the AQI history.
//!
//! ## Features
//!
//! - **Resilient city directory**: falls back to a built-in list when the
//!   backend cannot provide one
//! - **Predict cycle**: explicit input parsing, loading state that is always
//!   released, stale responses discarded
//! - **Charts**: pollutant breakdown and oldest-to-newest AQI trend, one
//!   live instance per slot
//!
//! ## Modules
//!
//! - [`api`]: backend client (`/cities`, `/predict`, `/history`)
//! - [`model`]: readings, prediction request/result, history records
//! - [`charts`]: chart specs, slot registry and renderers
//! - [`dashboard`]: view state, city loader, prediction coordinator
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aqi_dashboard::{ApiClient, Config, ConsoleNotifier, Dashboard, Pollutant, PredictionForm};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let api = Arc::new(ApiClient::from_config(&config.api)?);
//!     let dashboard = Dashboard::new(api, &config, Arc::new(ConsoleNotifier));
//!
//!     dashboard.start().await;
//!
//!     let mut form = PredictionForm::new("Delhi");
//!     for pollutant in Pollutant::ALL {
//!         form = form.field(pollutant, "42");
//!     }
//!     let outcome = dashboard.submit(&form).await;
//!     println!("{:?}", outcome);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod model;

pub use api::{ApiClient, ApiError, ApiResult, DashboardApi, Endpoint};

pub use charts::{
    breakdown_chart, trend_chart, ChartInstance, ChartKind, ChartRegistry, ChartSlot, ChartSpec,
    Dataset, RegistryStats, TextCanvas,
};

pub use config::{
    ApiConfig, CitiesConfig, Config, ConfigDiscovery, ConfigError, LoggingConfig, TrendConfig,
};

pub use dashboard::{
    CityLoadOutcome, CitySelector, ConsoleNotifier, Dashboard, DashboardError, DashboardView,
    ErrorPolicy, FailureVisibility, Notifier, SubmissionOutcome, ViewSnapshot,
};

pub use model::{
    HistoricalRecord, InputError, Pollutant, PollutantReading, PredictionForm, PredictionRequest,
    PredictionResult,
};
