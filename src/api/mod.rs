//! Prediction Backend API
//!
//! The dashboard talks to three endpoints:
//!
//! - `GET /cities` - directory of selectable city names
//! - `POST /predict` - AQI prediction for one set of readings
//! - `GET /history` - recent AQI records, newest first
//!
//! [`DashboardApi`] is the seam between the dashboard and the network;
//! [`ApiClient`] is the reqwest implementation used by the binary.

mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::model::{HistoricalRecord, PredictionRequest, PredictionResult};

/// Backend endpoints used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Cities,
    Predict,
    History,
}

impl Endpoint {
    /// Path relative to the base URL
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Cities => "/cities",
            Endpoint::Predict => "/predict",
            Endpoint::History => "/history",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Access to the prediction backend
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetch the city directory, in server order
    async fn fetch_cities(&self) -> ApiResult<Vec<String>>;

    /// Request a prediction
    async fn predict(&self, request: &PredictionRequest) -> ApiResult<PredictionResult>;

    /// Fetch the AQI history, newest first
    async fn fetch_history(&self) -> ApiResult<Vec<HistoricalRecord>>;
}
