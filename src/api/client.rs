//! Backend REST API Client
//!
//! HTTP client for the prediction backend. Requests carry no timeout and
//! are never retried.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiResult};
use super::{DashboardApi, Endpoint};
use crate::config::ApiConfig;
use crate::model::{HistoricalRecord, PredictionRequest, PredictionResult};

/// reqwest-backed [`DashboardApi`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("aqi-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the `[api]` config section
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::new(config.base_url.clone())
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Check the status and decode a JSON body
    async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "backend returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn fetch_cities(&self) -> ApiResult<Vec<String>> {
        let response = self
            .client
            .get(self.url(Endpoint::Cities))
            .send()
            .await
            .map_err(ApiError::from_send)?;

        Self::read_json(response).await
    }

    async fn predict(&self, request: &PredictionRequest) -> ApiResult<PredictionResult> {
        let response = self
            .client
            .post(self.url(Endpoint::Predict))
            .json(request)
            .send()
            .await
            .map_err(ApiError::from_send)?;

        Self::read_json(response).await
    }

    async fn fetch_history(&self) -> ApiResult<Vec<HistoricalRecord>> {
        let response = self
            .client
            .get(self.url(Endpoint::History))
            .send()
            .await
            .map_err(ApiError::from_send)?;

        Self::read_json(response).await
    }
}
