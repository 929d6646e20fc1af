//! Scripted backend for unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{ApiError, ApiResult, DashboardApi, Endpoint};
use crate::model::{HistoricalRecord, PredictionRequest, PredictionResult};

type PredictStep = (Option<oneshot::Receiver<()>>, ApiResult<PredictionResult>);

/// Backend that replays queued responses in call order
///
/// When a queue runs dry, cities and history answer with an empty list and
/// predict answers `Unavailable`.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    cities: Mutex<VecDeque<ApiResult<Vec<String>>>>,
    predictions: Mutex<VecDeque<PredictStep>>,
    history: Mutex<VecDeque<ApiResult<Vec<HistoricalRecord>>>>,
    requests: Mutex<Vec<PredictionRequest>>,
    city_calls: AtomicUsize,
    predict_calls: AtomicUsize,
    history_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_cities(&self, result: ApiResult<Vec<String>>) {
        self.cities.lock().unwrap().push_back(result);
    }

    pub fn push_prediction(&self, result: ApiResult<PredictionResult>) {
        self.predictions.lock().unwrap().push_back((None, result));
    }

    /// Queue a prediction that is held until the returned sender fires
    pub fn push_gated_prediction(&self, result: ApiResult<PredictionResult>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.predictions.lock().unwrap().push_back((Some(rx), result));
        tx
    }

    pub fn push_history(&self, result: ApiResult<Vec<HistoricalRecord>>) {
        self.history.lock().unwrap().push_back(result);
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        match endpoint {
            Endpoint::Cities => self.city_calls.load(Ordering::SeqCst),
            Endpoint::Predict => self.predict_calls.load(Ordering::SeqCst),
            Endpoint::History => self.history_calls.load(Ordering::SeqCst),
        }
    }

    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DashboardApi for ScriptedApi {
    async fn fetch_cities(&self) -> ApiResult<Vec<String>> {
        self.city_calls.fetch_add(1, Ordering::SeqCst);
        self.cities.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn predict(&self, request: &PredictionRequest) -> ApiResult<PredictionResult> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let step = self.predictions.lock().unwrap().pop_front();
        match step {
            Some((gate, result)) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                result
            }
            None => Err(ApiError::Unavailable("no scripted prediction".to_string())),
        }
    }

    async fn fetch_history(&self) -> ApiResult<Vec<HistoricalRecord>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}
