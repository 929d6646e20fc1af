//! Failure visibility per backend dependency
//!
//! Every failure is logged. The policy decides which ones are also put in
//! front of the user.

use serde::Deserialize;

use crate::api::Endpoint;

/// How a failed backend call is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FailureVisibility {
    /// Blocking alert plus diagnostic log
    #[serde(rename = "alert")]
    Alert,
    /// Diagnostic log only
    #[serde(rename = "log")]
    LogOnly,
}

impl FailureVisibility {
    pub fn alerts(self) -> bool {
        matches!(self, FailureVisibility::Alert)
    }
}

/// Failure visibility for each endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ErrorPolicy {
    #[serde(default = "log_only")]
    pub cities: FailureVisibility,

    #[serde(default = "alert")]
    pub prediction: FailureVisibility,

    #[serde(default = "log_only")]
    pub history: FailureVisibility,
}

fn alert() -> FailureVisibility {
    FailureVisibility::Alert
}

fn log_only() -> FailureVisibility {
    FailureVisibility::LogOnly
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self {
            cities: log_only(),
            prediction: alert(),
            history: log_only(),
        }
    }
}

impl ErrorPolicy {
    pub fn for_endpoint(&self, endpoint: Endpoint) -> FailureVisibility {
        match endpoint {
            Endpoint::Cities => self.cities,
            Endpoint::Predict => self.prediction,
            Endpoint::History => self.history,
        }
    }
}
