//! Dashboard error taxonomy

use thiserror::Error;

use crate::api::{ApiError, Endpoint};
use crate::model::InputError;

/// Failures the dashboard reports to the user or the diagnostic log
#[derive(Error, Debug)]
pub enum DashboardError {
    /// `/cities` failed; recovered with the fallback list
    #[error("City directory unavailable: {0}")]
    DirectoryUnavailable(#[source] ApiError),

    /// `/predict` failed; the submission ends without a result
    #[error("Prediction failed: {0}")]
    PredictionFailed(#[source] ApiError),

    /// `/history` failed; the trend chart keeps its previous state
    #[error("History unavailable: {0}")]
    HistoryUnavailable(#[source] ApiError),

    /// Form text could not be parsed; nothing was sent
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

impl DashboardError {
    /// Endpoint whose failure this is, if any
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            DashboardError::DirectoryUnavailable(_) => Some(Endpoint::Cities),
            DashboardError::PredictionFailed(_) => Some(Endpoint::Predict),
            DashboardError::HistoryUnavailable(_) => Some(Endpoint::History),
            DashboardError::InvalidInput(_) => None,
        }
    }

    /// Text shown in a user-facing alert
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::DirectoryUnavailable(e) => {
                format!("Could not load the city list; showing default cities.\n\n{}", e)
            }
            DashboardError::PredictionFailed(e) => {
                format!("Failed to get prediction. Ensure the backend is running.\n\n{}", e)
            }
            DashboardError::HistoryUnavailable(e) => {
                format!("Failed to load AQI history.\n\n{}", e)
            }
            DashboardError::InvalidInput(e) => format!("Please check your input.\n\n{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_alert_text() {
        let err = DashboardError::PredictionFailed(ApiError::Status {
            status: 500,
            reason: "Internal Server Error".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "Failed to get prediction. Ensure the backend is running.\n\nServer error: Internal Server Error"
        );
        assert_eq!(err.endpoint(), Some(Endpoint::Predict));
    }
}
