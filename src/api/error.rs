//! Backend API error types

use thiserror::Error;

/// Errors that can occur when talking to the prediction backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// Could not connect to the backend
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Server error: {reason}")]
    Status { status: u16, reason: String },

    /// Body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a reqwest send failure
    pub(crate) fn from_send(error: reqwest::Error) -> Self {
        if error.is_connect() {
            ApiError::Unavailable(error.to_string())
        } else {
            ApiError::Request(error)
        }
    }

    /// HTTP status of the failed response, if the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;
