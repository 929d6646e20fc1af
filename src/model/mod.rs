//! Dashboard data model
//!
//! - **types**: pollutant readings, prediction request/result, history records
//! - **form**: raw form text and its parse step
//! - **error**: input parsing errors

pub mod error;
pub mod form;
pub mod types;

pub use error::InputError;
pub use form::{parse_concentration, PredictionForm};
pub use types::{HistoricalRecord, Pollutant, PollutantReading, PredictionRequest, PredictionResult};
