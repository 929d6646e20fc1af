//! Input parsing errors

use thiserror::Error;

use super::types::Pollutant;

/// Errors raised while turning form text into a `PredictionRequest`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Field left empty
    #[error("{pollutant} is required")]
    Missing { pollutant: Pollutant },

    /// Text is not a number
    #[error("{pollutant} must be a number, got {value:?}")]
    NotANumber { pollutant: Pollutant, value: String },

    /// Parsed to NaN or infinity
    #[error("{pollutant} must be a finite number, got {value:?}")]
    NotFinite { pollutant: Pollutant, value: String },
}

impl InputError {
    /// The pollutant field at fault
    pub fn pollutant(&self) -> Pollutant {
        match self {
            InputError::Missing { pollutant }
            | InputError::NotANumber { pollutant, .. }
            | InputError::NotFinite { pollutant, .. } => *pollutant,
        }
    }
}
