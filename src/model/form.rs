//! Prediction form input
//!
//! Holds the raw text the user typed and parses it into a
//! `PredictionRequest`. Malformed numbers are rejected here so they never
//! reach the request payload.

use super::error::InputError;
use super::types::{Pollutant, PollutantReading, PredictionRequest};

/// Raw text of the prediction form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionForm {
    pub city: String,
    pub pm2_5: String,
    pub pm10: String,
    pub no2: String,
    pub so2: String,
    pub co: String,
    pub o3: String,
}

impl PredictionForm {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Default::default()
        }
    }

    /// Builder method: set the text of one pollutant field
    pub fn field(mut self, pollutant: Pollutant, text: impl Into<String>) -> Self {
        *self.text_mut(pollutant) = text.into();
        self
    }

    /// Text currently entered for a pollutant
    pub fn text(&self, pollutant: Pollutant) -> &str {
        match pollutant {
            Pollutant::Pm25 => &self.pm2_5,
            Pollutant::Pm10 => &self.pm10,
            Pollutant::No2 => &self.no2,
            Pollutant::So2 => &self.so2,
            Pollutant::Co => &self.co,
            Pollutant::O3 => &self.o3,
        }
    }

    fn text_mut(&mut self, pollutant: Pollutant) -> &mut String {
        match pollutant {
            Pollutant::Pm25 => &mut self.pm2_5,
            Pollutant::Pm10 => &mut self.pm10,
            Pollutant::No2 => &mut self.no2,
            Pollutant::So2 => &mut self.so2,
            Pollutant::Co => &mut self.co,
            Pollutant::O3 => &mut self.o3,
        }
    }

    /// Parse the form into a request
    ///
    /// The city is taken as-is, even when empty. Fields are checked in
    /// display order and the first failure is returned.
    pub fn parse(&self) -> Result<PredictionRequest, InputError> {
        let reading = PollutantReading {
            pm2_5: parse_concentration(Pollutant::Pm25, &self.pm2_5)?,
            pm10: parse_concentration(Pollutant::Pm10, &self.pm10)?,
            no2: parse_concentration(Pollutant::No2, &self.no2)?,
            so2: parse_concentration(Pollutant::So2, &self.so2)?,
            co: parse_concentration(Pollutant::Co, &self.co)?,
            o3: parse_concentration(Pollutant::O3, &self.o3)?,
        };

        Ok(PredictionRequest::new(self.city.clone(), reading))
    }
}

/// Parse one concentration field
pub fn parse_concentration(pollutant: Pollutant, text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Missing { pollutant });
    }

    let value: f64 = trimmed.parse().map_err(|_| InputError::NotANumber {
        pollutant,
        value: text.to_string(),
    })?;

    if !value.is_finite() {
        return Err(InputError::NotFinite {
            pollutant,
            value: text.to_string(),
        });
    }

    Ok(value)
}
