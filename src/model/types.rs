//! Core data types for the AQI dashboard
//!
//! - `Pollutant`: the six tracked substances, in display order
//! - `PollutantReading`: one submitted set of concentrations
//! - `PredictionRequest` / `PredictionResult`: the `/predict` exchange
//! - `HistoricalRecord`: one point of the `/history` series

use serde::{Deserialize, Serialize};

/// A tracked pollutant
///
/// The declaration order is the display order used by every chart and by
/// `PollutantReading::values`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
    No2,
    So2,
    Co,
    O3,
}

impl Pollutant {
    /// All pollutants in fixed display order
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Chart label
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }

    /// Field name in the `/predict` payload
    pub fn field(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm2_5",
            Pollutant::Pm10 => "pm10",
            Pollutant::No2 => "no2",
            Pollutant::So2 => "so2",
            Pollutant::Co => "co",
            Pollutant::O3 => "o3",
        }
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pollutant concentrations in µg/m³
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    pub pm2_5: f64,
    pub pm10: f64,
    pub no2: f64,
    pub so2: f64,
    pub co: f64,
    pub o3: f64,
}

impl PollutantReading {
    /// Concentration of a single pollutant
    pub fn value(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm2_5,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }

    /// All concentrations in `Pollutant::ALL` order
    pub fn values(&self) -> [f64; 6] {
        Pollutant::ALL.map(|p| self.value(p))
    }
}

/// Body of `POST /predict`
///
/// Serializes flat: `{city, pm2_5, pm10, no2, so2, co, o3}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    city: String,
    #[serde(flatten)]
    reading: PollutantReading,
}

impl PredictionRequest {
    pub fn new(city: impl Into<String>, reading: PollutantReading) -> Self {
        Self {
            city: city.into(),
            reading,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn reading(&self) -> &PollutantReading {
        &self.reading
    }
}

/// Response of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted AQI (may be fractional)
    pub aqi: f64,
    /// Category label chosen by the backend, e.g. "Good" or "Very Poor"
    pub category: String,
    /// Informational message from the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PredictionResult {
    pub fn new(aqi: f64, category: impl Into<String>) -> Self {
        Self {
            aqi,
            category: category.into(),
            message: None,
        }
    }

    /// AQI rounded to the nearest integer, halves rounding up
    ///
    /// Same result as `Math.round` for every finite value.
    pub fn display_score(&self) -> String {
        let floor = self.aqi.floor();
        let rounded = if self.aqi - floor >= 0.5 { floor + 1.0 } else { floor };
        (rounded as i64).to_string()
    }

    /// Style class for the category
    ///
    /// Only the first space of the label is replaced ("Very Poor" becomes
    /// "cat-Very-Poor").
    pub fn category_class(&self) -> String {
        format!("cat-{}", self.category.replacen(' ', "-", 1))
    }

    /// Class list for the score element
    pub fn score_class(&self) -> String {
        format!("score {}", self.category_class())
    }

    /// Class list for the category badge
    pub fn category_badge_class(&self) -> String {
        format!("category {} bg-opacity-20", self.category_class())
    }
}

/// One entry of the AQI history, as sent by `GET /history`
///
/// The backend sends whole rows; only the date and AQI are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "AQI")]
    pub aqi: f64,
}

impl HistoricalRecord {
    pub fn new(date: impl Into<String>, aqi: f64) -> Self {
        Self {
            date: date.into(),
            aqi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> PollutantReading {
        PollutantReading {
            pm2_5: 1.0,
            pm10: 2.0,
            no2: 3.0,
            so2: 4.0,
            co: 5.0,
            o3: 6.0,
        }
    }

    #[test]
    fn test_values_follow_display_order() {
        assert_eq!(reading().values(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let labels: Vec<_> = Pollutant::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["PM2.5", "PM10", "NO2", "SO2", "CO", "O3"]);
    }

    #[test]
    fn test_request_serializes_flat() {
        let request = PredictionRequest::new("Delhi", reading());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "city": "Delhi",
                "pm2_5": 1.0,
                "pm10": 2.0,
                "no2": 3.0,
                "so2": 4.0,
                "co": 5.0,
                "o3": 6.0,
            })
        );
    }

    #[test]
    fn test_display_score_rounding() {
        assert_eq!(PredictionResult::new(123.6, "Moderate").display_score(), "124");
        assert_eq!(PredictionResult::new(123.4, "Moderate").display_score(), "123");
        assert_eq!(PredictionResult::new(2.5, "Good").display_score(), "3");
        assert_eq!(PredictionResult::new(-2.5, "Good").display_score(), "-2");
        assert_eq!(PredictionResult::new(-0.3, "Good").display_score(), "0");
    }

    #[test]
    fn test_display_score_float_edges() {
        let score = |aqi: f64| PredictionResult::new(aqi, "Good").display_score();
        assert_eq!(score(0.49999999999999994), "0");
        assert_eq!(score(4503599627370497.0), "4503599627370497");
        assert_eq!(score(-0.5), "0");
        assert_eq!(score(-1.5), "-1");
        assert_eq!(score(0.5), "1");
    }

    #[test]
    fn test_category_class_replaces_first_space_only() {
        assert_eq!(PredictionResult::new(10.0, "Good").category_class(), "cat-Good");
        assert_eq!(
            PredictionResult::new(350.0, "Very Poor").category_class(),
            "cat-Very-Poor"
        );
        assert_eq!(PredictionResult::new(1.0, "A B C").category_class(), "cat-A-B C");
    }

    #[test]
    fn test_element_classes() {
        let result = PredictionResult::new(350.0, "Very Poor");
        assert_eq!(result.score_class(), "score cat-Very-Poor");
        assert_eq!(
            result.category_badge_class(),
            "category cat-Very-Poor bg-opacity-20"
        );
    }

    #[test]
    fn test_result_accepts_backend_message() {
        let result: PredictionResult = serde_json::from_str(
            r#"{"aqi": 87.2, "category": "Satisfactory", "message": "Prediction successful and data logged."}"#,
        )
        .unwrap();
        assert_eq!(result.category, "Satisfactory");
        assert!(result.message.is_some());
    }

    #[test]
    fn test_history_record_ignores_extra_columns() {
        let record: HistoricalRecord = serde_json::from_str(
            r#"{"City": "Delhi", "Date": "2024-01-02", "PM2.5": 80.0, "AQI": 154.0, "AQI_Category": "Moderate"}"#,
        )
        .unwrap();
        assert_eq!(record, HistoricalRecord::new("2024-01-02", 154.0));
    }
}
