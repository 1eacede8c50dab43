//! Air quality payload model

use crate::classification::Pollutant;
use crate::{AirCheckError, Result};
use serde::{Deserialize, Serialize};

/// Concentration of a single pollutant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    /// Concentration in μg/m³
    pub concentration: f64,
    /// Per-pollutant AQI sub-index, when the upstream service sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi: Option<f64>,
}

/// Parsed body of a 200 response.
///
/// All four fields are required; extra pollutants (CO, SO2, PM10) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    /// Composite index, lower is better
    pub overall_aqi: f64,
    #[serde(rename = "PM2.5")]
    pub pm25: PollutantReading,
    #[serde(rename = "NO2")]
    pub no2: PollutantReading,
    #[serde(rename = "O3")]
    pub o3: PollutantReading,
}

impl AirQualityReading {
    /// Parse a response body, naming the missing or mistyped field on failure
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| AirCheckError::parse(format!("Invalid air quality payload: {e}")))
    }

    #[must_use]
    pub fn pollutant(&self, pollutant: Pollutant) -> &PollutantReading {
        match pollutant {
            Pollutant::Pm25 => &self.pm25,
            Pollutant::No2 => &self.no2,
            Pollutant::O3 => &self.o3,
        }
    }

    #[must_use]
    pub fn concentration(&self, pollutant: Pollutant) -> f64 {
        self.pollutant(pollutant).concentration
    }
}

/// Body of a 400 response
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| AirCheckError::parse(format!("Invalid error payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "CO": {"concentration": 223.64, "aqi": 2},
        "NO2": {"concentration": 50.0, "aqi": 12},
        "O3": {"concentration": 90.0, "aqi": 40},
        "SO2": {"concentration": 1.2, "aqi": 1},
        "PM2.5": {"concentration": 40.0, "aqi": 112},
        "PM10": {"concentration": 55.1, "aqi": 51},
        "overall_aqi": 160
    }"#;

    #[test]
    fn test_parse_full_payload() {
        let reading = AirQualityReading::from_json(FULL_PAYLOAD).unwrap();
        assert_eq!(reading.overall_aqi, 160.0);
        assert_eq!(reading.concentration(Pollutant::Pm25), 40.0);
        assert_eq!(reading.concentration(Pollutant::No2), 50.0);
        assert_eq!(reading.concentration(Pollutant::O3), 90.0);
        assert_eq!(reading.pm25.aqi, Some(112.0));
    }

    #[test]
    fn test_parse_without_sub_indices() {
        let body = r#"{"overall_aqi": 30, "PM2.5": {"concentration": 5},
                       "NO2": {"concentration": 10}, "O3": {"concentration": 20}}"#;
        let reading = AirQualityReading::from_json(body).unwrap();
        assert!(reading.o3.aqi.is_none());
        assert_eq!(reading.concentration(Pollutant::Pm25), 5.0);
    }

    #[test]
    fn test_missing_pollutant_is_parse_error() {
        let body = r#"{"overall_aqi": 30, "PM2.5": {"concentration": 5},
                       "NO2": {"concentration": 10}}"#;
        let err = AirQualityReading::from_json(body).unwrap_err();
        assert!(matches!(err, AirCheckError::Parse { .. }));
        assert!(err.to_string().contains("O3"));
    }

    #[test]
    fn test_missing_overall_aqi_is_parse_error() {
        let body = r#"{"PM2.5": {"concentration": 5}, "NO2": {"concentration": 10},
                       "O3": {"concentration": 20}}"#;
        let err = AirQualityReading::from_json(body).unwrap_err();
        assert!(err.to_string().contains("overall_aqi"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = AirQualityReading::from_json("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, AirCheckError::Parse { .. }));
    }

    #[test]
    fn test_error_body() {
        let body = ErrorBody::from_json(r#"{"error": "invalid city name"}"#).unwrap();
        assert_eq!(body.error, "invalid city name");

        assert!(ErrorBody::from_json(r#"{"message": "nope"}"#).is_err());
    }
}
