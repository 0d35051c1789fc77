//! Core data types shared across the service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value the climate provider uses to mark a field as unmeasured.
pub const MISSING_VALUE: f64 = -999.0;

/// Geographic coordinate supplied per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Display label used when reverse geocoding yields nothing.
    #[must_use]
    pub fn fallback_label(&self) -> String {
        format!("Location ({:.2}, {:.2})", self.latitude, self.longitude)
    }
}

/// One day of historical climate data from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// 2-metre air temperature in °C
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Precipitation in mm
    pub precipitation: f64,
}

impl DailyRecord {
    /// A record is usable only when none of its fields carry the sentinel.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.temperature != MISSING_VALUE
            && self.humidity != MISSING_VALUE
            && self.precipitation != MISSING_VALUE
    }
}

/// Per-day condition probabilities derived from a valid [`DailyRecord`].
#[derive(Debug, Clone, Serialize)]
pub struct DailyProbabilities {
    #[serde(with = "compact_date")]
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
    pub rain: f64,
    #[serde(rename = "veryHotProbability")]
    pub very_hot_probability: u8,
    #[serde(rename = "veryColdProbability")]
    pub very_cold_probability: u8,
    #[serde(rename = "veryWetProbability")]
    pub very_wet_probability: u8,
    #[serde(rename = "veryUncomfortableProbability")]
    pub very_uncomfortable_probability: u8,
}

/// Full response payload for one request: window means, aggregate
/// probabilities and the per-day breakdown in ascending date order.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// "YYYYMMDD to YYYYMMDD"
    pub reference_period: String,
    pub reference_days_used: usize,
    pub mean_rain_mm: f64,
    #[serde(rename = "mean_temperature_C")]
    pub mean_temperature_c: f64,
    pub mean_humidity_percent: f64,
    #[serde(rename = "veryHotProbability")]
    pub very_hot_probability: u8,
    #[serde(rename = "veryColdProbability")]
    pub very_cold_probability: u8,
    #[serde(rename = "veryWetProbability")]
    pub very_wet_probability: u8,
    #[serde(rename = "veryUncomfortableProbability")]
    pub very_uncomfortable_probability: u8,
    pub daily: Vec<DailyProbabilities>,
}

/// Serialize dates in the provider's compact `YYYYMMDD` form.
mod compact_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y%m%d").to_string())
    }
}
