//! Error types and their HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Request-path failures, each with a fixed HTTP status and JSON body.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// A required query parameter was missing.
    #[error("Date, latitude, and longitude are required")]
    Validation,

    /// The climate provider has no parameter data for the coordinate.
    #[error("No weather data available for this location")]
    NoData,

    /// Every day in the reference window carried the missing-data sentinel.
    #[error("No valid weather data found for the selected period")]
    NoValidData,

    /// Provider unreachable, non-success status, or unparseable payload.
    #[error("{0}")]
    Upstream(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation => (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() })),
            Self::NoData | Self::NoValidData => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            Self::Upstream(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Error fetching weather data", "details": details }),
            ),
        };

        if status.is_server_error() {
            error!("Request failed: {self}");
        } else {
            warn!("Request rejected ({status}): {self}");
        }

        (status, Json(body)).into_response()
    }
}
