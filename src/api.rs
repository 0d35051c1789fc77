//! HTTP surface: the `/weather` endpoint.

use crate::aggregate::ClimateWindowAggregator;
use crate::error::WeatherError;
use crate::geocode::LocationResolver;
use crate::models::{Coordinate, WeatherReport};
use crate::power::ClimateDataProvider;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Shared per-process state handed to every request.
pub struct AppState<P> {
    pub resolver: Arc<LocationResolver>,
    pub aggregator: Arc<ClimateWindowAggregator<P>>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            aggregator: Arc::clone(&self.aggregator),
        }
    }
}

/// Raw query parameters; validation happens in the handler so the error
/// body stays under our control.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub date: Option<String>,
}

pub fn router<P: ClimateDataProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/weather", get(get_weather::<P>))
        .with_state(state)
}

async fn get_weather<P: ClimateDataProvider>(
    State(state): State<AppState<P>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherReport>, WeatherError> {
    // An empty value counts as missing, same as an absent parameter.
    let present = |value: Option<String>| value.filter(|v| !v.is_empty());
    let (Some(lat), Some(lon), Some(date)) = (
        present(query.lat),
        present(query.lon),
        present(query.date),
    ) else {
        return Err(WeatherError::Validation);
    };

    // Malformed values follow the generic upstream-failure path, not the
    // missing-parameter one.
    let latitude: f64 = lat
        .parse()
        .map_err(|err| WeatherError::Upstream(format!("Invalid latitude '{lat}': {err}")))?;
    let longitude: f64 = lon
        .parse()
        .map_err(|err| WeatherError::Upstream(format!("Invalid longitude '{lon}': {err}")))?;
    let target_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|err| WeatherError::Upstream(format!("Invalid date '{date}': {err}")))?;

    let coordinate = Coordinate::new(latitude, longitude);
    let location = state.resolver.resolve_label(coordinate).await;
    let report = state
        .aggregator
        .aggregate(coordinate, target_date, location)
        .await?;

    info!(
        "Served weather report for ({latitude}, {longitude}) on {target_date}: {} valid days",
        report.reference_days_used
    );
    Ok(Json(report))
}
