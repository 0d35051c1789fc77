//! End-to-end tests for the `/weather` endpoint against a fake climate
//! provider. The geocoder points at a closed local port, so every report
//! carries the coordinate fallback label.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use climate_odds::aggregate::ClimateWindowAggregator;
use climate_odds::api::{self, AppState};
use climate_odds::config::ClimateOddsConfig;
use climate_odds::geocode::LocationResolver;
use climate_odds::models::{Coordinate, DailyRecord, MISSING_VALUE};
use climate_odds::power::ClimateDataProvider;
use climate_odds::WeatherError;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Clone)]
enum FakeProvider {
    Records(Vec<DailyRecord>),
    NoData,
    Unreachable,
}

#[async_trait]
impl ClimateDataProvider for FakeProvider {
    async fn daily_records(
        &self,
        _coordinate: Coordinate,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> climate_odds::Result<Vec<DailyRecord>> {
        match self {
            Self::Records(records) => Ok(records.clone()),
            Self::NoData => Err(WeatherError::NoData),
            Self::Unreachable => Err(WeatherError::Upstream(
                "NASA POWER API error: 503 Service Unavailable".to_string(),
            )),
        }
    }
}

fn app(provider: FakeProvider) -> Router {
    let mut config = ClimateOddsConfig::default();
    config.upstream.nominatim_base_url = "http://127.0.0.1:9".to_string();

    let state = AppState {
        resolver: Arc::new(LocationResolver::new(&config).unwrap()),
        aggregator: Arc::new(ClimateWindowAggregator::new(provider)),
    };
    api::router(state)
}

fn window_records() -> Vec<DailyRecord> {
    (0..15)
        .map(|offset| DailyRecord {
            date: NaiveDate::from_ymd_opt(2023, 6, 27).unwrap() + chrono::Days::new(offset),
            temperature: 30.0 + (offset % 3) as f64,
            humidity: 65.0,
            precipitation: 6.0,
        })
        .collect()
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_missing_parameter_yields_400_with_exact_message() {
    let (status, body) = get(
        app(FakeProvider::Records(window_records())),
        "/weather?lat=40.7&date=2024-07-04",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date, latitude, and longitude are required");
}

#[tokio::test]
async fn test_empty_parameter_value_counts_as_missing() {
    let (status, body) = get(
        app(FakeProvider::Records(window_records())),
        "/weather?lat=&lon=-74.0&date=2024-07-04",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date, latitude, and longitude are required");
}

#[tokio::test]
async fn test_no_data_location_yields_404() {
    let (status, body) = get(
        app(FakeProvider::NoData),
        "/weather?lat=0.0&lon=-140.0&date=2024-07-04",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No weather data available for this location");
}

#[tokio::test]
async fn test_all_sentinel_window_yields_404() {
    let records = window_records()
        .into_iter()
        .map(|mut record| {
            record.temperature = MISSING_VALUE;
            record
        })
        .collect();
    let (status, body) = get(
        app(FakeProvider::Records(records)),
        "/weather?lat=40.7&lon=-74.0&date=2024-07-04",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "No valid weather data found for the selected period"
    );
}

#[tokio::test]
async fn test_upstream_failure_yields_500_with_details() {
    let (status, body) = get(
        app(FakeProvider::Unreachable),
        "/weather?lat=40.7&lon=-74.0&date=2024-07-04",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error fetching weather data");
    assert_eq!(
        body["details"],
        "NASA POWER API error: 503 Service Unavailable"
    );
}

#[tokio::test]
async fn test_malformed_date_yields_500() {
    let (status, body) = get(
        app(FakeProvider::Records(window_records())),
        "/weather?lat=40.7&lon=-74.0&date=not-a-date",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error fetching weather data");
}

#[tokio::test]
async fn test_successful_report_shape_and_fallback_label() {
    let (status, body) = get(
        app(FakeProvider::Records(window_records())),
        "/weather?lat=40.7&lon=-74.0&date=2024-07-04",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Location (40.70, -74.00)");
    assert_eq!(body["latitude"], 40.7);
    assert_eq!(body["longitude"], -74.0);
    assert_eq!(body["reference_period"], "20230627 to 20230711");
    assert_eq!(body["reference_days_used"], 15);
    assert_eq!(body["mean_rain_mm"], 6.0);
    assert_eq!(body["mean_humidity_percent"], 65.0);
    // Temperatures cycle 30, 31, 32: mean 31.0, hot bucket 50.
    assert_eq!(body["mean_temperature_C"], 31.0);
    assert_eq!(body["veryHotProbability"], 50);
    assert_eq!(body["veryColdProbability"], 0);
    // 6mm base 50, July at a northern latitude gets no seasonal bonus.
    assert_eq!(body["veryWetProbability"], 50);
    assert_eq!(body["veryUncomfortableProbability"], 50);

    let daily = body["daily"].as_array().unwrap();
    assert_eq!(daily.len(), 15);
    assert_eq!(daily[0]["date"], "20230627");
    assert_eq!(daily[14]["date"], "20230711");
    assert_eq!(daily[0]["temperature"], 30.0);
    assert_eq!(daily[0]["rain"], 6.0);
    assert_eq!(daily[0]["veryHotProbability"], 50);
    assert_eq!(daily[2]["veryHotProbability"], 70);
}
