//! NASA POWER daily-point API client.
//!
//! POWER serves daily agroclimatology series keyed by `YYYYMMDD` date
//! strings under `properties.parameter`, one map per requested parameter.
//! Unmeasured days carry the `-999` sentinel and are filtered downstream.

use crate::config::ClimateOddsConfig;
use crate::error::WeatherError;
use crate::models::{Coordinate, DailyRecord, MISSING_VALUE};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Source of daily climate records for a coordinate and date range.
#[async_trait]
pub trait ClimateDataProvider: Send + Sync {
    /// Fetch one record per available day in `[start, end]`, ascending by
    /// date. Fails with [`WeatherError::NoData`] when the provider has no
    /// parameter data at all for the coordinate (e.g. an ocean point).
    async fn daily_records(
        &self,
        coordinate: Coordinate,
        start: NaiveDate,
        end: NaiveDate,
    ) -> crate::Result<Vec<DailyRecord>>;
}

/// HTTP client for the POWER temporal daily endpoint.
pub struct PowerApiClient {
    client: Client,
    base_url: String,
}

impl PowerApiClient {
    pub fn new(config: &ClimateOddsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_seconds.into()))
            .user_agent(concat!("climate-odds/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.upstream.power_base_url.clone(),
        })
    }
}

#[async_trait]
impl ClimateDataProvider for PowerApiClient {
    async fn daily_records(
        &self,
        coordinate: Coordinate,
        start: NaiveDate,
        end: NaiveDate,
    ) -> crate::Result<Vec<DailyRecord>> {
        let url = format!("{}/api/temporal/daily/point", self.base_url);
        debug!(
            "Fetching POWER daily records for ({}, {}) from {} to {}",
            coordinate.latitude, coordinate.longitude, start, end
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("parameters", "PRECTOTCORR,T2M,RH2M"),
                ("community", "AG"),
                ("format", "JSON"),
            ])
            .query(&[
                ("longitude", coordinate.longitude),
                ("latitude", coordinate.latitude),
            ])
            .query(&[
                ("start", start.format("%Y%m%d").to_string()),
                ("end", end.format("%Y%m%d").to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream(format!(
                "NASA POWER API error: {status}"
            )));
        }

        let body: response::PowerResponse = response
            .json()
            .await
            .map_err(|err| WeatherError::Upstream(format!("Failed to parse POWER response: {err}")))?;

        let Some(parameters) = body.properties.and_then(|p| p.parameter) else {
            return Err(WeatherError::NoData);
        };

        // Iterate the precipitation key set in ascending date order; the
        // other parameter maps share the same keys when present.
        let mut dates: Vec<&String> = parameters.precipitation.keys().collect();
        dates.sort();

        let records = dates
            .into_iter()
            .filter_map(|key| {
                let date = NaiveDate::parse_from_str(key, "%Y%m%d").ok()?;
                Some(DailyRecord {
                    date,
                    temperature: field(&parameters.temperature, key),
                    humidity: field(&parameters.humidity, key),
                    precipitation: field(&parameters.precipitation, key),
                })
            })
            .collect();

        Ok(records)
    }
}

fn field(series: &std::collections::HashMap<String, f64>, key: &str) -> f64 {
    series.get(key).copied().unwrap_or(MISSING_VALUE)
}

/// POWER API response structures.
mod response {
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Deserialize)]
    pub struct PowerResponse {
        pub properties: Option<Properties>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Properties {
        pub parameter: Option<ParameterSet>,
    }

    /// Daily series keyed by `YYYYMMDD`, one map per parameter.
    #[derive(Debug, Deserialize)]
    pub struct ParameterSet {
        #[serde(rename = "PRECTOTCORR", default)]
        pub precipitation: HashMap<String, f64>,
        #[serde(rename = "T2M", default)]
        pub temperature: HashMap<String, f64>,
        #[serde(rename = "RH2M", default)]
        pub humidity: HashMap<String, f64>,
    }
}
