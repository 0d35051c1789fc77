//! Best-effort reverse geocoding against Nominatim.
//!
//! Resolution never fails: any lookup problem falls back to a label
//! synthesized from the coordinate, so a geocoding outage cannot take the
//! weather endpoint down with it.

use crate::config::ClimateOddsConfig;
use crate::models::Coordinate;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub struct LocationResolver {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    display_name: Option<String>,
}

impl LocationResolver {
    pub fn new(config: &ClimateOddsConfig) -> Result<Self> {
        // Nominatim rejects requests without a User-Agent.
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_seconds.into()))
            .user_agent(concat!("climate-odds/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.upstream.nominatim_base_url.clone(),
        })
    }

    /// Resolve a coordinate to a human-readable place name, or a
    /// coordinate-derived label when the lookup fails or comes back empty.
    pub async fn resolve_label(&self, coordinate: Coordinate) -> String {
        match self.lookup(coordinate).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                debug!("Reverse geocoding returned no display name, using coordinate label");
                coordinate.fallback_label()
            }
            Err(err) => {
                debug!("Reverse geocoding failed: {err}, using coordinate label");
                coordinate.fallback_label()
            }
        }
    }

    async fn lookup(&self, coordinate: Coordinate) -> Result<Option<String>> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("format", "json")])
            .query(&[
                ("lat", coordinate.latitude),
                ("lon", coordinate.longitude),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ReverseGeocodeResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Nominatim reverse geocoding response")?;

        Ok(body.display_name)
    }
}
