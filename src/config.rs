//! Configuration management.
//!
//! Settings come from environment variables with the `CLIMATE_ODDS` prefix
//! (e.g. `CLIMATE_ODDS_SERVER__PORT`), with sane defaults for everything.
//! A bare `PORT` variable is also honored for the server port, matching the
//! usual container convention.

use anyhow::{Context, Result, bail};
use config::{Config, Environment};
use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClimateOddsConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind on (default 5000)
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Outbound API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL for the NASA POWER API
    #[serde(default = "default_power_base_url")]
    pub power_base_url: String,
    /// Base URL for the Nominatim reverse-geocoding API
    #[serde(default = "default_nominatim_base_url")]
    pub nominatim_base_url: String,
    /// Request timeout in seconds for both upstreams
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

// Default value functions
fn default_port() -> u16 {
    5000
}

fn default_power_base_url() -> String {
    "https://power.larc.nasa.gov".to_string()
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_timeout() -> u32 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            power_base_url: default_power_base_url(),
            nominatim_base_url: default_nominatim_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ClimateOddsConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(
                Environment::with_prefix("CLIMATE_ODDS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ClimateOddsConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings.
    pub fn validate(&self) -> Result<()> {
        for url in [&self.upstream.power_base_url, &self.upstream.nominatim_base_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("Upstream base URL must be a valid HTTP or HTTPS URL: {url}");
            }
        }

        if self.upstream.timeout_seconds == 0 || self.upstream.timeout_seconds > 300 {
            bail!("Upstream timeout must be between 1 and 300 seconds");
        }

        Ok(())
    }
}
