use anyhow::Result;
use climate_odds::config::ClimateOddsConfig;
use climate_odds::web;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClimateOddsConfig::load()?;
    web::run(config).await
}
