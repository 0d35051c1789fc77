use anyhow::{Context, Result};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregate::ClimateWindowAggregator;
use crate::api::{self, AppState};
use crate::config::ClimateOddsConfig;
use crate::geocode::LocationResolver;
use crate::power::PowerApiClient;

pub async fn run(config: ClimateOddsConfig) -> Result<()> {
    let resolver = LocationResolver::new(&config)?;
    let provider = PowerApiClient::new(&config)?;
    let state = AppState {
        resolver: Arc::new(resolver),
        aggregator: Arc::new(ClimateWindowAggregator::new(provider)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state).layer(cors);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server running at http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;
    Ok(())
}
