//! Climate Odds - condition-probability estimates from historical climate data
//!
//! This library exposes a single weather endpoint that scores the likelihood
//! of extreme heat, extreme cold, heavy precipitation and humid discomfort
//! for a coordinate and calendar date, based on a 15-day prior-year
//! reference window of NASA POWER daily records.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod geocode;
pub mod models;
pub mod power;
pub mod scoring;
pub mod web;

// Re-export core types for public API
pub use aggregate::{ClimateWindowAggregator, ReferenceWindow};
pub use config::ClimateOddsConfig;
pub use error::WeatherError;
pub use geocode::LocationResolver;
pub use models::{Coordinate, DailyProbabilities, DailyRecord, WeatherReport};
pub use power::{ClimateDataProvider, PowerApiClient};
pub use scoring::ProbabilityScores;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;
