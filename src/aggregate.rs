//! Reference-window aggregation: fetch a 15-day prior-year window of daily
//! climate records, filter sentinel days, score each day, then score the
//! window means through the same pure function.

use crate::error::WeatherError;
use crate::models::{Coordinate, DailyProbabilities, WeatherReport};
use crate::power::ClimateDataProvider;
use crate::scoring;
use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

/// 15-day span (7 days either side, inclusive) centered on the prior-year
/// anniversary of a target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReferenceWindow {
    #[must_use]
    pub fn for_target_date(target: NaiveDate) -> Self {
        let anniversary = prior_year(target);
        Self {
            start: anniversary - Days::new(7),
            end: anniversary + Days::new(7),
        }
    }

    /// Human-readable "YYYYMMDD to YYYYMMDD" span.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d")
        )
    }
}

// Calendar-correct year decrement; Feb 29 has no prior-year equivalent and
// normalizes to Feb 28.
fn prior_year(date: NaiveDate) -> NaiveDate {
    let year = date.year() - 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}

/// Computes one [`WeatherReport`] per request from a climate data provider.
pub struct ClimateWindowAggregator<P> {
    provider: P,
}

impl<P: ClimateDataProvider> ClimateWindowAggregator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Aggregate the reference window for `target_date` at `coordinate`.
    ///
    /// Fails with [`WeatherError::NoData`] when the provider has nothing for
    /// the coordinate and [`WeatherError::NoValidData`] when every fetched
    /// day carries the missing-data sentinel.
    pub async fn aggregate(
        &self,
        coordinate: Coordinate,
        target_date: NaiveDate,
        location: String,
    ) -> crate::Result<WeatherReport> {
        let window = ReferenceWindow::for_target_date(target_date);
        // Per-day scores use the target date's month, not each record's own:
        // the window is centered on the anniversary and stands in for that
        // season even where it crosses a month boundary.
        let month = target_date.month();
        debug!(
            "Aggregating window {} for ({}, {})",
            window.label(),
            coordinate.latitude,
            coordinate.longitude
        );

        let records = self
            .provider
            .daily_records(coordinate, window.start, window.end)
            .await?;

        let mut total_rain = 0.0;
        let mut total_temperature = 0.0;
        let mut total_humidity = 0.0;
        let mut daily = Vec::new();

        for record in records.iter().filter(|r| r.is_valid()) {
            total_rain += record.precipitation;
            total_temperature += record.temperature;
            total_humidity += record.humidity;

            let scores = scoring::score(
                record.temperature,
                record.humidity,
                record.precipitation,
                coordinate.latitude,
                month,
            );
            daily.push(DailyProbabilities {
                date: record.date,
                temperature: record.temperature,
                humidity: record.humidity,
                rain: record.precipitation,
                very_hot_probability: scores.hot.round() as u8,
                very_cold_probability: scores.cold.round() as u8,
                very_wet_probability: scores.wet.round() as u8,
                very_uncomfortable_probability: scores.uncomfortable.round() as u8,
            });
        }

        if daily.is_empty() {
            return Err(WeatherError::NoValidData);
        }

        let count = daily.len() as f64;
        let mean_rain = total_rain / count;
        let mean_temperature = total_temperature / count;
        let mean_humidity = total_humidity / count;

        // Same scoring function, applied a second time to the window means.
        let aggregate_scores = scoring::score(
            mean_temperature,
            mean_humidity,
            mean_rain,
            coordinate.latitude,
            month,
        );

        Ok(WeatherReport {
            location,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            reference_period: window.label(),
            reference_days_used: daily.len(),
            mean_rain_mm: round_to(mean_rain, 2),
            mean_temperature_c: round_to(mean_temperature, 1),
            mean_humidity_percent: round_to(mean_humidity, 1),
            very_hot_probability: aggregate_scores.hot.round() as u8,
            very_cold_probability: aggregate_scores.cold.round() as u8,
            very_wet_probability: aggregate_scores.wet.round() as u8,
            very_uncomfortable_probability: aggregate_scores.uncomfortable.round() as u8,
            daily,
        })
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
