//! Rule-based probability scoring for weather conditions.
//!
//! The thresholds below encode rough comfort and hazard bands: temperature
//! extremes, a heat-index-like combination of heat and humidity, and
//! precipitation intensity tiers with a coarse hemispheric-season correction.
//! This is a heuristic, not a calibrated statistical model.

use serde::Serialize;

/// Hard ceiling applied to every score.
const MAX_PROBABILITY: f64 = 95.0;

/// Probability scores in percent for the four tracked conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityScores {
    pub hot: f64,
    pub cold: f64,
    pub wet: f64,
    pub uncomfortable: f64,
}

/// Score one set of conditions.
///
/// Pure and total: out-of-range inputs simply land in whichever bucket
/// matches, or score 0. Each dimension picks a single bucket,
/// highest-threshold first; the wet score additionally gets a seasonal
/// bonus before the final clamp to [0, 95].
///
/// The seasonal rule treats October through March as the wet half of the
/// year north of the equator and April through September as the wet half
/// south of it (the equator itself counts as southern). This is a known
/// approximation and is kept deliberately.
#[must_use]
pub fn score(
    temperature: f64,
    humidity: f64,
    precipitation: f64,
    latitude: f64,
    month: u32,
) -> ProbabilityScores {
    let hot: f64 = if temperature >= 35.0 {
        90.0
    } else if temperature >= 32.0 {
        70.0
    } else if temperature >= 30.0 {
        50.0
    } else {
        0.0
    };

    let cold: f64 = if temperature <= -5.0 {
        90.0
    } else if temperature <= 0.0 {
        70.0
    } else if temperature <= 5.0 {
        50.0
    } else {
        0.0
    };

    let uncomfortable: f64 = if temperature >= 32.0 && humidity >= 60.0 {
        90.0
    } else if temperature >= 28.0 && humidity >= 70.0 {
        75.0
    } else if temperature >= 25.0 && humidity >= 60.0 {
        50.0
    } else {
        0.0
    };

    let mut wet: f64 = if precipitation >= 15.0 {
        85.0
    } else if precipitation >= 5.0 {
        50.0
    } else if precipitation >= 1.0 {
        20.0
    } else {
        0.0
    };

    let northern_wet_half = month >= 10 || month <= 3;
    if (northern_wet_half && latitude > 0.0) || (!northern_wet_half && latitude <= 0.0) {
        wet += 15.0;
    }

    ProbabilityScores {
        hot: hot.min(MAX_PROBABILITY),
        cold: cold.min(MAX_PROBABILITY),
        wet: wet.min(MAX_PROBABILITY),
        uncomfortable: uncomfortable.min(MAX_PROBABILITY),
    }
}
