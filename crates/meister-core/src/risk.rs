//! Risk classification against amber/red thresholds
//!
//! Red always dominates amber: every metric's red tier is checked before
//! any amber tier is considered.

use serde::{Deserialize, Serialize};

use crate::types::{RiskLevel, WeatherMetrics};

/// Amber/red pair for a single metric. A missing member disables that tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub amber: Option<f64>,
    pub red: Option<f64>,
}

impl TierThresholds {
    pub fn new(amber: Option<f64>, red: Option<f64>) -> Self {
        Self { amber, red }
    }
}

/// Threshold pairs for every graded metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub temperature: TierThresholds,
    pub wind: TierThresholds,
    pub humidity: TierThresholds,
}

impl RiskThresholds {
    /// (value, thresholds) in evaluation order: temperature, wind, humidity
    fn checks(&self, metrics: &WeatherMetrics) -> [(Option<f64>, TierThresholds); 3] {
        [
            (metrics.temperature_c, self.temperature),
            (metrics.wind_kph, self.wind),
            (metrics.humidity_percent, self.humidity),
        ]
    }
}

fn breaches(value: Option<f64>, threshold: Option<f64>) -> bool {
    matches!((value, threshold), (Some(v), Some(t)) if v >= t)
}

/// Grade a record. Unknown values and unset thresholds are skipped.
pub fn classify(metrics: &WeatherMetrics, thresholds: &RiskThresholds) -> RiskLevel {
    let checks = thresholds.checks(metrics);

    if checks.iter().any(|(value, tier)| breaches(*value, tier.red)) {
        return RiskLevel::Red;
    }
    if checks.iter().any(|(value, tier)| breaches(*value, tier.amber)) {
        return RiskLevel::Amber;
    }
    RiskLevel::Green
}
