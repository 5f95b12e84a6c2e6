//! Core data types for weather observations

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level JSON object returned by the upstream API
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Canonical weather observation, independent of the upstream schema
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherMetrics {
    /// Caller-supplied location identifier
    pub location: String,

    /// Observation time in the local zone
    pub observation_time: DateTime<FixedOffset>,

    /// Air temperature (°C)
    pub temperature_c: Option<f64>,

    /// Wind speed (kph)
    pub wind_kph: Option<f64>,

    /// Relative humidity (%)
    pub humidity_percent: Option<f64>,

    /// Free-text weather state
    pub condition: Option<String>,

    /// Untouched upstream payload, kept for auditing
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub raw_payload: Payload,
}

/// Tri-level operational risk verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Green,
    Amber,
    Red,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Green => "green",
            RiskLevel::Amber => "amber",
            RiskLevel::Red => "red",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown risk level: {0}")]
pub struct ParseRiskLevelError(String);

impl FromStr for RiskLevel {
    type Err = ParseRiskLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(RiskLevel::Green),
            "amber" => Ok(RiskLevel::Amber),
            "red" => Ok(RiskLevel::Red),
            _ => Err(ParseRiskLevelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_text_forms() {
        assert_eq!(RiskLevel::Amber.to_string(), "amber");
        assert_eq!("RED".parse::<RiskLevel>().unwrap(), RiskLevel::Red);
        assert!("purple".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_risk_level_serde() {
        let json = serde_json::to_string(&RiskLevel::Green).unwrap();
        assert_eq!(json, r#""green""#);

        let level: RiskLevel = serde_json::from_str(r#""amber""#).unwrap();
        assert_eq!(level, RiskLevel::Amber);
    }
}
