//! Layered lookup: explicit value, else environment variable, else absent

use std::collections::HashMap;

use meister_core::{RiskThresholds, TierThresholds};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const API_KEY_VAR: &str = "WEATHER_MEISTER_API_KEY";
pub const BASE_URL_VAR: &str = "WEATHER_MEISTER_BASE_URL";

pub const TEMPERATURE_AMBER_VAR: &str = "WEATHER_RISK_TEMPERATURE_AMBER";
pub const TEMPERATURE_RED_VAR: &str = "WEATHER_RISK_TEMPERATURE_RED";
pub const WIND_AMBER_VAR: &str = "WEATHER_RISK_WIND_AMBER";
pub const WIND_RED_VAR: &str = "WEATHER_RISK_WIND_RED";
pub const HUMIDITY_AMBER_VAR: &str = "WEATHER_RISK_HUMIDITY_AMBER";
pub const HUMIDITY_RED_VAR: &str = "WEATHER_RISK_HUMIDITY_RED";

/// Read access to named string variables
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Explicit string, else a non-empty environment value
pub fn resolve_string(explicit: Option<&str>, name: &str, env: &dyn EnvSource) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| env.var(name).filter(|v| !v.is_empty()))
}

/// Explicit number, else the environment value parsed as `f64`.
///
/// An unparseable environment value counts as unset.
pub fn resolve_f64(explicit: Option<f64>, name: &str, env: &dyn EnvSource) -> Option<f64> {
    if explicit.is_some() {
        return explicit;
    }
    let raw = env.var(name)?;
    match raw.trim().parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring non-numeric threshold");
            None
        }
    }
}

/// Caller-supplied thresholds; any field left `None` falls through to the environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOverrides {
    pub temperature_amber: Option<f64>,
    pub temperature_red: Option<f64>,
    pub wind_amber: Option<f64>,
    pub wind_red: Option<f64>,
    pub humidity_amber: Option<f64>,
    pub humidity_red: Option<f64>,
}

impl ThresholdOverrides {
    /// Field-wise `self`, else `fallback`
    pub fn or(self, fallback: ThresholdOverrides) -> ThresholdOverrides {
        ThresholdOverrides {
            temperature_amber: self.temperature_amber.or(fallback.temperature_amber),
            temperature_red: self.temperature_red.or(fallback.temperature_red),
            wind_amber: self.wind_amber.or(fallback.wind_amber),
            wind_red: self.wind_red.or(fallback.wind_red),
            humidity_amber: self.humidity_amber.or(fallback.humidity_amber),
            humidity_red: self.humidity_red.or(fallback.humidity_red),
        }
    }
}

pub fn resolve_thresholds(explicit: &ThresholdOverrides, env: &dyn EnvSource) -> RiskThresholds {
    let tier = |amber: Option<f64>, amber_var: &str, red: Option<f64>, red_var: &str| {
        TierThresholds::new(
            resolve_f64(amber, amber_var, env),
            resolve_f64(red, red_var, env),
        )
    };

    RiskThresholds {
        temperature: tier(
            explicit.temperature_amber,
            TEMPERATURE_AMBER_VAR,
            explicit.temperature_red,
            TEMPERATURE_RED_VAR,
        ),
        wind: tier(explicit.wind_amber, WIND_AMBER_VAR, explicit.wind_red, WIND_RED_VAR),
        humidity: tier(
            explicit.humidity_amber,
            HUMIDITY_AMBER_VAR,
            explicit.humidity_red,
            HUMIDITY_RED_VAR,
        ),
    }
}
