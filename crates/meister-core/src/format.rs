//! Single-line human-readable rendering of a record

use std::fmt;

use crate::types::WeatherMetrics;

pub const SEGMENT_SEPARATOR: &str = " | ";

/// Display adapter for [`WeatherMetrics`]
pub struct Summary<'a>(pub &'a WeatherMetrics);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        let mut parts = vec![
            format!("Location: {}", m.location),
            format!("Observed: {}", m.observation_time.to_rfc3339()),
        ];
        if let Some(t) = m.temperature_c {
            parts.push(format!("Temp: {t:.1}°C"));
        }
        if let Some(w) = m.wind_kph {
            parts.push(format!("Wind: {w:.1} kph"));
        }
        if let Some(h) = m.humidity_percent {
            parts.push(format!("Humidity: {h:.1}%"));
        }
        if let Some(c) = m.condition.as_deref().filter(|c| !c.is_empty()) {
            parts.push(format!("Condition: {c}"));
        }
        f.write_str(&parts.join(SEGMENT_SEPARATOR))
    }
}

pub fn format_metrics(metrics: &WeatherMetrics) -> String {
    Summary(metrics).to_string()
}
