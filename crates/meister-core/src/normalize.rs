//! Payload normalization
//!
//! The upstream API has shipped several shapes over time: flat objects,
//! objects nesting the reading under `current`, and a handful of aliases
//! for each field. Every canonical field is looked up through an ordered
//! alias list; the first key that is *present* wins, even when its value
//! is `null`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

use crate::clock::LocalClock;
use crate::types::{Payload, WeatherMetrics};

/// Key holding the nested current-observation object
pub const CURRENT_KEY: &str = "current";

/// Canonical fields extracted from a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Temperature,
    Wind,
    Humidity,
    Condition,
    ObservationTime,
}

/// Canonical field -> upstream key candidates, in priority order
pub const FIELD_ALIASES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::Temperature,
        &["temperature_c", "temp_c", "temperature", "temp"],
    ),
    (
        CanonicalField::Wind,
        &["wind_kph", "wind_speed_kph", "wind_speed", "wind"],
    ),
    (
        CanonicalField::Humidity,
        &["humidity_percent", "humidity", "relative_humidity"],
    ),
    (CanonicalField::Condition, &["condition", "summary", "weather"]),
    (
        CanonicalField::ObservationTime,
        &["observation_time", "observed_at", "timestamp"],
    ),
];

/// Candidate keys for a canonical field
pub fn aliases(field: CanonicalField) -> &'static [&'static str] {
    FIELD_ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, keys)| *keys)
        .unwrap_or(&[])
}

/// Value of the first candidate key present in `obj`
pub fn find_first<'a>(obj: &'a Payload, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

/// Best-effort conversion to a real number; malformed input becomes `None`
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601-like timestamp into the clock's zone.
///
/// Zone-less timestamps are taken as UTC. Returns `None` when nothing matches.
pub fn parse_timestamp(raw: &str, clock: &LocalClock) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(clock.to_local(dt));
    }
    for fmt in AWARE_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(clock.to_local(dt));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(clock.naive_to_local(naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| clock.naive_to_local(naive))
}

fn resolve_observation_time(value: Option<&Value>, clock: &LocalClock) -> DateTime<FixedOffset> {
    match value {
        Some(Value::String(s)) => parse_timestamp(s, clock).unwrap_or_else(|| {
            debug!(raw = %s, "unparseable observation time, using now");
            clock.now()
        }),
        Some(other) => {
            debug!(raw = %other, "non-string observation time, using now");
            clock.now()
        }
        None => clock.now(),
    }
}

/// Select the object that carries the current reading
fn current_observation(payload: &Payload) -> &Payload {
    match payload.get(CURRENT_KEY) {
        Some(Value::Object(inner)) => inner,
        _ => payload,
    }
}

/// Normalize a payload using the default (Eastern) clock
pub fn normalize(payload: Payload, location: &str) -> WeatherMetrics {
    normalize_with_clock(payload, location, &LocalClock::default())
}

/// Normalize a payload, resolving "now" and zone conversion through `clock`
pub fn normalize_with_clock(payload: Payload, location: &str, clock: &LocalClock) -> WeatherMetrics {
    let current = current_observation(&payload);
    let field = |f: CanonicalField| find_first(current, aliases(f));

    let temperature_c = field(CanonicalField::Temperature).and_then(coerce_f64);
    let wind_kph = field(CanonicalField::Wind).and_then(coerce_f64);
    let humidity_percent = field(CanonicalField::Humidity).and_then(coerce_f64);
    let condition = field(CanonicalField::Condition).and_then(stringify);
    let observation_time =
        resolve_observation_time(field(CanonicalField::ObservationTime), clock);

    WeatherMetrics {
        location: location.to_string(),
        observation_time,
        temperature_c,
        wind_kph,
        humidity_percent,
        condition,
        raw_payload: payload,
    }
}
