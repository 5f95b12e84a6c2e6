//! Local-time provider
//!
//! Every timestamp the pipeline emits lives in one canonical zone
//! (US/Eastern unless configured otherwise).

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Zone used when none is configured
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Display format for [`LocalClock::formatted_now`]
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    #[error("Unknown timezone: {0}")]
    UnknownZone(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalClock {
    tz: Tz,
}

impl LocalClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build a clock from an IANA zone name such as `America/Chicago`
    pub fn from_name(name: &str) -> Result<Self, ClockError> {
        name.trim()
            .parse::<Tz>()
            .map(Self::new)
            .map_err(|_| ClockError::UnknownZone(name.to_string()))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.tz).fixed_offset()
    }

    /// Convert an aware timestamp into the local zone
    pub fn to_local(&self, value: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        value.with_timezone(&self.tz).fixed_offset()
    }

    /// Convert a zone-less timestamp into the local zone, treating it as UTC
    pub fn naive_to_local(&self, value: NaiveDateTime) -> DateTime<FixedOffset> {
        Utc.from_utc_datetime(&value)
            .with_timezone(&self.tz)
            .fixed_offset()
    }

    pub fn formatted_now(&self) -> String {
        Utc::now()
            .with_timezone(&self.tz)
            .format(DISPLAY_FORMAT)
            .to_string()
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}
