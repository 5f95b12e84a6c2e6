pub mod env;

pub use env::*;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_PATH_VAR: &str = "MEISTER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "meister.toml";
pub const DEFAULT_SHEET: &str = "Weather";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub sheet: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationConfig {
    pub location: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub api: Option<ApiConfig>,
    pub risk: Option<ThresholdOverrides>,
    pub output: Option<OutputConfig>,
    pub station: Option<StationConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from MEISTER_CONFIG path (TOML) if present, with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(path)
    }

    /// Load from an explicit path; a missing file yields the defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)?;
            let cfg = toml::from_str::<AppConfig>(&s)?;
            tracing::debug!(path = %path.display(), "loaded configuration file");
            cfg
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    pub fn base_url(&self) -> Option<&str> {
        self.api.as_ref().and_then(|a| a.base_url.as_deref())
    }

    /// Request timeout (default 15s)
    pub fn timeout(&self) -> Duration {
        let secs = self
            .api
            .as_ref()
            .and_then(|a| a.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn thresholds(&self) -> ThresholdOverrides {
        self.risk.unwrap_or_default()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    /// Workbook sheet name (default "Weather")
    pub fn sheet(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.sheet.as_deref())
            .unwrap_or(DEFAULT_SHEET)
    }

    pub fn location(&self) -> Option<&str> {
        self.station.as_ref().and_then(|s| s.location.as_deref())
    }

    pub fn timezone(&self) -> Option<&str> {
        self.station.as_ref().and_then(|s| s.timezone.as_deref())
    }
}
