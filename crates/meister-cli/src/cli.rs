//! Command-line arguments and their merge with the config file and environment
//!
//! Precedence for every setting: flag, then `meister.toml`, then environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use meister_config::{resolve_thresholds, AppConfig, EnvSource, ThresholdOverrides};
use meister_core::{LocalClock, RiskThresholds};
use meister_fetch::Credentials;

#[derive(Debug, Parser)]
#[command(
    name = "meister",
    version,
    about = "Fetch current weather for a location, grade its risk, and append it to a log"
)]
pub struct Args {
    /// Location identifier passed to the API (falls back to [station] location)
    pub location: Option<String>,

    /// Log file; `.csv` writes delimited text, anything else an xlsx workbook
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Workbook sheet name
    #[arg(long)]
    pub sheet: Option<String>,

    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long)]
    pub temperature_amber: Option<f64>,
    #[arg(long)]
    pub temperature_red: Option<f64>,
    #[arg(long)]
    pub wind_amber: Option<f64>,
    #[arg(long)]
    pub wind_red: Option<f64>,
    #[arg(long)]
    pub humidity_amber: Option<f64>,
    #[arg(long)]
    pub humidity_red: Option<f64>,

    /// IANA timezone for timestamps (default America/New_York)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Print the summary without appending to the log
    #[arg(long)]
    pub no_write: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Path to the TOML config file
    #[arg(long, env = "MEISTER_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn threshold_overrides(&self) -> ThresholdOverrides {
        ThresholdOverrides {
            temperature_amber: self.temperature_amber,
            temperature_red: self.temperature_red,
            wind_amber: self.wind_amber,
            wind_red: self.wind_red,
            humidity_amber: self.humidity_amber,
            humidity_red: self.humidity_red,
        }
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        let cfg = match &self.config {
            Some(path) => AppConfig::load_from(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => AppConfig::load().context("failed to load configuration")?,
        };
        Ok(cfg)
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub location: String,
    pub credentials: Credentials,
    pub timeout: Duration,
    pub thresholds: RiskThresholds,
    pub output: Option<PathBuf>,
    pub sheet: String,
    pub clock: LocalClock,
}

impl Settings {
    pub fn resolve(args: &Args, cfg: &AppConfig, env: &dyn EnvSource) -> Result<Self> {
        let location = args
            .location
            .clone()
            .or_else(|| cfg.location().map(str::to_string))
            .ok_or_else(|| anyhow!("no location given; pass one or set [station] location"))?;

        let credentials = Credentials::resolve(
            args.api_key.as_deref(),
            args.base_url.as_deref().or(cfg.base_url()),
            env,
        )?;

        let timeout = args
            .timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| cfg.timeout());

        let thresholds = resolve_thresholds(&args.threshold_overrides().or(cfg.thresholds()), env);

        let output = if args.no_write {
            None
        } else {
            args.output
                .clone()
                .or_else(|| cfg.output_path().map(PathBuf::from))
        };

        let sheet = args
            .sheet
            .clone()
            .unwrap_or_else(|| cfg.sheet().to_string());

        let clock = match args.timezone.as_deref().or(cfg.timezone()) {
            Some(name) => LocalClock::from_name(name)?,
            None => LocalClock::default(),
        };

        Ok(Self {
            location,
            credentials,
            timeout,
            thresholds,
            output,
            sheet,
            clock,
        })
    }
}
