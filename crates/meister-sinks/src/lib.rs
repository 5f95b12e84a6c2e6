//! Append-only persistence for graded observations
//!
//! Two backends share one 7-column layout: delimited text (`.csv`) and an
//! xlsx workbook. The backend is chosen from the file extension alone.
//! Every call opens the file, appends exactly one data row, and closes it.

pub mod csv_log;
pub mod workbook;

use std::path::{Path, PathBuf};

use meister_core::{MetricsSink, RiskLevel, WeatherMetrics};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column titles, in order
pub const HEADER: [&str; 7] = [
    "Observed (Eastern)",
    "Location",
    "Temp (C)",
    "Wind (kph)",
    "Humidity (%)",
    "Condition",
    "Risk",
];

pub const DEFAULT_SHEET: &str = "Weather";

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error(
        "xlsx output is not available in this build, cannot write {}. \
         Rebuild with the `xlsx` feature or use a .csv path.",
        path.display()
    )]
    CapabilityMissing { path: PathBuf },
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Persistence format, selected by path suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Csv,
    Workbook,
}

impl Backend {
    /// `.csv` (any case) is delimited text; everything else is a workbook
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Backend::Csv,
            _ => Backend::Workbook,
        }
    }
}

/// One persisted row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRow {
    #[serde(rename = "Observed (Eastern)")]
    pub observed: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Temp (C)")]
    pub temperature_c: Option<f64>,
    #[serde(rename = "Wind (kph)")]
    pub wind_kph: Option<f64>,
    #[serde(rename = "Humidity (%)")]
    pub humidity_percent: Option<f64>,
    #[serde(rename = "Condition")]
    pub condition: Option<String>,
    #[serde(rename = "Risk")]
    pub risk: RiskLevel,
}

impl LogRow {
    pub fn new(metrics: &WeatherMetrics, risk: RiskLevel) -> Self {
        Self {
            observed: metrics.observation_time.to_rfc3339(),
            location: metrics.location.clone(),
            temperature_c: metrics.temperature_c,
            wind_kph: metrics.wind_kph,
            humidity_percent: metrics.humidity_percent,
            condition: metrics.condition.clone(),
            risk,
        }
    }
}

/// Append one row to `path`, writing the header first when the file is new
pub fn append<P: AsRef<Path>>(
    path: P,
    metrics: &WeatherMetrics,
    risk: RiskLevel,
    sheet: &str,
) -> SinkResult<()> {
    let path = path.as_ref();
    let row = LogRow::new(metrics, risk);
    match Backend::for_path(path) {
        Backend::Csv => csv_log::append_row(path, &row),
        Backend::Workbook => workbook::append_row(path, sheet, &row),
    }?;
    tracing::info!(path = %path.display(), location = %row.location, %risk, "appended weather row");
    Ok(())
}

/// Destination for one stream of rows
#[derive(Debug, Clone)]
pub struct MetricsWriter {
    path: PathBuf,
    sheet: String,
}

impl MetricsWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            sheet: DEFAULT_SHEET.to_string(),
        }
    }

    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = sheet.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backend(&self) -> Backend {
        Backend::for_path(&self.path)
    }
}

impl MetricsSink for MetricsWriter {
    fn append(&mut self, metrics: &WeatherMetrics, risk: RiskLevel) -> anyhow::Result<()> {
        append(&self.path, metrics, risk, &self.sheet)?;
        Ok(())
    }
}
