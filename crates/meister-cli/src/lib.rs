//! One fetch -> normalize -> classify -> write cycle
//!
//! Nothing is persisted unless the fetch succeeds, and a cycle never
//! retries.

pub mod cli;

pub use cli::{Args, Settings};

use anyhow::{Context, Result};
use meister_core::{
    classify, format_metrics, normalize_with_clock, LocalClock, MetricsSink, PayloadSource,
    RiskLevel, RiskThresholds, WeatherMetrics,
};
use tracing::info;

/// Outcome of one cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub metrics: WeatherMetrics,
    pub risk: RiskLevel,
    pub written: bool,
}

impl CycleReport {
    /// Formatted record plus the verdict, for stdout
    pub fn summary_line(&self) -> String {
        format!("{} | Risk: {}", format_metrics(&self.metrics), self.risk)
    }
}

pub async fn run_cycle<S>(
    source: &S,
    sink: Option<&mut dyn MetricsSink>,
    clock: &LocalClock,
    thresholds: &RiskThresholds,
    location: &str,
) -> Result<CycleReport>
where
    S: PayloadSource + ?Sized,
{
    let payload = source
        .fetch(location)
        .await
        .with_context(|| format!("failed to fetch weather for {location}"))?;

    let metrics = normalize_with_clock(payload, location, clock);
    let risk = classify(&metrics, thresholds);
    info!(%location, %risk, observed = %metrics.observation_time, "classified observation");

    let written = match sink {
        Some(sink) => {
            sink.append(&metrics, risk)
                .context("failed to append weather row")?;
            true
        }
        None => false,
    };

    Ok(CycleReport {
        metrics,
        risk,
        written,
    })
}
