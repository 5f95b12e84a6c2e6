use anyhow::Result;

use crate::{Payload, RiskLevel, WeatherMetrics};

/// Something that can produce a raw payload for a location
#[async_trait::async_trait]
pub trait PayloadSource: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Payload>;
}

/// Something that persists a graded record
pub trait MetricsSink {
    fn append(&mut self, metrics: &WeatherMetrics, risk: RiskLevel) -> Result<()>;
}
