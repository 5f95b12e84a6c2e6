use std::collections::HashMap;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use meister_core::{
    LocalClock, MetricsSink, Payload, PayloadSource, RiskLevel, RiskThresholds, TierThresholds,
    WeatherMetrics,
};
use meister_fetch::{Credentials, MeisterClient};
use meister_sinks::{csv_log, MetricsWriter};
use serde_json::{json, Value};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> MeisterClient {
    let creds = Credentials::resolve(Some("test-key"), Some(base_url), &HashMap::new()).unwrap();
    MeisterClient::new(creds, Duration::from_secs(5)).unwrap()
}

struct StaticSource(Value);

#[async_trait::async_trait]
impl PayloadSource for StaticSource {
    async fn fetch(&self, _location: &str) -> anyhow::Result<Payload> {
        match &self.0 {
            Value::Object(map) => Ok(map.clone()),
            _ => anyhow::bail!("not an object"),
        }
    }
}

#[derive(Default)]
struct VecSink(Vec<(WeatherMetrics, RiskLevel)>);

impl MetricsSink for VecSink {
    fn append(&mut self, metrics: &WeatherMetrics, risk: RiskLevel) -> anyhow::Result<()> {
        self.0.push((metrics.clone(), risk));
        Ok(())
    }
}

#[tokio::test]
async fn ord_scenario_writes_header_and_row() {
    let base = serve(Router::new().route(
        "/weather",
        get(|| async {
            Json(json!({"current": {"temp_c": "19.4", "wind": 12, "humidity_percent": null}}))
        }),
    ))
    .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weather.csv");
    let mut writer = MetricsWriter::new(&path);
    let thresholds = RiskThresholds {
        temperature: TierThresholds::new(None, Some(35.0)),
        ..Default::default()
    };

    let report = meister_cli::run_cycle(
        &client(&base),
        Some(&mut writer as &mut dyn MetricsSink),
        &LocalClock::default(),
        &thresholds,
        "ORD",
    )
    .await
    .unwrap();

    assert_eq!(report.metrics.temperature_c, Some(19.4));
    assert_eq!(report.metrics.wind_kph, Some(12.0));
    assert_eq!(report.metrics.humidity_percent, None);
    assert_eq!(report.risk, RiskLevel::Green);
    assert!(report.written);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "Observed (Eastern),Location,Temp (C),Wind (kph),Humidity (%),Condition,Risk"
    );
    assert!(lines[1].ends_with(",ORD,19.4,12.0,,,green"), "{}", lines[1]);

    let rows = csv_log::read_rows(&path).unwrap();
    assert_eq!(rows[0].location, "ORD");
    assert_eq!(rows[0].temperature_c, Some(19.4));
    assert_eq!(rows[0].wind_kph, Some(12.0));
    assert_eq!(rows[0].humidity_percent, None);
    assert_eq!(rows[0].risk, RiskLevel::Green);
    assert_eq!(rows[0].observed, report.metrics.observation_time.to_rfc3339());
}

#[tokio::test]
async fn failed_fetch_writes_nothing() {
    let base = serve(Router::new().route(
        "/weather",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    ))
    .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weather.csv");
    let mut writer = MetricsWriter::new(&path);

    let result = meister_cli::run_cycle(
        &client(&base),
        Some(&mut writer as &mut dyn MetricsSink),
        &LocalClock::default(),
        &RiskThresholds::default(),
        "ORD",
    )
    .await;

    assert!(result.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn non_object_response_writes_nothing() {
    let base = serve(Router::new().route("/weather", get(|| async { Json(json!("sunny")) }))).await;
    let mut sink = VecSink::default();

    let err = meister_cli::run_cycle(
        &client(&base),
        Some(&mut sink as &mut dyn MetricsSink),
        &LocalClock::default(),
        &RiskThresholds::default(),
        "ORD",
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("Unexpected response format"));
    assert!(sink.0.is_empty());
}

#[tokio::test]
async fn amber_verdict_reaches_sink() {
    let source = StaticSource(json!({"wind_kph": 25, "summary": "Gusty"}));
    let mut sink = VecSink::default();
    let thresholds = RiskThresholds {
        wind: TierThresholds::new(Some(20.0), None),
        ..Default::default()
    };

    let report = meister_cli::run_cycle(
        &source,
        Some(&mut sink as &mut dyn MetricsSink),
        &LocalClock::default(),
        &thresholds,
        "DEN",
    )
    .await
    .unwrap();

    assert_eq!(report.risk, RiskLevel::Amber);
    assert_eq!(sink.0.len(), 1);
    assert_eq!(sink.0[0].0.condition.as_deref(), Some("Gusty"));
    assert_eq!(sink.0[0].1, RiskLevel::Amber);
    assert!(report.summary_line().ends_with("Condition: Gusty | Risk: amber"));
}

#[tokio::test]
async fn print_only_cycle_skips_sink() {
    let source = StaticSource(json!({"temp": 41, "observed_at": "2024-07-01T18:00:00Z"}));
    let thresholds = RiskThresholds {
        temperature: TierThresholds::new(Some(30.0), Some(38.0)),
        ..Default::default()
    };

    let report = meister_cli::run_cycle(&source, None, &LocalClock::default(), &thresholds, "PHX")
        .await
        .unwrap();

    assert_eq!(report.risk, RiskLevel::Red);
    assert!(!report.written);
    assert_eq!(
        report.summary_line(),
        "Location: PHX | Observed: 2024-07-01T14:00:00-04:00 | Temp: 41.0°C | Risk: red"
    );
}
