use anyhow::Result;
use clap::Parser;
use meister_config::ProcessEnv;
use meister_core::MetricsSink;
use meister_fetch::MeisterClient;
use meister_sinks::MetricsWriter;

use meister_cli::{run_cycle, Args, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Observability
    meister_obs::init("meister", args.json_logs);

    // Config
    let cfg = args.load_config()?;
    let settings = Settings::resolve(&args, &cfg, &ProcessEnv)?;
    tracing::debug!(
        location = %settings.location,
        base_url = settings.credentials.base_url(),
        output = ?settings.output,
        "resolved settings"
    );

    let client = MeisterClient::new(settings.credentials.clone(), settings.timeout)?;
    let mut writer = settings
        .output
        .as_ref()
        .map(|path| MetricsWriter::new(path).with_sheet(settings.sheet.as_str()));

    let report = run_cycle(
        &client,
        writer.as_mut().map(|w| w as &mut dyn MetricsSink),
        &settings.clock,
        &settings.thresholds,
        &settings.location,
    )
    .await?;

    println!("{}", report.summary_line());
    Ok(())
}
