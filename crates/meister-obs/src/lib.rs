use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info,meister=debug";

/// Initialize logging.
/// - RUST_LOG respected; default to "info,meister=debug"
/// - `json` switches to one JSON object per line, otherwise human-readable
/// - Output goes to stderr so stdout stays clean for the summary line
pub fn init(service_name: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!(service = %service_name, "Observability initialized");
}
