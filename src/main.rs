use std::sync::Arc;

use pubsub_latency::server::{self, AppState};
use pubsub_latency::{publisher, telemetry, Config, LatencyHarness, LatencyLog, TracingLog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("invalid env: {e}");
            return Err(e.into());
        }
    };
    telemetry::init(config.log_format()?);

    let variant = config.variant();
    tracing::info!(
        variant = %variant,
        topic = %config.topic_path(),
        default_count = config.default_count(),
        "starting"
    );

    let publisher = publisher::connect(&config).await?;
    let log: Arc<dyn LatencyLog> = Arc::new(TracingLog::new(config.log_name()));
    let harness =
        LatencyHarness::new(publisher, log.clone()).with_timeout(config.publish_timeout());

    let state = AppState {
        variant,
        default_count: config.default_count(),
        harness: Arc::new(harness),
        log,
    };
    server::serve(server::build_router(state), config.port()).await
}
