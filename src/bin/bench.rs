use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pubsub_latency::{
    publisher, render, telemetry, Config, LatencyHarness, LatencyLog, TracingLog,
};
use tracing::Instrument;

/// Runs one priming publish plus `count` timed publishes and prints the
/// latency series. Transport settings come from the same environment as the
/// server.
#[derive(Parser, Debug)]
#[command(name = "bench")]
struct Args {
    /// Number of timed publishes (defaults to the variant's default count)
    #[arg(long, short = 'n', env = "COUNT")]
    count: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env().context("invalid env")?;
    telemetry::init(config.log_format()?);

    let count = args.count.unwrap_or_else(|| config.default_count());
    let publisher = publisher::connect(&config).await?;
    let log: Arc<dyn LatencyLog> = Arc::new(TracingLog::new(config.log_name()));
    let harness =
        LatencyHarness::new(publisher, log.clone()).with_timeout(config.publish_timeout());

    let span = tracing::info_span!("publish_run", variant = %config.variant(), count);
    let series = harness
        .run(count)
        .instrument(span)
        .await
        .context("publish run failed")?;

    let line = render(&series);
    log.log_text(&line);
    println!("{line}");
    Ok(())
}
