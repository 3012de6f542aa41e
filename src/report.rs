use crate::harness::LatencySeries;

/// Sink for latency log lines. One call writes one line.
pub trait LatencyLog: Send + Sync {
    fn log_text(&self, line: &str);
}

/// Writes latency lines as `tracing` events under the `latency` target.
#[derive(Debug, Clone)]
pub struct TracingLog {
    log_name: String,
}

impl TracingLog {
    pub fn new(log_name: impl Into<String>) -> Self {
        Self {
            log_name: log_name.into(),
        }
    }

    pub fn log_name(&self) -> &str {
        &self.log_name
    }
}

impl LatencyLog for TracingLog {
    fn log_text(&self, line: &str) {
        tracing::info!(target: "latency", log_name = %self.log_name, "{line}");
    }
}

/// Renders a series as comma-joined whole milliseconds, in issue order.
pub fn render(series: &LatencySeries) -> String {
    series
        .iter()
        .map(|sample| sample.millis().to_string())
        .collect::<Vec<_>>()
        .join(",")
}
