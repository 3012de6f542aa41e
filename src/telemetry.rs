use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` filter. Later calls are no-ops.
pub fn init(format: LogFormat) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let installed = match format {
            LogFormat::Text => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        if let Err(e) = installed {
            eprintln!("tracing subscriber not installed: {e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init(LogFormat::Text);
        init(LogFormat::Json);
        tracing::info!("still logging");
    }
}
