use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Installs the process-wide subscriber. Call once, before anything logs.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(level))),
        )
        .init();

    tracing::info!(level = %level, "logger initialized");
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,hyper=info,h2=info",
    }
}
