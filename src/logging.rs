use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, registry::LookupSpan, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::constants::LOG_FILE_PREFIX;

/// `RUST_LOG` when set, otherwise the configured default directive
fn build_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Human-readable output on stderr; stdout is reserved for command output
fn console_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer().with_writer(std::io::stderr)
}

/// Console logging on stderr plus a daily-rolling JSON file.
///
/// The returned guard flushes the file writer when dropped; hold it for the
/// lifetime of the program.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    if let Err(e) = fs::create_dir_all(&config.dir) {
        tracing_subscriber::registry()
            .with(build_filter(&config.default_directive))
            .with(console_layer())
            .init();
        tracing::warn!("File logging disabled, cannot create {:?}: {}", config.dir, e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&config.dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().json().with_writer(writer);

    tracing_subscriber::registry()
        .with(build_filter(&config.default_directive))
        .with(file_layer)
        .with(console_layer())
        .init();

    Some(guard)
}
