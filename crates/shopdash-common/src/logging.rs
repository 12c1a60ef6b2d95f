//! Structured logging infrastructure for shopdash

use crate::{Result, ShopDashError};
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "shopdash_data=trace")
    pub level: String,
    /// Whether to emit JSON lines instead of human readable output
    pub json_format: bool,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: true,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

/// Keeps the background log writer alive.
///
/// Buffered file output is flushed when the guard is dropped, so hold it
/// until the process exits.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<LoggingGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let mut worker = None;
    let init = if let Some(file_path) = config.file_path.as_deref() {
        let (appender, guard) = file_writer(file_path);
        worker = Some(guard);
        if config.json_format {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_span_events(span_events)
                        .with_target(config.include_targets)
                        .with_writer(appender),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_span_events(span_events)
                        .with_target(config.include_targets)
                        .with_writer(appender),
                )
                .try_init()
        }
    } else if config.json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init()
    } else if config.pretty_format {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init()
    };

    init.map_err(|e| ShopDashError::config_with_source("Failed to initialise logging", e))?;
    Ok(LoggingGuard { _worker: worker })
}

fn file_writer(file_path: &str) -> (NonBlocking, WorkerGuard) {
    let path = Path::new(file_path);
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "shopdash.log".to_string());

    tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
}
