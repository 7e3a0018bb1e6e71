//! Tracing init for the `skein` binary: non-blocking file appender plus
//! [`crate::log_format::TextWithSpanIds`] so log lines carry `trace_id`/`span_id`.
//!
//! Level is controlled by `RUST_LOG` (falls back to `warn`). Log file location
//! is controlled by `SKEIN_LOG_DIR` (falls back to the current directory),
//! with file name `skein.log`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::log_format::TextWithSpanIds;

/// Initializes the global tracing subscriber. Safe to call once at process start;
/// the returned guard must be kept alive for the appender to flush on drop.
pub fn init() -> Result<tracing_appender::non_blocking::WorkerGuard, Box<dyn std::error::Error>> {
    let log_dir = std::env::var("SKEIN_LOG_DIR").unwrap_or_else(|_| ".".to_string());
    let file_appender = tracing_appender::rolling::never(log_dir, "skein.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(TextWithSpanIds::new())
        .with_writer(non_blocking)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
