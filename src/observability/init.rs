//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "finassist-trace.log";

/// Initializes the tracing subscriber with a rotating JSON trace file.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters events based on the configured trace level
/// 2. Formats each event as one JSON object per line
/// 3. Writes to a rotating file with backups
///
/// # Trace Level Resolution
///
/// Level is determined by `config.trace_level` if set, and `"info"` otherwise.
/// An unparsable directive also falls back to `"info"`.
///
/// # File Location
///
/// Traces are written to `~/.local/share/zellij/finassist/finassist-trace.log`
/// (seen as `/host/...` from inside the sandbox).
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Returns silently if directory creation fails (observability is optional)
/// - Only the first call per thread of execution takes effect
///
/// # Example
///
/// ```rust
/// use finassist::observability::init_tracing;
/// use finassist::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_ansi(false)
        .with_writer(FileWriter::new(data_dir.join(TRACE_FILE_NAME)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
