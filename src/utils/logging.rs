use std::{path::Path, sync::LazyLock};

use anyhow::{anyhow, Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::{
    fmt::{format::FmtSpan, writer::MakeWriterExt},
    EnvFilter,
};

/// Prefix of the log files written by the cli.
pub const CLI_PREFIX: &str = "cli";

const MAX_LOG_FILES: usize = 5;

/// Only events of this crate are let through, http internals stay quiet.
fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "{}={level}",
        env!("CARGO_PKG_NAME").replace('-', "_")
    ))
}

/// Logs into daily rotated files under `<application dir>/logs` and, when `show_std` is set, into
/// stderr. Without an explicit level `RUST_LOG` decides, falling back to info.
pub fn enable_logging(
    prefix: &str,
    application_dir: &Path,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> Result<()> {
    let logs_dir = application_dir.join("logs");
    let files = Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(prefix)
        .build(&logs_dir)
        .with_context(|| format!("Failed to open log files in {logs_dir:?}"))?;

    let stderr = std::io::stderr.with_filter(move |_| show_std);

    let level = match log_level {
        Some(level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| LevelFilter::INFO.to_string()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(crate_filter(&level))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stderr.and(files))
        .pretty()
        .try_init()
        .map_err(|e| anyhow!("Failed to set up logging: {e}"))
}

/// Dereference at the start of a test to see its events in the test output.
pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    // Ignored when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(crate_filter("trace"))
        .with_test_writer()
        .compact()
        .try_init();
});
