//! Tracing setup for the `tally` binary.
//!
//! `tally` prints its reports as JSON on stdout, so nothing else may be
//! written there. Diagnostics go to two sinks instead:
//!
//! - a compact console stream on stderr, coloured only when stderr is a
//!   terminal so redirected runs stay plain text
//! - a JSON-lines file, `tally.log`, under the log directory (default
//!   `~/.tally/logs/`), rotated daily
//!
//! `-v` on the command line lowers the `tally` target to DEBUG, which
//! also tags console lines with file and line. `RUST_LOG` overrides both.
//!
//! ## Example
//!
//! ```no_run
//! use tally_core::logging;
//!
//! let _guard = logging::init_logging(None, false).expect("logging init");
//!
//! tracing::debug!(month = 2, year = 2025, "building daily rollups");
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{Result, TallyError};

/// Name of the rolling log file inside the log directory.
pub const LOG_FILE_NAME: &str = "tally.log";

/// Keeps the background log writer alive. Dropping it flushes `tally.log`,
/// so hold it until the report has been printed.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the stderr and file sinks for one `tally` run.
///
/// `log_dir` comes from `--log-dir`; without it the logs land in
/// `~/.tally/logs/`. The directory is created if missing.
pub fn init_logging(log_dir: Option<PathBuf>, verbose: bool) -> Result<LogGuard> {
    let log_dir = match log_dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };

    std::fs::create_dir_all(&log_dir).map_err(|e| TallyError::DirectoryCreation {
        path: log_dir.clone(),
        source: e,
    })?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_current_span(true);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::debug!(log_dir = %log_dir.display(), verbose, "logging initialized");

    Ok(LogGuard {
        _file_guard: Some(file_guard),
    })
}

/// Filter used when `RUST_LOG` is unset.
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "tally=debug" } else { "tally=info" }
}

/// Console-only logging for tests; safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// `~/.tally`, home of the default config file and log directory.
pub fn tally_home() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").ok_or(TallyError::HomeNotSet)?;
    Ok(PathBuf::from(home).join(".tally"))
}

/// `~/.tally/logs`
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(tally_home()?.join("logs"))
}
