#![deny(missing_docs)]
//! Shared logging utilities for the recipebox workspace.
//!
//! This crate provides the `rb_*` logging macros used across the codebase,
//! the logger setup for the terminal binary and a minimal test initializer
//! for the global logger.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::SetLoggerError;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use thiserror::Error;

#[doc(hidden)]
pub use log as __log;
pub use log::LevelFilter;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! rb_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! rb_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! rb_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! rb_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! rb_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to a log file only.
    #[default]
    File,
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

/// Why the global logger could not be installed.
#[derive(Debug, Error)]
pub enum LogInitError {
    /// The log file could not be created.
    #[error("could not create log file {path:?}: {source}")]
    File {
        /// Requested log file.
        path: PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },
    /// Another logger was installed first.
    #[error(transparent)]
    AlreadySet(#[from] SetLoggerError),
}

/// Installs the global logger for the terminal binary.
///
/// Terminal output goes to stderr so it does not interleave with the
/// rendered screen on stdout. The log file is truncated.
pub fn initialize(
    destination: LogDestination,
    level: LevelFilter,
    log_path: &Path,
) -> Result<(), LogInitError> {
    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::with_capacity(2);
    if destination.to_file() {
        let file = File::create(log_path).map_err(|source| LogInitError::File {
            path: log_path.to_path_buf(),
            source,
        })?;
        loggers.push(WriteLogger::new(level, config.clone(), file));
    }
    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

/// Default log file location: `./recipebox.log`.
pub fn default_log_path() -> PathBuf {
    PathBuf::from("./recipebox.log")
}

/// RFC 3339 timestamps; only records from the workspace crates, so HTTP
/// stack chatter stays out of the log.
fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str("recipebox")
        .build()
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        build_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_select_outputs() {
        assert!(LogDestination::File.to_file());
        assert!(!LogDestination::File.to_terminal());
        assert!(LogDestination::Terminal.to_terminal());
        assert!(LogDestination::Both.to_file() && LogDestination::Both.to_terminal());
    }

    #[test]
    fn unwritable_log_file_is_reported_before_installing() {
        let path = Path::new("./no-such-dir/recipebox.log");
        match initialize(LogDestination::Both, LevelFilter::Info, path) {
            Err(LogInitError::File { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected file error, got {other:?}"),
        }
    }
}
