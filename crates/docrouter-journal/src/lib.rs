//! DocRouter Journal - Log pipeline for routing runs
//!
//! Turns `tracing` events into [`LogRecord`]s and ships them over a channel
//! to a dispatcher thread, which writes every record to a dated log file
//! and mirrors it to stderr.
//!
//! ## Modules
//!
//! - [`record`] - The record type and its one-line text form
//! - [`layer`] - `tracing_subscriber` layer producing records
//! - [`sink`] - Dated file and console sinks
//! - [`dispatcher`] - Consumer thread and its shutdown guard

pub mod dispatcher;
pub mod layer;
pub mod record;
pub mod sink;

use std::path::PathBuf;
use std::sync::mpsc;

use docrouter_core::config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use dispatcher::{Dispatcher, JournalGuard, Message};
pub use layer::JournalLayer;
pub use record::{LogRecord, Severity};
pub use sink::{ConsoleSink, DatedFileSink, LogSink};

/// Errors that can occur while setting up the journal
#[derive(Debug, Error)]
pub enum JournalError {
    /// The log directory could not be created
    #[error("cannot create log directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log file could not be opened for appending
    #[error("cannot open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dispatcher thread could not be started
    #[error("cannot start journal dispatcher: {0}")]
    Spawn(#[source] std::io::Error),

    /// A global subscriber was already installed
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Runtime options that override the configured logging behaviour
#[derive(Debug, Clone, Copy, Default)]
pub struct JournalOptions {
    /// `-v` count: 1 raises the level to debug, 2 or more to trace
    pub verbosity: u8,
    /// Only warnings and worse reach the live display
    pub quiet: bool,
}

impl JournalOptions {
    /// Filter directive used when `RUST_LOG` is not set.
    pub fn level<'a>(&self, configured: &'a str) -> &'a str {
        match self.verbosity {
            0 => configured,
            1 => "debug",
            _ => "trace",
        }
    }

    fn console_threshold(&self) -> Severity {
        if self.quiet {
            Severity::Warning
        } else {
            Severity::Debug
        }
    }
}

/// Installs the journal as the global `tracing` subscriber.
///
/// The returned guard must be kept alive for the whole process; dropping
/// it flushes every pending record and stops the dispatcher.
///
/// # Errors
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init(
    config: &LoggingConfig,
    options: JournalOptions,
) -> Result<JournalGuard, JournalError> {
    let file = DatedFileSink::open(&config.directory, &config.file_prefix)?;
    let console = ConsoleSink::new(options.console_threshold());

    let (tx, rx) = mpsc::channel();
    let guard = Dispatcher::new(rx)
        .with_sink(Box::new(file))
        .with_sink(Box::new(console))
        .spawn(tx.clone())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.level(&config.level)));

    tracing_subscriber::registry()
        .with(JournalLayer::new(tx).with_filter(filter))
        .try_init()
        .map_err(|_| JournalError::AlreadyInitialized)?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_level() {
        let quiet = JournalOptions::default();
        assert_eq!(quiet.level("warn"), "warn");

        let debug = JournalOptions {
            verbosity: 1,
            quiet: false,
        };
        assert_eq!(debug.level("warn"), "debug");

        let trace = JournalOptions {
            verbosity: 3,
            quiet: false,
        };
        assert_eq!(trace.level("info"), "trace");
    }

    #[test]
    fn quiet_raises_console_threshold() {
        let options = JournalOptions {
            verbosity: 0,
            quiet: true,
        };
        assert_eq!(options.console_threshold(), Severity::Warning);
        assert_eq!(
            JournalOptions::default().console_threshold(),
            Severity::Debug
        );
    }

    #[test]
    fn open_failure_is_reported_with_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let config = LoggingConfig {
            level: "info".into(),
            directory: blocker.join("logs"),
            file_prefix: "automacao_log".into(),
        };
        let err = init(&config, JournalOptions::default()).unwrap_err();
        assert!(matches!(err, JournalError::CreateDirectory { .. }));
    }
}
