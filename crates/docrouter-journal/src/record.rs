//! Log records and their text form
//!
//! One record becomes one line:
//!
//! ```text
//! 17/10/2026 08:30:12 - INFO - Company code extracted code=123
//! ```

use std::fmt;

use chrono::{DateTime, Local};
use tracing::Level;

/// Timestamp layout of a log line
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Severity as printed in the log
///
/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Maps a `tracing` level; `fatal` promotes errors to `Critical`.
    ///
    /// `TRACE` has no counterpart and is printed as `DEBUG`.
    pub fn from_level(level: Level, fatal: bool) -> Self {
        match level {
            Level::ERROR if fatal => Severity::Critical,
            Level::ERROR => Severity::Error,
            Level::WARN => Severity::Warning,
            Level::INFO => Severity::Info,
            _ => Severity::Debug,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One journal entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    pub message: String,
    /// Structured fields other than `message`, in emission order
    pub fields: Vec<(String, String)>,
}

impl LogRecord {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            severity,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Renders the record as a single log line, without a newline.
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "{} - {} - {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.severity,
            self.message
        );
        for (key, value) in &self.fields {
            line.push(' ');
            line.push_str(key);
            line.push('=');
            line.push_str(value);
        }
        // One event, one line
        if line.contains('\n') {
            line = line.replace("\r\n", " ").replace('\n', " ");
        }
        line
    }
}
