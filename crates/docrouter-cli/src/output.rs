//! Terminal output for the CLI
//!
//! Every command prints through a [`Console`], which decides the rendering
//! (plain lines or JSON objects), the stream, and whether `--quiet` hides
//! the line. Diagnostics go to stderr, results to stdout.

use serde_json::json;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Notice {
    Success,
    Error,
    Warning,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Printer shared by the command handlers
#[derive(Debug, Clone, Copy)]
pub struct Console {
    format: OutputFormat,
    quiet: bool,
}

impl Console {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn success(&self, message: &str) {
        self.emit(Notice::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Notice::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(Notice::Warning, message);
    }

    /// Supporting detail; hidden with `--quiet` and in JSON mode.
    pub fn info(&self, message: &str) {
        self.emit(Notice::Detail, message);
    }

    /// Prints `value` as the command's JSON document. No-op for human output.
    pub fn print_json(&self, value: &serde_json::Value) {
        if self.format == OutputFormat::Json {
            match serde_json::to_string_pretty(value) {
                Ok(text) => println!("{text}"),
                Err(_) => println!("{value}"),
            }
        }
    }

    fn emit(&self, notice: Notice, message: &str) {
        match self.render(notice, message) {
            Some((Stream::Stdout, line)) => println!("{line}"),
            Some((Stream::Stderr, line)) => eprintln!("{line}"),
            None => {}
        }
    }

    fn render(&self, notice: Notice, message: &str) -> Option<(Stream, String)> {
        match (self.format, notice) {
            (OutputFormat::Human, Notice::Success) => {
                Some((Stream::Stdout, format!("\u{2713} {message}")))
            }
            (OutputFormat::Human, Notice::Error) => {
                Some((Stream::Stderr, format!("\u{2717} Error: {message}")))
            }
            (OutputFormat::Human, Notice::Warning) => {
                Some((Stream::Stderr, format!("\u{26a0} Warning: {message}")))
            }
            (OutputFormat::Human, Notice::Detail) if self.quiet => None,
            (OutputFormat::Human, Notice::Detail) => Some((Stream::Stdout, format!("  {message}"))),
            (OutputFormat::Json, Notice::Success) => Some((
                Stream::Stdout,
                json!({"success": true, "message": message}).to_string(),
            )),
            (OutputFormat::Json, Notice::Error) => Some((
                Stream::Stderr,
                json!({"success": false, "error": message}).to_string(),
            )),
            (OutputFormat::Json, Notice::Warning) => Some((
                Stream::Stderr,
                json!({"level": "warning", "message": message}).to_string(),
            )),
            (OutputFormat::Json, Notice::Detail) => None,
        }
    }
}
