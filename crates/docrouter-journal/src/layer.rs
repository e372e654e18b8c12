//! `tracing_subscriber` layer feeding the journal
//!
//! Each event is flattened into a [`LogRecord`] on the emitting thread and
//! sent to the dispatcher. Sending never blocks.

use std::fmt;
use std::sync::mpsc::Sender;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::dispatcher::Message;
use crate::record::{LogRecord, Severity};

/// Field marking an error event as fatal
pub const FATAL_FIELD: &str = "fatal";

/// Layer converting `tracing` events into [`LogRecord`]s
#[derive(Debug, Clone)]
pub struct JournalLayer {
    tx: Sender<Message>,
}

impl JournalLayer {
    pub fn new(tx: Sender<Message>) -> Self {
        Self { tx }
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: Option<String>,
    fatal: bool,
    fields: Vec<(String, String)>,
}

impl RecordVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == FATAL_FIELD {
            self.fatal = value;
        } else {
            self.push(field, value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

impl<S> Layer<S> for JournalLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let record = LogRecord {
            timestamp: chrono::Local::now(),
            severity: Severity::from_level(*event.metadata().level(), visitor.fatal),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        };
        // Nothing sensible to do when the journal itself is gone
        let _ = self.tx.send(Message::Record(record));
    }
}
