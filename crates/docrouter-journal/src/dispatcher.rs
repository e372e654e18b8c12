//! Journal dispatcher
//!
//! A dedicated thread drains the record channel and hands every record to
//! each sink in order. Producers never wait on file or console I/O.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::record::LogRecord;
use crate::sink::LogSink;
use crate::JournalError;

/// Channel message between the layer and the dispatcher
#[derive(Debug)]
pub enum Message {
    Record(LogRecord),
    /// Flush the sinks and stop; records sent afterwards are dropped
    Shutdown,
}

/// Consumer side of the journal, before it is started
pub struct Dispatcher {
    rx: Receiver<Message>,
    sinks: Vec<Box<dyn LogSink>>,
}

impl Dispatcher {
    pub fn new(rx: Receiver<Message>) -> Self {
        Self {
            rx,
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Starts the dispatcher thread.
    ///
    /// `shutdown` must feed the same channel as the layer; the returned guard
    /// uses it to stop the thread.
    pub fn spawn(self, shutdown: Sender<Message>) -> Result<JournalGuard, JournalError> {
        let handle = thread::Builder::new()
            .name("docrouter-journal".into())
            .spawn(move || self.run())
            .map_err(JournalError::Spawn)?;

        Ok(JournalGuard {
            tx: shutdown,
            handle: Some(handle),
        })
    }

    fn run(mut self) {
        let mut reported = vec![false; self.sinks.len()];
        while let Ok(message) = self.rx.recv() {
            match message {
                Message::Record(record) => {
                    for (sink, reported) in self.sinks.iter_mut().zip(reported.iter_mut()) {
                        if let Err(e) = sink.write(&record) {
                            report_once(reported, &e);
                        }
                    }
                }
                Message::Shutdown => break,
            }
        }
        for sink in &mut self.sinks {
            let _ = sink.flush();
        }
    }
}

/// A broken sink is reported on stderr the first time it fails.
fn report_once(reported: &mut bool, err: &io::Error) {
    if !*reported {
        *reported = true;
        eprintln!("docrouter: journal sink failed: {err}");
    }
}

/// Keeps the dispatcher alive; dropping it drains pending records
#[derive(Debug)]
pub struct JournalGuard {
    tx: Sender<Message>,
    handle: Option<JoinHandle<()>>,
}

impl Drop for JournalGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(Message::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
