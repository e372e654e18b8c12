//! Journal sinks
//!
//! A sink receives every record in order. The dispatcher owns the sinks, so
//! they need no internal locking.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::record::{LogRecord, Severity};
use crate::JournalError;

/// Date layout used in log file names
pub const FILE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Destination for journal records
pub trait LogSink: Send {
    /// Writes one record
    fn write(&mut self, record: &LogRecord) -> io::Result<()>;

    /// Pushes buffered output to its destination
    fn flush(&mut self) -> io::Result<()>;
}

/// Appends records to `<directory>/<prefix>_DD-MM-YYYY.txt`
///
/// The file is chosen from each record's local date, so a run crossing
/// midnight continues in the next day's file.
#[derive(Debug)]
pub struct DatedFileSink {
    directory: PathBuf,
    prefix: String,
    current: Option<(NaiveDate, File)>,
}

impl DatedFileSink {
    /// Creates the directory if needed and opens today's file.
    pub fn open(directory: &Path, prefix: &str) -> Result<Self, JournalError> {
        fs::create_dir_all(directory).map_err(|source| JournalError::CreateDirectory {
            path: directory.to_path_buf(),
            source,
        })?;

        let mut sink = Self {
            directory: directory.to_path_buf(),
            prefix: prefix.to_string(),
            current: None,
        };
        let today = chrono::Local::now().date_naive();
        let path = sink.path_for(today);
        let file = Self::append(&path).map_err(|source| JournalError::OpenFile { path, source })?;
        sink.current = Some((today, file));
        Ok(sink)
    }

    /// Path of the log file for `date`
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.directory
            .join(format!("{}_{}.txt", self.prefix, date.format(FILE_DATE_FORMAT)))
    }

    fn append(path: &Path) -> io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }

    fn file_for(&mut self, date: NaiveDate) -> io::Result<&mut File> {
        let stale = !matches!(&self.current, Some((d, _)) if *d == date);
        if stale {
            if let Some((_, mut old)) = self.current.take() {
                old.flush()?;
            }
            fs::create_dir_all(&self.directory)?;
            let file = Self::append(&self.path_for(date))?;
            self.current = Some((date, file));
        }
        match &mut self.current {
            Some((_, file)) => Ok(file),
            None => Err(io::Error::new(io::ErrorKind::Other, "log file unavailable")),
        }
    }
}

impl LogSink for DatedFileSink {
    fn write(&mut self, record: &LogRecord) -> io::Result<()> {
        let file = self.file_for(record.timestamp.date_naive())?;
        writeln!(file, "{}", record.format_line())
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.current {
            Some((_, file)) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Mirrors records at or above a threshold to stderr
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    threshold: Severity,
}

impl ConsoleSink {
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }

    pub fn accepts(&self, record: &LogRecord) -> bool {
        record.severity >= self.threshold
    }
}

impl LogSink for ConsoleSink {
    fn write(&mut self, record: &LogRecord) -> io::Result<()> {
        if !self.accepts(record) {
            return Ok(());
        }
        writeln!(io::stderr().lock(), "{}", record.format_line())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
