//! Per-stage outcomes and run summaries
//!
//! Every pipeline stage reports an explicit result instead of failing
//! through an error path. The orchestrator inspects these values to decide
//! between "continue with the next stage" and "skip to the next file".

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use super::newtypes::{ClientCode, DepartmentName, RunId};

// ============================================================================
// SourceFile
// ============================================================================

/// A document discovered in a department folder of the source root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Full path at discovery time
    pub path: PathBuf,
    /// File name as text, lossily decoded; used for code extraction and logs
    pub file_name: String,
    /// Department folder the file was found in
    pub department: DepartmentName,
    /// File name exactly as the filesystem reported it
    #[serde(skip)]
    original_name: OsString,
}

impl SourceFile {
    /// The original name is taken from the last component of `path`, or
    /// from `file_name` when the path has none.
    pub fn new(path: PathBuf, file_name: impl Into<String>, department: DepartmentName) -> Self {
        let file_name = file_name.into();
        let original_name = path
            .file_name()
            .map_or_else(|| OsString::from(&file_name), OsStr::to_os_string);
        Self {
            path,
            file_name,
            department,
            original_name,
        }
    }

    /// Name the file keeps at its destination
    pub fn original_name(&self) -> &OsStr {
        &self.original_name
    }
}

// ============================================================================
// Error taxonomy
// ============================================================================

/// Broad category of a failure, used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Department absent from the destination mapping
    Configuration,
    /// Source root, department folder, or client folder not found
    Discovery,
    /// File name yields no numeric code
    Validation,
    /// Resolved destination folder does not exist
    DestinationState,
    /// The move itself failed
    Move,
    /// Anything escaping the sweep
    Fatal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Discovery => "discovery",
            ErrorCategory::Validation => "validation",
            ErrorCategory::DestinationState => "destination_state",
            ErrorCategory::Move => "move",
            ErrorCategory::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Move stage
// ============================================================================

/// Result of the File Mover stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// File now lives at `destination`
    Moved { destination: PathBuf },
    /// Dry run: every check passed, nothing was touched
    WouldMove { destination: PathBuf },
    /// The resolved destination folder does not exist
    DestinationMissing { folder: PathBuf },
    /// Permission denied or the file is locked by another process
    PermissionDenied { detail: String },
    /// Source disappeared between discovery and the move
    SourceVanished,
    /// Any other failure, with the full error chain
    UnexpectedFailure { detail: String },
}

impl MoveOutcome {
    /// Converts the mover result into the final disposition of the file.
    pub fn into_disposition(self) -> Disposition {
        let reason = match self {
            MoveOutcome::Moved { destination } => return Disposition::Moved { destination },
            MoveOutcome::WouldMove { destination } => {
                return Disposition::WouldMove { destination }
            }
            MoveOutcome::DestinationMissing { folder } => SkipReason::DestinationMissing { folder },
            MoveOutcome::PermissionDenied { detail } => SkipReason::PermissionDenied { detail },
            MoveOutcome::SourceVanished => SkipReason::SourceVanished,
            MoveOutcome::UnexpectedFailure { detail } => SkipReason::MoveFailed { detail },
        };
        Disposition::Skipped { reason }
    }
}

// ============================================================================
// SkipReason
// ============================================================================

/// Why a file was left in place
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("no numeric client code in file name")]
    InvalidCode,

    #[error("client folder for code {code} not found on any drive")]
    ClientNotFound { code: ClientCode },

    #[error("department {department} has no destination mapping")]
    Unmapped { department: DepartmentName },

    #[error("destination folder {} does not exist", folder.display())]
    DestinationMissing { folder: PathBuf },

    #[error("permission denied: {detail}")]
    PermissionDenied { detail: String },

    #[error("source file vanished before it could be moved")]
    SourceVanished,

    #[error("unexpected move failure: {detail}")]
    MoveFailed { detail: String },
}

impl SkipReason {
    /// Taxonomy bucket for reporting
    pub fn category(&self) -> ErrorCategory {
        match self {
            SkipReason::InvalidCode => ErrorCategory::Validation,
            SkipReason::ClientNotFound { .. } => ErrorCategory::Discovery,
            SkipReason::Unmapped { .. } => ErrorCategory::Configuration,
            SkipReason::DestinationMissing { .. } => ErrorCategory::DestinationState,
            SkipReason::PermissionDenied { .. }
            | SkipReason::SourceVanished
            | SkipReason::MoveFailed { .. } => ErrorCategory::Move,
        }
    }

    /// True if the file reached the mover stage before being skipped
    pub fn reached_mover(&self) -> bool {
        matches!(self.category(), ErrorCategory::DestinationState | ErrorCategory::Move)
    }
}

// ============================================================================
// FileOutcome
// ============================================================================

/// Final disposition of a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Disposition {
    Moved { destination: PathBuf },
    WouldMove { destination: PathBuf },
    Skipped { reason: SkipReason },
}

/// What happened to one discovered file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub file: SourceFile,
    /// Code extracted from the name, if any
    pub code: Option<ClientCode>,
    /// Client folder located for the code, if any
    pub client_folder: Option<PathBuf>,
    pub disposition: Disposition,
}

impl FileOutcome {
    /// True if the mover stage was attempted for this file
    pub fn reached_mover(&self) -> bool {
        match &self.disposition {
            Disposition::Moved { .. } | Disposition::WouldMove { .. } => true,
            Disposition::Skipped { reason } => reason.reached_mover(),
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self.disposition, Disposition::Moved { .. })
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.disposition {
            Disposition::Skipped { reason } => Some(reason),
            _ => None,
        }
    }
}

// ============================================================================
// RunResult
// ============================================================================

/// Terminal state of one orchestration pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunStatus {
    /// No configured source root was reachable; nothing was touched
    Aborted,
    /// Every department was swept
    Completed,
    /// An error escaped the sweep and ended it early
    Failed { error: String },
}

/// Summary of one orchestration pass
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub run_id: RunId,
    /// Source root used for the run, `None` when aborted
    pub source_root: Option<PathBuf>,
    pub status: RunStatus,
    /// Files for which the mover stage was reached, moved or not
    pub files_processed: u32,
    /// Files discovered in department folders
    pub files_discovered: u32,
    pub outcomes: Vec<FileOutcome>,
    pub dry_run: bool,
    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

impl RunResult {
    /// Status line shown to the operator at the end of a run
    pub fn message(&self) -> String {
        match &self.status {
            RunStatus::Aborted => "Error: source path not found.".to_string(),
            RunStatus::Failed { .. } => "Fatal error! Check the log.".to_string(),
            RunStatus::Completed if self.files_processed == 0 => {
                "Completed. No new files found.".to_string()
            }
            RunStatus::Completed => format!(
                "Process completed. {} file(s) checked.",
                self.files_processed
            ),
        }
    }

    /// Number of files actually moved
    pub fn files_moved(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_moved()).count()
    }

    /// Number of files left in place
    pub fn files_skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.skip_reason().is_some())
            .count()
    }
}
