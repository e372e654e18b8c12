//! Filesystem port (driven/secondary port)
//!
//! This module defines the small slice of filesystem behaviour the router
//! needs: directory existence checks, non-recursive listings that tell
//! files and directories apart, and a move that may cross volumes.
//!
//! ## Design Notes
//!
//! - Calls are blocking. Callers run the whole sweep on a worker thread.
//! - `list_dir` uses `anyhow::Result` because listing errors are only logged.
//! - `move_file` returns `std::io::Result` so the mover can classify the
//!   failure by [`std::io::ErrorKind`].
//! - Listing order is whatever the platform returns. Nothing sorts it.

use std::path::{Path, PathBuf};

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks to nowhere, sockets, devices
    Other,
}

/// One entry of a non-recursive directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// Entry name (last path component), lossily decoded
    pub name: String,
    /// Full path of the entry
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntryInfo {
    pub fn new(name: impl Into<String>, path: PathBuf, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            path,
            kind,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Port trait for the filesystem operations the router performs
///
/// ## Implementation Notes
///
/// - `is_dir` must return false for missing or inaccessible paths rather
///   than failing.
/// - `list_dir` must not recurse and must report entries in the order the
///   platform yields them.
/// - `move_file` must never create missing parent directories of `to`.
pub trait IFileSystem: Send + Sync {
    /// Returns true if `path` exists, is accessible, and is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the immediate children of `path`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read
    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<DirEntryInfo>>;

    /// Moves the file at `from` to `to` (full target path, not a folder)
    ///
    /// # Errors
    /// Returns the underlying I/O error unchanged
    fn move_file(&self, from: &Path, to: &Path) -> std::io::Result<()>;
}
