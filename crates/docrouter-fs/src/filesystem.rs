//! Local filesystem adapter (secondary/driven adapter)
//!
//! Implements [`IFileSystem`] with blocking `std::fs` calls. The sweep runs
//! on a dedicated worker thread, so nothing here is async.
//!
//! ## Design Decisions
//!
//! - **Moves**: `rename` first. When source and destination sit on different
//!   volumes the rename fails with a cross-device error and the file is
//!   copied then removed instead.
//! - **Listings**: entries are reported in platform order. Symlinks are
//!   followed so a link to a folder counts as a folder.
//! - **No directory creation**: a missing destination parent is an error.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use docrouter_core::ports::{DirEntryInfo, EntryKind, IFileSystem};
use tracing::{debug, instrument, warn};

/// `EXDEV` on Linux and macOS
#[cfg(unix)]
const CROSS_DEVICE: i32 = 18;

/// `ERROR_NOT_SAME_DEVICE`
#[cfg(windows)]
const CROSS_DEVICE: i32 = 17;

#[cfg(not(any(unix, windows)))]
const CROSS_DEVICE: i32 = -1;

/// Adapter that bridges the [`IFileSystem`] port to the real filesystem.
///
/// Zero-sized: every operation takes its context from the path arguments.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystemAdapter;

impl LocalFileSystemAdapter {
    /// Create a new `LocalFileSystemAdapter`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn entry_kind(path: &Path, entry: &fs::DirEntry) -> EntryKind {
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot read entry type");
                return EntryKind::Other;
            }
        };

        if file_type.is_symlink() {
            // Resolve the link target; dangling links are neither kind
            return match fs::metadata(path) {
                Ok(meta) if meta.is_dir() => EntryKind::Directory,
                Ok(meta) if meta.is_file() => EntryKind::File,
                _ => EntryKind::Other,
            };
        }

        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    /// Copies `from` to `to` and removes `from`.
    ///
    /// A copy that fails partway is deleted when `to` did not exist before.
    /// If the source cannot be removed the copy is deleted again so the file
    /// never ends up in both places.
    fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
        Self::transfer(from, to, |from, to| fs::copy(from, to))
    }

    fn transfer<C>(from: &Path, to: &Path, copy: C) -> io::Result<()>
    where
        C: FnOnce(&Path, &Path) -> io::Result<u64>,
    {
        let existed = to.exists();
        if let Err(e) = copy(from, to) {
            if !existed {
                Self::discard(to, "could not remove partial copy");
            }
            return Err(e);
        }
        if let Err(e) = fs::remove_file(from) {
            Self::discard(to, "could not remove copy after failed source removal");
            return Err(e);
        }
        Ok(())
    }

    fn discard(path: &Path, message: &str) {
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "removed leftover copy"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "{message}"),
        }
    }
}

fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(CROSS_DEVICE)
}

impl IFileSystem for LocalFileSystemAdapter {
    fn is_dir(&self, path: &Path) -> bool {
        fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<DirEntryInfo>> {
        let reader = fs::read_dir(path)
            .with_context(|| format!("Failed to read directory {}", path.display()))?;

        let mut entries = Vec::new();
        for entry in reader {
            let entry =
                entry.with_context(|| format!("Failed to read entry in {}", path.display()))?;
            let entry_path = entry.path();
            let kind = Self::entry_kind(&entry_path, &entry);
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push(DirEntryInfo::new(name, entry_path, kind));
        }

        debug!(count = entries.len(), "directory listed");
        Ok(entries)
    }

    #[instrument(skip(self), fields(from = %from.display(), to = %to.display()))]
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        match fs::rename(from, to) {
            Ok(()) => {
                debug!("renamed in place");
                Ok(())
            }
            Err(e) if is_cross_device(&e) => {
                debug!("different volume, falling back to copy and remove");
                Self::copy_then_remove(from, to)
            }
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Unit tests
// ============================================================================

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_is_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"x").unwrap();
        let adapter = LocalFileSystemAdapter::new();

        assert!(adapter.is_dir(dir.path()));
        assert!(!adapter.is_dir(&file));
        assert!(!adapter.is_dir(&dir.path().join("missing")));
    }

    #[test]
    fn test_list_dir_reports_kinds() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("123-a.pdf"), b"x").unwrap();
        fs::create_dir(dir.path().join("Acme - 123")).unwrap();
        let adapter = LocalFileSystemAdapter::new();

        let mut entries = adapter.list_dir(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "123-a.pdf");
        assert!(entries[0].is_file());
        assert_eq!(entries[1].name, "Acme - 123");
        assert!(entries[1].is_dir());
        assert_eq!(entries[1].path, dir.path().join("Acme - 123"));
    }

    #[test]
    fn test_list_dir_does_not_recurse() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/deep.txt"), b"x").unwrap();
        let adapter = LocalFileSystemAdapter::new();

        let entries = adapter.list_dir(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a");
    }

    #[test]
    fn test_list_missing_dir_fails_with_context() {
        let dir = TempDir::new().unwrap();
        let adapter = LocalFileSystemAdapter::new();

        let err = adapter.list_dir(&dir.path().join("nope")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_followed() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();
        let adapter = LocalFileSystemAdapter::new();

        let entries = adapter.list_dir(dir.path()).unwrap();
        let kind_of = |name: &str| entries.iter().find(|e| e.name == name).unwrap().kind;
        assert_eq!(kind_of("link"), EntryKind::Directory);
        assert_eq!(kind_of("dangling"), EntryKind::Other);
    }

    #[test]
    fn test_move_file_same_volume() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("123-a.pdf");
        let target_dir = dir.path().join("dest");
        fs::write(&from, b"content").unwrap();
        fs::create_dir(&target_dir).unwrap();
        let adapter = LocalFileSystemAdapter::new();

        adapter.move_file(&from, &target_dir.join("123-a.pdf")).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read(target_dir.join("123-a.pdf")).unwrap(), b"content");
    }

    #[test]
    fn test_move_file_never_creates_parent() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("123-a.pdf");
        fs::write(&from, b"content").unwrap();
        let adapter = LocalFileSystemAdapter::new();

        let err = adapter
            .move_file(&from, &dir.path().join("missing/123-a.pdf"))
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(from.exists());
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_move_missing_source_is_not_found() {
        let dir = TempDir::new().unwrap();
        let adapter = LocalFileSystemAdapter::new();

        let err = adapter
            .move_file(&dir.path().join("gone.pdf"), &dir.path().join("x.pdf"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_copy_then_remove_moves_content() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.pdf");
        let to = dir.path().join("b.pdf");
        fs::write(&from, b"content").unwrap();

        LocalFileSystemAdapter::copy_then_remove(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"content");
    }

    #[test]
    fn test_failed_copy_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.pdf");
        let to = dir.path().join("b.pdf");
        fs::write(&from, b"content").unwrap();

        let err = LocalFileSystemAdapter::transfer(&from, &to, |_, to| {
            fs::write(to, b"cont")?;
            Err(io::Error::new(io::ErrorKind::Other, "no space left"))
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "no space left");
        assert!(!to.exists());
        assert_eq!(fs::read(&from).unwrap(), b"content");
    }

    #[test]
    fn test_failed_copy_keeps_existing_target() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("gone.pdf");
        let to = dir.path().join("b.pdf");
        fs::write(&to, b"earlier").unwrap();

        LocalFileSystemAdapter::copy_then_remove(&from, &to).unwrap_err();

        assert_eq!(fs::read(&to).unwrap(), b"earlier");
    }

    #[test]
    fn test_cross_device_detection() {
        assert!(is_cross_device(&io::Error::from_raw_os_error(CROSS_DEVICE)));
        assert!(!is_cross_device(&io::Error::from(io::ErrorKind::NotFound)));
    }
}
