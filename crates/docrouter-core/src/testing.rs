//! In-memory [`IFileSystem`] used by the use case tests.
//!
//! Entries are kept in insertion order so listings behave like an
//! unsorted platform listing that the test controls.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::filesystem::{DirEntryInfo, EntryKind, IFileSystem};

#[derive(Debug, Default)]
struct State {
    entries: Vec<(PathBuf, EntryKind)>,
    failing_listings: Vec<PathBuf>,
    move_error: Option<io::ErrorKind>,
    moves: Vec<(PathBuf, PathBuf)>,
}

#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory and any missing ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        let mut state = self.state.lock().unwrap();
        let mut ancestors: Vec<&Path> = path.ancestors().collect();
        ancestors.reverse();
        for dir in ancestors {
            if dir.as_os_str().is_empty() {
                continue;
            }
            if !state.entries.iter().any(|(p, _)| p == dir) {
                state.entries.push((dir.to_path_buf(), EntryKind::Directory));
            }
        }
        self
    }

    /// Adds a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.state
            .lock()
            .unwrap()
            .entries
            .push((path.to_path_buf(), EntryKind::File));
        self
    }

    /// Makes `list_dir(path)` fail.
    pub fn fail_listing(&self, path: impl AsRef<Path>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .failing_listings
            .push(path.as_ref().to_path_buf());
        self
    }

    /// Makes every subsequent move fail with `kind`.
    pub fn fail_moves_with(&self, kind: io::ErrorKind) -> &Self {
        self.state.lock().unwrap().move_error = Some(kind);
        self
    }

    /// Removes an entry, simulating a file deleted behind our back.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.state.lock().unwrap().entries.retain(|(p, _)| p != path);
    }

    pub fn is_file(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.state
            .lock()
            .unwrap()
            .entries
            .iter()
            .any(|(p, k)| p == path && *k == EntryKind::File)
    }

    pub fn moves(&self) -> Vec<(PathBuf, PathBuf)> {
        self.state.lock().unwrap().moves.clone()
    }
}

impl IFileSystem for MemoryFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.state
            .lock()
            .unwrap()
            .entries
            .iter()
            .any(|(p, k)| p == path && *k == EntryKind::Directory)
    }

    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<DirEntryInfo>> {
        let state = self.state.lock().unwrap();
        if state.failing_listings.iter().any(|p| p == path) {
            anyhow::bail!("simulated listing failure for {}", path.display());
        }
        if !state
            .entries
            .iter()
            .any(|(p, k)| p == path && *k == EntryKind::Directory)
        {
            anyhow::bail!("not a directory: {}", path.display());
        }
        Ok(state
            .entries
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, k)| {
                let name = p
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                DirEntryInfo::new(name, p.clone(), *k)
            })
            .collect())
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(kind) = state.move_error {
            return Err(io::Error::new(kind, "simulated move failure"));
        }
        let idx = state
            .entries
            .iter()
            .position(|(p, k)| p == from && *k == EntryKind::File)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "source not found"))?;
        let parent_exists = to.parent().map_or(false, |parent| {
            state
                .entries
                .iter()
                .any(|(p, k)| p == parent && *k == EntryKind::Directory)
        });
        if !parent_exists {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "destination folder not found",
            ));
        }
        state.entries[idx].0 = to.to_path_buf();
        state.moves.push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }
}
