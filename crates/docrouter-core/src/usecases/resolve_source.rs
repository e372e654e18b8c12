//! Source root resolution
//!
//! Picks the first reachable source root from the configured candidates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::ports::IFileSystem;

/// Use case for choosing the active source root of a run
pub struct ResolveSourceUseCase {
    filesystem: Arc<dyn IFileSystem>,
}

impl ResolveSourceUseCase {
    pub fn new(filesystem: Arc<dyn IFileSystem>) -> Self {
        Self { filesystem }
    }

    /// Returns the first candidate that is an accessible directory.
    ///
    /// `None` means no candidate is reachable; the caller aborts the run.
    pub fn resolve(&self, candidates: &[PathBuf]) -> Option<PathBuf> {
        info!("Looking for an active source path...");
        candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|candidate| self.probe(candidate))
            .map(Path::to_path_buf)
    }

    fn probe(&self, candidate: &Path) -> bool {
        info!(path = %candidate.display(), "Trying source path");
        let reachable = self.filesystem.is_dir(candidate);
        if reachable {
            info!(path = %candidate.display(), "Using source path");
        }
        reachable
    }
}
