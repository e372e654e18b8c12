//! Client folder lookup
//!
//! Searches `<drive>/<shared root>/<container>/<client>` across the
//! configured drives for a client folder whose name carries the code.
//!
//! The first match wins. Drives are scanned in configuration order;
//! containers and client folders in platform listing order, which is not
//! guaranteed to be stable across runs. When several folders carry the
//! same code, which one is picked can therefore change between runs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::{client_folder_matches, ClientCode};
use crate::ports::IFileSystem;

/// Use case for finding the folder of a client by code
pub struct LocateClientUseCase {
    filesystem: Arc<dyn IFileSystem>,
}

impl LocateClientUseCase {
    pub fn new(filesystem: Arc<dyn IFileSystem>) -> Self {
        Self { filesystem }
    }

    /// Finds the client folder for `code`.
    ///
    /// Missing drives are skipped silently; a drive without the shared root
    /// is skipped with a warning. A container that cannot be listed is
    /// skipped with a warning. Entries that are not directories are ignored
    /// at both levels.
    pub fn locate(
        &self,
        code: &ClientCode,
        drive_roots: &[PathBuf],
        shared_root: &str,
    ) -> Option<PathBuf> {
        info!(code = %code, "Looking for client folder");

        let found = drive_roots
            .iter()
            .find_map(|drive| self.search_drive(code, drive, shared_root));

        match &found {
            Some(path) => info!(path = %path.display(), "Client folder found"),
            None => error!(code = %code, "Could not find a client folder on any drive"),
        }
        found
    }

    fn search_drive(&self, code: &ClientCode, drive: &Path, shared_root: &str) -> Option<PathBuf> {
        if !self.filesystem.is_dir(drive) {
            debug!(drive = %drive.display(), "Drive not available");
            return None;
        }

        let base = drive.join(shared_root);
        if !self.filesystem.is_dir(&base) {
            warn!(path = %base.display(), "Shared folder not found on drive");
            return None;
        }

        info!(path = %base.display(), "Searching shared folder");
        let containers = match self.filesystem.list_dir(&base) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %base.display(), error = %format!("{e:#}"), "Cannot list shared folder");
                return None;
            }
        };

        containers
            .iter()
            .filter(|entry| entry.is_dir())
            .find_map(|container| self.search_container(code, &container.path))
    }

    fn search_container(&self, code: &ClientCode, container: &Path) -> Option<PathBuf> {
        let clients = match self.filesystem.list_dir(container) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %container.display(), error = %format!("{e:#}"), "Cannot list container folder");
                return None;
            }
        };

        clients
            .into_iter()
            .filter(|entry| entry.is_dir())
            .find(|entry| client_folder_matches(&entry.name, code))
            .map(|entry| entry.path)
    }
}
