//! Document move into an existing client destination
//!
//! The destination folder must already exist; it is never created. Move
//! failures are classified so the sweep can report them and continue.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{MoveOutcome, SourceFile};
use crate::ports::IFileSystem;

/// Windows `ERROR_SHARING_VIOLATION` and `ERROR_LOCK_VIOLATION`.
const WINDOWS_LOCK_ERRORS: [i32; 2] = [32, 33];

/// Maps an I/O error from a move to the matching outcome.
///
/// Permission errors and Windows sharing/lock violations become
/// `PermissionDenied`; a missing source becomes `SourceVanished`; anything
/// else is an `UnexpectedFailure` carrying the error text.
pub fn classify_move_error(err: &io::Error) -> MoveOutcome {
    let locked = cfg!(windows)
        && err
            .raw_os_error()
            .is_some_and(|code| WINDOWS_LOCK_ERRORS.contains(&code));

    match err.kind() {
        io::ErrorKind::PermissionDenied => MoveOutcome::PermissionDenied {
            detail: err.to_string(),
        },
        _ if locked => MoveOutcome::PermissionDenied {
            detail: err.to_string(),
        },
        io::ErrorKind::NotFound => MoveOutcome::SourceVanished,
        _ => MoveOutcome::UnexpectedFailure {
            detail: format!("{err} ({:?})", err.kind()),
        },
    }
}

/// Use case for moving one document into its client destination
pub struct MoveDocumentUseCase {
    filesystem: Arc<dyn IFileSystem>,
}

impl MoveDocumentUseCase {
    pub fn new(filesystem: Arc<dyn IFileSystem>) -> Self {
        Self { filesystem }
    }

    /// Moves `file` into `client_folder/relative_destination`.
    ///
    /// With `dry_run` every check runs but the file is left in place and
    /// `WouldMove` is returned instead of `Moved`.
    pub fn move_document(
        &self,
        file: &SourceFile,
        client_folder: &Path,
        relative_destination: &Path,
        dry_run: bool,
    ) -> MoveOutcome {
        let final_folder = client_folder.join(relative_destination);

        if !self.filesystem.is_dir(&final_folder) {
            error!(
                folder = %final_folder.display(),
                file = %file.file_name,
                "Destination folder does not exist; file will not be moved"
            );
            return MoveOutcome::DestinationMissing {
                folder: final_folder,
            };
        }

        let destination = final_folder.join(file.original_name());
        if dry_run {
            info!(
                file = %file.file_name,
                destination = %destination.display(),
                "Dry run: file would be moved"
            );
            return MoveOutcome::WouldMove { destination };
        }

        info!(file = %file.file_name, folder = %final_folder.display(), "Moving file");
        match self.filesystem.move_file(&file.path, &destination) {
            Ok(()) => {
                info!(destination = %destination.display(), "File moved");
                MoveOutcome::Moved { destination }
            }
            Err(e) => {
                let outcome = classify_move_error(&e);
                match &outcome {
                    MoveOutcome::PermissionDenied { .. } => error!(
                        file = %file.file_name,
                        error = %e,
                        "Permission denied moving file; it may be open or the destination is protected"
                    ),
                    MoveOutcome::SourceVanished => error!(
                        path = %file.path.display(),
                        "Source file was not found at move time"
                    ),
                    _ => error!(
                        file = %file.file_name,
                        error = ?e,
                        "Unexpected error moving file"
                    ),
                }
                outcome
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::DepartmentName;
    use crate::testing::MemoryFileSystem;

    fn source_file() -> SourceFile {
        SourceFile::new(
            PathBuf::from("/src/FOLHA/123-report.pdf"),
            "123-report.pdf",
            DepartmentName::new("FOLHA").unwrap(),
        )
    }

    fn setup() -> Arc<MemoryFileSystem> {
        let fs = MemoryFileSystem::new();
        fs.add_file("/src/FOLHA/123-report.pdf")
            .add_dir("/i/C/Acme - 123/OUT/FOLHA");
        Arc::new(fs)
    }

    #[test]
    fn moves_into_existing_destination() {
        let fs = setup();
        let use_case = MoveDocumentUseCase::new(fs.clone());

        let outcome = use_case.move_document(
            &source_file(),
            Path::new("/i/C/Acme - 123"),
            Path::new("OUT/FOLHA"),
            false,
        );

        let destination = PathBuf::from("/i/C/Acme - 123/OUT/FOLHA/123-report.pdf");
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                destination: destination.clone()
            }
        );
        assert!(fs.is_file(&destination));
        assert!(!fs.is_file("/src/FOLHA/123-report.pdf"));
    }

    #[test]
    fn missing_destination_is_not_created() {
        let fs = setup();
        let use_case = MoveDocumentUseCase::new(fs.clone());

        let outcome = use_case.move_document(
            &source_file(),
            Path::new("/i/C/Acme - 123"),
            Path::new("OUT/FISCAL"),
            false,
        );

        assert_eq!(
            outcome,
            MoveOutcome::DestinationMissing {
                folder: PathBuf::from("/i/C/Acme - 123/OUT/FISCAL")
            }
        );
        assert!(fs.is_file("/src/FOLHA/123-report.pdf"));
        assert!(!fs.is_dir(Path::new("/i/C/Acme - 123/OUT/FISCAL")));
        assert!(fs.moves().is_empty());
    }

    #[test]
    fn dry_run_leaves_file_in_place() {
        let fs = setup();
        let use_case = MoveDocumentUseCase::new(fs.clone());

        let outcome = use_case.move_document(
            &source_file(),
            Path::new("/i/C/Acme - 123"),
            Path::new("OUT/FOLHA"),
            true,
        );

        assert!(matches!(outcome, MoveOutcome::WouldMove { .. }));
        assert!(fs.is_file("/src/FOLHA/123-report.pdf"));
        assert!(fs.moves().is_empty());
    }

    #[test]
    fn vanished_source_is_classified() {
        let fs = setup();
        fs.remove("/src/FOLHA/123-report.pdf");
        let use_case = MoveDocumentUseCase::new(fs.clone());

        let outcome = use_case.move_document(
            &source_file(),
            Path::new("/i/C/Acme - 123"),
            Path::new("OUT/FOLHA"),
            false,
        );
        assert_eq!(outcome, MoveOutcome::SourceVanished);
    }

    #[test]
    fn permission_error_is_classified() {
        let fs = setup();
        fs.fail_moves_with(io::ErrorKind::PermissionDenied);
        let use_case = MoveDocumentUseCase::new(fs.clone());

        let outcome = use_case.move_document(
            &source_file(),
            Path::new("/i/C/Acme - 123"),
            Path::new("OUT/FOLHA"),
            false,
        );
        assert!(matches!(outcome, MoveOutcome::PermissionDenied { .. }));
        assert!(fs.is_file("/src/FOLHA/123-report.pdf"));
    }

    #[test]
    fn other_errors_are_unexpected() {
        let err = io::Error::new(io::ErrorKind::Other, "disk on fire");
        match classify_move_error(&err) {
            MoveOutcome::UnexpectedFailure { detail } => assert!(detail.contains("disk on fire")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn not_found_is_source_vanished() {
        let err = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(classify_move_error(&err), MoveOutcome::SourceVanished);
    }
}
