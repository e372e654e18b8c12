//! Single-document routing pipeline
//!
//! Runs code extraction, client lookup, destination mapping and the move
//! for one file. Each stage either yields the input of the next stage or
//! ends the pipeline with a [`SkipReason`].

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::RoutingSettings;
use crate::domain::{extract_client_code, Disposition, FileOutcome, SkipReason, SourceFile};
use crate::ports::IFileSystem;

use super::locate_client::LocateClientUseCase;
use super::move_document::MoveDocumentUseCase;

/// Use case for routing one document to its client folder
pub struct RouteDocumentUseCase {
    settings: Arc<RoutingSettings>,
    locator: LocateClientUseCase,
    mover: MoveDocumentUseCase,
}

impl RouteDocumentUseCase {
    pub fn new(filesystem: Arc<dyn IFileSystem>, settings: Arc<RoutingSettings>) -> Self {
        Self {
            settings,
            locator: LocateClientUseCase::new(Arc::clone(&filesystem)),
            mover: MoveDocumentUseCase::new(filesystem),
        }
    }

    /// Routes `file`, moving it unless `dry_run` is set.
    pub fn route(&self, file: SourceFile, dry_run: bool) -> FileOutcome {
        let mut outcome = FileOutcome {
            file,
            code: None,
            client_folder: None,
            disposition: Disposition::Skipped {
                reason: SkipReason::InvalidCode,
            },
        };

        // Stage 1: code extraction
        let Some(code) = extract_client_code(&outcome.file.file_name) else {
            warn!(file = %outcome.file.file_name, "Could not extract a numeric code from file name");
            error!(file = %outcome.file.file_name, "Skipping file without a valid code");
            return outcome;
        };
        info!(code = %code, "Company code extracted");
        outcome.code = Some(code.clone());

        // Stage 2: client folder lookup
        let Some(client_folder) =
            self.locator
                .locate(&code, &self.settings.drive_roots, &self.settings.shared_root)
        else {
            error!(file = %outcome.file.file_name, "Skipping file because the client folder was not found");
            outcome.disposition = Disposition::Skipped {
                reason: SkipReason::ClientNotFound { code },
            };
            return outcome;
        };
        outcome.client_folder = Some(client_folder.clone());

        // Stage 3: destination mapping
        let Some(relative) = self.settings.mapping.map(&outcome.file.department) else {
            error!(
                department = %outcome.file.department,
                "Department has no destination mapping; check the configuration"
            );
            outcome.disposition = Disposition::Skipped {
                reason: SkipReason::Unmapped {
                    department: outcome.file.department.clone(),
                },
            };
            return outcome;
        };

        // Stage 4: move
        let moved = self
            .mover
            .move_document(&outcome.file, &client_folder, relative, dry_run);
        outcome.disposition = moved.into_disposition();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::config::ConfigBuilder;
    use crate::domain::DepartmentName;
    use crate::testing::MemoryFileSystem;

    fn settings() -> Arc<RoutingSettings> {
        let config = ConfigBuilder::new()
            .source_candidates(vec![PathBuf::from("/src")])
            .drives(vec!["/i".into()])
            .shared_root("Shared")
            .build();
        Arc::new(config.routing(2026).unwrap())
    }

    fn folha(name: &str) -> SourceFile {
        SourceFile::new(
            Path::new("/src/FOLHA").join(name),
            name,
            DepartmentName::new("FOLHA").unwrap(),
        )
    }

    fn destination_dir() -> PathBuf {
        PathBuf::from("/i/Shared/ClientsA/Acme - 123")
            .join("3 CONTABIL")
            .join("2026")
            .join("3 ROTINAS AUTOMATICAS")
            .join("FOLHA")
    }

    #[test]
    fn routes_file_through_all_stages() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_file("/src/FOLHA/123-report.pdf")
            .add_dir(destination_dir());
        let use_case = RouteDocumentUseCase::new(fs.clone(), settings());

        let outcome = use_case.route(folha("123-report.pdf"), false);

        assert_eq!(outcome.code.as_ref().map(|c| c.as_str()), Some("123"));
        assert_eq!(
            outcome.client_folder,
            Some(PathBuf::from("/i/Shared/ClientsA/Acme - 123"))
        );
        assert_eq!(
            outcome.disposition,
            Disposition::Moved {
                destination: destination_dir().join("123-report.pdf")
            }
        );
        assert!(fs.is_file(destination_dir().join("123-report.pdf")));
    }

    #[test]
    fn invalid_code_stops_at_first_stage() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_file("/src/FOLHA/invoice_abc.pdf");
        let use_case = RouteDocumentUseCase::new(fs.clone(), settings());

        let outcome = use_case.route(folha("invoice_abc.pdf"), false);

        assert_eq!(outcome.skip_reason(), Some(&SkipReason::InvalidCode));
        assert!(outcome.code.is_none());
        assert!(!outcome.reached_mover());
        assert!(fs.is_file("/src/FOLHA/invoice_abc.pdf"));
    }

    #[test]
    fn unknown_client_is_skipped() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_file("/src/FOLHA/999-x.pdf").add_dir(destination_dir());
        let use_case = RouteDocumentUseCase::new(fs.clone(), settings());

        let outcome = use_case.route(folha("999-x.pdf"), false);

        assert!(matches!(
            outcome.skip_reason(),
            Some(SkipReason::ClientNotFound { .. })
        ));
        assert!(fs.moves().is_empty());
    }

    #[test]
    fn unmapped_department_is_a_configuration_skip() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_file("/src/EXTRA/123-x.pdf").add_dir(destination_dir());
        let use_case = RouteDocumentUseCase::new(fs.clone(), settings());

        let file = SourceFile::new(
            PathBuf::from("/src/EXTRA/123-x.pdf"),
            "123-x.pdf",
            DepartmentName::new("EXTRA").unwrap(),
        );
        let outcome = use_case.route(file, false);

        let reason = outcome.skip_reason().unwrap();
        assert!(matches!(reason, SkipReason::Unmapped { .. }));
        assert_eq!(reason.category(), crate::domain::ErrorCategory::Configuration);
        assert!(outcome.client_folder.is_some());
    }

    #[test]
    fn missing_destination_reaches_mover_but_does_not_move() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_file("/src/FOLHA/123-report.pdf")
            .add_dir("/i/Shared/ClientsA/Acme - 123");
        let use_case = RouteDocumentUseCase::new(fs.clone(), settings());

        let outcome = use_case.route(folha("123-report.pdf"), false);

        assert!(matches!(
            outcome.skip_reason(),
            Some(SkipReason::DestinationMissing { .. })
        ));
        assert!(outcome.reached_mover());
        assert!(fs.is_file("/src/FOLHA/123-report.pdf"));
    }
}
