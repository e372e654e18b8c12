//! Run orchestration
//!
//! One pass resolves the source root, sweeps every configured department
//! folder in order and routes each file found there. A failure escaping the
//! sweep ends the run early as [`RunStatus::Failed`]; it never propagates to
//! the caller.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tracing::{error, info, warn};

use crate::config::RoutingSettings;
use crate::domain::{DepartmentName, FileOutcome, RunId, RunResult, RunStatus, SourceFile};
use crate::ports::IFileSystem;

use super::resolve_source::ResolveSourceUseCase;
use super::route_document::RouteDocumentUseCase;

const BANNER: &str = "==============================";

/// Outcomes gathered while sweeping, kept when the sweep fails midway
#[derive(Debug, Default)]
struct SweepProgress {
    outcomes: Vec<FileOutcome>,
    processed: u32,
    discovered: u32,
}

/// Use case for one full orchestration pass
pub struct RunSweepUseCase {
    filesystem: Arc<dyn IFileSystem>,
    settings: Arc<RoutingSettings>,
    resolver: ResolveSourceUseCase,
    router: RouteDocumentUseCase,
}

impl RunSweepUseCase {
    pub fn new(filesystem: Arc<dyn IFileSystem>, settings: Arc<RoutingSettings>) -> Self {
        Self {
            resolver: ResolveSourceUseCase::new(Arc::clone(&filesystem)),
            router: RouteDocumentUseCase::new(Arc::clone(&filesystem), Arc::clone(&settings)),
            filesystem,
            settings,
        }
    }

    /// Executes one pass. With `dry_run` nothing on disk is changed.
    pub fn run(&self, dry_run: bool) -> RunResult {
        let run_id = RunId::new();
        let started = Instant::now();
        info!(run_id = %run_id, dry_run, "{BANNER} Starting automation {BANNER}");

        let mut result = RunResult {
            run_id,
            source_root: None,
            status: RunStatus::Aborted,
            files_processed: 0,
            files_discovered: 0,
            outcomes: Vec::new(),
            dry_run,
            duration_ms: 0,
        };

        match self.resolver.resolve(&self.settings.source_candidates) {
            None => {
                error!("No source path is available; aborting");
            }
            Some(source_root) => {
                let mut progress = SweepProgress::default();
                result.status = match self.sweep(&source_root, dry_run, &mut progress) {
                    Ok(()) => RunStatus::Completed,
                    Err(e) => {
                        let chain = format!("{e:#}");
                        error!(fatal = true, error = %chain, "Fatal error during sweep");
                        RunStatus::Failed { error: chain }
                    }
                };
                result.source_root = Some(source_root);
                result.files_processed = progress.processed;
                result.files_discovered = progress.discovered;
                result.outcomes = progress.outcomes;
            }
        }

        result.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            run_id = %run_id,
            processed = result.files_processed,
            duration_ms = result.duration_ms,
            "{}",
            result.message()
        );
        info!(run_id = %run_id, "{BANNER} Automation finished {BANNER}");
        result
    }

    fn sweep(
        &self,
        source_root: &Path,
        dry_run: bool,
        progress: &mut SweepProgress,
    ) -> anyhow::Result<()> {
        for department in &self.settings.departments {
            let folder = source_root.join(department.as_str());
            if !self.filesystem.is_dir(&folder) {
                warn!(path = %folder.display(), "Department folder not found");
                continue;
            }

            info!(department = %department, "Checking department folder");
            for file in self.discover(&folder, department)? {
                info!(file = %file.file_name, "Processing file");
                progress.discovered += 1;
                let outcome = self.router.route(file, dry_run);
                if outcome.reached_mover() {
                    progress.processed += 1;
                }
                progress.outcomes.push(outcome);
            }
        }
        Ok(())
    }

    /// Lists the regular files directly inside a department folder.
    fn discover(
        &self,
        folder: &Path,
        department: &DepartmentName,
    ) -> anyhow::Result<Vec<SourceFile>> {
        let entries = self
            .filesystem
            .list_dir(folder)
            .with_context(|| format!("Failed to list department folder {}", folder.display()))?;

        Ok(entries
            .into_iter()
            .filter(|entry| entry.is_file())
            .map(|entry| SourceFile::new(entry.path, entry.name, department.clone()))
            .collect())
    }
}
