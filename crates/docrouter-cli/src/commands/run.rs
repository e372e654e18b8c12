//! Run command - Sweep the staging area once
//!
//! Provides the `docrouter run` CLI command which:
//! 1. Loads the configuration and derives the routing settings for this year
//! 2. Runs one sweep on the blocking pool
//! 3. Prints the status line and one line per discovered file
//!
//! The exit code is non-zero only when the sweep failed.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use docrouter_core::domain::{Disposition, FileOutcome, RunResult, RunStatus};
use docrouter_core::ports::IFileSystem;
use docrouter_core::usecases::RunSweepUseCase;
use docrouter_fs::LocalFileSystemAdapter;
use tracing::{error, warn};

use crate::output::{Console, OutputFormat};
use crate::AppContext;

/// Arguments for the run subcommand
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Check every file without moving anything
    #[arg(long)]
    pub dry_run: bool,
}

impl RunCommand {
    pub async fn execute(&self, format: OutputFormat, context: &AppContext) -> Result<ExitCode> {
        let console = Console::new(format, context.quiet);

        let config = context.load_config()?;
        for problem in config.validate() {
            warn!(field = %problem.field, "Configuration problem: {}", problem.message);
        }
        let settings = Arc::new(
            config
                .routing(chrono::Local::now().year())
                .context("Invalid routing configuration")?,
        );

        let filesystem: Arc<dyn IFileSystem> = Arc::new(LocalFileSystemAdapter::new());
        let dry_run = self.dry_run;
        let worker = tokio::task::spawn_blocking(move || {
            RunSweepUseCase::new(filesystem, settings).run(dry_run)
        });

        let result = match worker.await {
            Ok(result) => result,
            Err(e) => {
                error!(fatal = true, error = %e, "Sweep worker stopped unexpectedly");
                console.error("Fatal error! Check the log.");
                return Ok(ExitCode::FAILURE);
            }
        };

        if matches!(format, OutputFormat::Json) {
            console.print_json(&summary_json(&result)?);
        } else {
            print_human(&console, &result);
        }

        Ok(match result.status {
            RunStatus::Failed { .. } => ExitCode::FAILURE,
            RunStatus::Aborted | RunStatus::Completed => ExitCode::SUCCESS,
        })
    }
}

fn print_human(console: &Console, result: &RunResult) {
    match result.status {
        RunStatus::Completed => console.success(&result.message()),
        RunStatus::Aborted | RunStatus::Failed { .. } => console.error(&result.message()),
    }
    if let Some(root) = &result.source_root {
        console.info(&format!("Source: {}", root.display()));
    }
    if result.dry_run {
        console.info("Dry run: nothing was moved");
    }
    if !result.outcomes.is_empty() {
        console.info("");
    }
    for outcome in &result.outcomes {
        console.info(&describe(outcome));
    }
    if !result.outcomes.is_empty() {
        console.info("");
        console.info(&format!(
            "{} moved, {} skipped, {} ms",
            result.files_moved(),
            result.files_skipped(),
            result.duration_ms
        ));
    }
}

/// One summary line for a file outcome
pub(crate) fn describe(outcome: &FileOutcome) -> String {
    let file = format!("{}/{}", outcome.file.department, outcome.file.file_name);
    match &outcome.disposition {
        Disposition::Moved { destination } => {
            format!("moved      {file} -> {}", destination.display())
        }
        Disposition::WouldMove { destination } => {
            format!("would move {file} -> {}", destination.display())
        }
        Disposition::Skipped { reason } => {
            format!("skipped    {file} ({}: {reason})", reason.category())
        }
    }
}

fn summary_json(result: &RunResult) -> Result<serde_json::Value> {
    let outcomes =
        serde_json::to_value(&result.outcomes).context("Failed to serialize run outcomes")?;
    let status = serde_json::to_value(&result.status).context("Failed to serialize run status")?;
    Ok(serde_json::json!({
        "run_id": result.run_id.to_string(),
        "status": status,
        "message": result.message(),
        "dry_run": result.dry_run,
        "source_root": result.source_root.as_ref().map(|p| p.display().to_string()),
        "files_processed": result.files_processed,
        "files_discovered": result.files_discovered,
        "moved": result.files_moved(),
        "skipped": result.files_skipped(),
        "duration_ms": result.duration_ms,
        "outcomes": outcomes,
    }))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use docrouter_core::domain::{DepartmentName, RunId, SkipReason, SourceFile};

    use super::*;

    fn outcome(disposition: Disposition) -> FileOutcome {
        FileOutcome {
            file: SourceFile::new(
                PathBuf::from("/staging/FOLHA/123-a.pdf"),
                "123-a.pdf",
                DepartmentName::new("FOLHA").unwrap(),
            ),
            code: None,
            client_folder: None,
            disposition,
        }
    }

    #[test]
    fn describe_moved_and_skipped() {
        let moved = describe(&outcome(Disposition::Moved {
            destination: PathBuf::from("/c/123-a.pdf"),
        }));
        assert!(moved.starts_with("moved"));
        assert!(moved.contains("FOLHA/123-a.pdf"));

        let skipped = describe(&outcome(Disposition::Skipped {
            reason: SkipReason::InvalidCode,
        }));
        assert!(skipped.contains("validation"));
        assert!(skipped.contains("no numeric client code"));
    }

    #[test]
    fn json_summary_has_expected_keys() {
        let result = RunResult {
            run_id: RunId::new(),
            source_root: Some(PathBuf::from("/staging")),
            status: RunStatus::Completed,
            files_processed: 1,
            files_discovered: 2,
            outcomes: vec![
                outcome(Disposition::Moved {
                    destination: PathBuf::from("/c/123-a.pdf"),
                }),
                outcome(Disposition::Skipped {
                    reason: SkipReason::InvalidCode,
                }),
            ],
            dry_run: false,
            duration_ms: 12,
        };

        let json = summary_json(&result).unwrap();
        assert_eq!(json["status"]["state"], "completed");
        assert_eq!(json["message"], "Process completed. 1 file(s) checked.");
        assert_eq!(json["moved"], 1);
        assert_eq!(json["skipped"], 1);
        assert_eq!(json["outcomes"][1]["disposition"]["result"], "skipped");
        assert_eq!(
            json["outcomes"][1]["disposition"]["reason"]["reason"],
            "invalid_code"
        );
    }
}
