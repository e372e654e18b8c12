//! Explain command - Show how one document would be routed
//!
//! Provides the `docrouter explain <file>` CLI command which:
//! 1. Runs the routing pipeline for a single file in dry-run mode
//! 2. Prints the result of every stage: code, client folder, mapping, move
//!
//! Nothing is moved.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use docrouter_core::config::RoutingSettings;
use docrouter_core::domain::{DepartmentName, Disposition, FileOutcome, SourceFile};
use docrouter_core::usecases::RouteDocumentUseCase;
use docrouter_fs::LocalFileSystemAdapter;
use tracing::info;

use super::blocking;
use crate::output::{Console, OutputFormat};
use crate::AppContext;

/// Arguments for the explain subcommand
#[derive(Debug, Args)]
pub struct ExplainCommand {
    /// Path to the document
    pub path: PathBuf,

    /// Department to route as (defaults to the parent folder name)
    #[arg(long)]
    pub department: Option<DepartmentName>,
}

impl ExplainCommand {
    pub async fn execute(&self, format: OutputFormat, context: &AppContext) -> Result<ExitCode> {
        let console = Console::new(format, context.quiet);
        let config = context.load_config()?;
        let settings = Arc::new(
            config
                .routing(chrono::Local::now().year())
                .context("Invalid routing configuration")?,
        );

        let file = self.source_file()?;
        if !file.path.is_file() {
            console.warn(&format!("{} is not an existing file", file.path.display()));
        }
        info!(path = %file.path.display(), department = %file.department, "Explaining routing");

        let outcome = {
            let settings = Arc::clone(&settings);
            blocking(move || {
                RouteDocumentUseCase::new(Arc::new(LocalFileSystemAdapter::new()), settings)
                    .route(file, true)
            })
            .await?
        };

        if matches!(format, OutputFormat::Json) {
            let json = serde_json::to_value(&outcome).context("Failed to serialize outcome")?;
            console.print_json(&json);
        } else {
            for line in stage_lines(&outcome, &settings) {
                console.info(&line);
            }
            match &outcome.disposition {
                Disposition::WouldMove { destination } => {
                    console.success(&format!("Would move to {}", destination.display()))
                }
                Disposition::Moved { destination } => {
                    console.success(&format!("Moved to {}", destination.display()))
                }
                Disposition::Skipped { reason } => {
                    console.error(&format!("Would be skipped: {reason}"))
                }
            }
        }

        Ok(if outcome.skip_reason().is_some() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        })
    }

    fn source_file(&self) -> Result<SourceFile> {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", self.path.display()))?;

        let department = match &self.department {
            Some(department) => department.clone(),
            None => department_from_parent(&self.path)?,
        };
        Ok(SourceFile::new(self.path.clone(), file_name, department))
    }
}

fn department_from_parent(path: &Path) -> Result<DepartmentName> {
    let parent = path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .context("Cannot infer the department; pass --department")?;
    DepartmentName::new(parent).context("Parent folder is not a valid department name")
}

/// Human-readable result of each pipeline stage reached
fn stage_lines(outcome: &FileOutcome, settings: &RoutingSettings) -> Vec<String> {
    let mut lines = vec![
        format!("File:          {}", outcome.file.file_name),
        format!("Department:    {}", outcome.file.department),
    ];

    let Some(code) = &outcome.code else {
        lines.push("Client code:   none (name must start with digits before '-' or '_')".into());
        return lines;
    };
    lines.push(format!("Client code:   {code}"));

    let Some(folder) = &outcome.client_folder else {
        lines.push("Client folder: not found on any drive".into());
        return lines;
    };
    lines.push(format!("Client folder: {}", folder.display()));

    match settings.mapping.map(&outcome.file.department) {
        Some(relative) => lines.push(format!("Destination:   {}", relative.display())),
        None => lines.push("Destination:   department is not mapped".into()),
    }
    lines
}
