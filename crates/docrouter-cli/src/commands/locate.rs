//! Locate command - Find a client folder by code
//!
//! Provides the `docrouter locate <code>` CLI command, which runs only the
//! client folder lookup across the configured drives.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use docrouter_core::config::drive_root;
use docrouter_core::domain::ClientCode;
use docrouter_core::usecases::LocateClientUseCase;
use docrouter_fs::LocalFileSystemAdapter;

use super::blocking;
use crate::output::{Console, OutputFormat};
use crate::AppContext;

/// Arguments for the locate subcommand
#[derive(Debug, Args)]
pub struct LocateCommand {
    /// Numeric client code, e.g. 123
    pub code: ClientCode,
}

impl LocateCommand {
    pub async fn execute(&self, format: OutputFormat, context: &AppContext) -> Result<ExitCode> {
        let console = Console::new(format, context.quiet);
        let config = context.load_config()?;

        let drives: Vec<_> = config.clients.drives.iter().map(|d| drive_root(d)).collect();
        let shared_root = config.clients.shared_root.clone();
        let code = self.code.clone();

        let found = {
            let drives = drives.clone();
            blocking(move || {
                LocateClientUseCase::new(Arc::new(LocalFileSystemAdapter::new()))
                    .locate(&code, &drives, &shared_root)
            })
            .await?
        };

        if matches!(format, OutputFormat::Json) {
            console.print_json(&serde_json::json!({
                "code": self.code.as_str(),
                "found": found.is_some(),
                "path": found.as_ref().map(|p| p.display().to_string()),
                "drives": drives.iter().map(|d| d.display().to_string()).collect::<Vec<_>>(),
            }));
        } else {
            match &found {
                Some(path) => console.success(&format!("{}", path.display())),
                None => {
                    console.error(&format!("No client folder found for code {}", self.code));
                    console.info(&format!(
                        "Searched <drive>/{}/<container>/ on: {}",
                        config.clients.shared_root,
                        drives
                            .iter()
                            .map(|d| d.display().to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ));
                }
            }
        }

        Ok(if found.is_some() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}
