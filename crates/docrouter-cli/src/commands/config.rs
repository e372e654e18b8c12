//! Config command - View and check DocRouter configuration
//!
//! Provides the `docrouter config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Validates the configuration file and reports errors
//! 3. Prints the configuration file path

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Subcommand;
use docrouter_core::config::Config;
use tracing::info;

use crate::output::{Console, OutputFormat};
use crate::AppContext;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
    /// Print the configuration file path
    Path,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, format: OutputFormat, context: &AppContext) -> Result<ExitCode> {
        match self {
            ConfigCommand::Show => self.execute_show(format, context),
            ConfigCommand::Validate => self.execute_validate(format, context),
            ConfigCommand::Path => self.execute_path(format, context),
        }
    }

    fn execute_show(&self, format: OutputFormat, context: &AppContext) -> Result<ExitCode> {
        let console = Console::new(format, context.quiet);
        let config = context.load_config()?;

        info!(config_path = %context.config_path.display(), "Showing configuration");

        if matches!(format, OutputFormat::Json) {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            console.print_json(&json);
        } else {
            let origin = if context.config_path.exists() {
                context.config_path.display().to_string()
            } else {
                "built-in defaults".to_string()
            };
            console.success(&format!("Configuration ({origin})"));
            console.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                console.info(line);
            }
        }

        Ok(ExitCode::SUCCESS)
    }

    fn execute_validate(&self, format: OutputFormat, context: &AppContext) -> Result<ExitCode> {
        let console = Console::new(format, context.quiet);
        let config_path = &context.config_path;

        // Load explicitly: a missing file is reported, not replaced by defaults
        let config = match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                let message = if config_path.exists() {
                    format!("Failed to parse configuration: {e:#}")
                } else {
                    "Configuration file not found. Defaults are used.".to_string()
                };
                if matches!(format, OutputFormat::Json) {
                    console.print_json(&serde_json::json!({
                        "valid": false,
                        "config_path": config_path.display().to_string(),
                        "errors": [message],
                    }));
                } else {
                    console.error(&message);
                    console.info(&format!("File: {}", config_path.display()));
                }
                return Ok(ExitCode::FAILURE);
            }
        };

        info!(config_path = %config_path.display(), "Validating configuration");

        let errors = config.validate();

        if matches!(format, OutputFormat::Json) {
            let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            console.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": config_path.display().to_string(),
                "errors": error_strings,
            }));
        } else if errors.is_empty() {
            console.success("Configuration is valid");
            console.info(&format!("File: {}", config_path.display()));
        } else {
            console.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            console.info(&format!("File: {}", config_path.display()));
            console.info("");
            for error in &errors {
                console.info(&format!("  {} - {}", error.field, error.message));
            }
        }

        Ok(if errors.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }

    fn execute_path(&self, format: OutputFormat, context: &AppContext) -> Result<ExitCode> {
        let path = context.config_path.display().to_string();
        if matches!(format, OutputFormat::Json) {
            Console::new(format, context.quiet).print_json(&serde_json::json!({
                "config_path": path,
                "exists": context.config_path.exists(),
            }));
        } else {
            println!("{path}");
        }
        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    fn context(path: PathBuf) -> AppContext {
        AppContext {
            config_path: path,
            quiet: true,
        }
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = context(dir.path().join("none.yaml")).load_config().unwrap();
        assert_eq!(config.clients.shared_root, "Drives compartilhados");
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "source: [not, a, map").unwrap();

        let err = context(path).load_config().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
    }

    #[tokio::test]
    async fn validate_reports_missing_file_as_failure() {
        let dir = TempDir::new().unwrap();
        let code = ConfigCommand::Validate
            .execute(OutputFormat::Json, &context(dir.path().join("none.yaml")))
            .await
            .unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn validate_accepts_a_complete_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        std::fs::write(&path, yaml).unwrap();

        let code = ConfigCommand::Validate
            .execute(OutputFormat::Json, &context(path))
            .await
            .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
