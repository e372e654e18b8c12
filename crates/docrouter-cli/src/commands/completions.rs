//! Completions command - Print a shell completion script
//!
//! `docrouter completions bash > ~/.local/share/bash-completion/completions/docrouter`

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory};
use clap_complete::Shell;

const BIN_NAME: &str = "docrouter";

/// Arguments for the completions subcommand
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    pub async fn execute(&self) -> Result<ExitCode> {
        let script = script_for(self.shell);
        io::stdout()
            .lock()
            .write_all(&script)
            .context("Failed to write completion script")?;
        Ok(ExitCode::SUCCESS)
    }
}

fn script_for(shell: Shell) -> Vec<u8> {
    let mut script = Vec::new();
    clap_complete::generate(shell, &mut crate::Cli::command(), BIN_NAME, &mut script);
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_offers_every_subcommand() {
        let script = String::from_utf8(script_for(Shell::Bash)).unwrap();
        for subcommand in ["run", "explain", "locate", "config", "completions"] {
            assert!(script.contains(subcommand), "missing {subcommand}");
        }
        assert!(script.contains("--dry-run"));
    }
}
