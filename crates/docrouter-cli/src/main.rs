//! DocRouter CLI - Command-line interface for DocRouter
//!
//! Provides commands for:
//! - Running a routing sweep (optionally as a dry run)
//! - Explaining how a single document would be routed
//! - Locating a client folder by code
//! - Viewing and validating configuration

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docrouter_core::config::Config;
use docrouter_journal::{JournalGuard, JournalOptions};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    completions::CompletionsCommand, config::ConfigCommand, explain::ExplainCommand,
    locate::LocateCommand, run::RunCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "docrouter",
    version,
    about = "Routes staged documents into client folders"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sweep the department folders and route every document
    Run(RunCommand),
    /// Show how a single document would be routed, without moving it
    Explain(ExplainCommand),
    /// Find the client folder for a numeric code
    Locate(LocateCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Commands {
    /// Commands that touch documents write to the run journal.
    fn uses_journal(&self) -> bool {
        matches!(
            self,
            Commands::Run(_) | Commands::Explain(_) | Commands::Locate(_)
        )
    }
}

/// Global settings shared by every command
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config_path: PathBuf,
    pub quiet: bool,
}

impl AppContext {
    /// Loads the configuration file, or the defaults when there is none.
    ///
    /// # Errors
    /// Fails when the file exists but cannot be read or parsed.
    pub fn load_config(&self) -> Result<Config> {
        Config::load_or_default(&self.config_path)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let context = AppContext {
        config_path: cli.config.clone().unwrap_or_else(Config::default_path),
        quiet: cli.quiet,
    };

    // Setup tracing
    let _journal = if cli.command.uses_journal() {
        Some(init_journal(&cli, &context)?)
    } else {
        init_plain_tracing(&cli);
        None
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let code = match cli.command {
        Commands::Run(cmd) => cmd.execute(format, &context).await?,
        Commands::Explain(cmd) => cmd.execute(format, &context).await?,
        Commands::Locate(cmd) => cmd.execute(format, &context).await?,
        Commands::Config(cmd) => cmd.execute(format, &context).await?,
        Commands::Completions(cmd) => cmd.execute().await?,
    };
    Ok(code)
}

fn init_journal(cli: &Cli, context: &AppContext) -> Result<JournalGuard> {
    let config = context
        .load_config()
        .context("Failed to load configuration")?;
    let options = JournalOptions {
        verbosity: cli.verbose,
        quiet: cli.quiet,
    };
    docrouter_journal::init(&config.logging, options).context("Failed to initialise logging")
}

fn init_plain_tracing(cli: &Cli) {
    let filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if cli.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
