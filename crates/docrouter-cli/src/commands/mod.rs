//! CLI subcommands
//!
//! Every command exposes `execute`, returning the process exit code.
//! Filesystem work runs on the blocking pool so the runtime stays free.

pub mod completions;
pub mod config;
pub mod explain;
pub mod locate;
pub mod run;

use anyhow::{Context, Result};

/// Runs blocking filesystem work on the tokio blocking pool.
pub(crate) async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .context("Worker task failed")
}
