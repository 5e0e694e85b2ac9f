//! Library root for `project-due-notifier`.
//!
//! The notifier walks a GitHub project board and reminds people about issues
//! that are due tomorrow:
//! - Reads every open issue on the board that has a due date set
//! - Keeps the ones whose due date is the next calendar day
//! - Comments on each, mentioning the first assignee or a fallback handle
//!
//! Remote access sits behind traits in [`service`], so the traversal and
//! notification logic in [`interaction`] can run against any implementation.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{
    config::Config,
    types::{Repository, Void},
};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Builds the GitHub-backed runtime for `repository` and runs a single
/// notification pass.
pub async fn start(config: Config, repository: Repository) -> Void {
    info!("Starting project-due-notifier for {repository} ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config, repository)?;

    // Run the pass.
    runtime.start().await?;

    Ok(())
}
