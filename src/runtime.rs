//! Runtime services and shared state for a notifier run.

use chrono::Local;
use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Repository, Res, Void},
    },
    interaction::reminder,
    service::{issues::IssueClient, project::ProjectClient},
};

/// Runtime service context for one run.
///
/// This struct holds the configuration, the repository being acted on, and
/// the service clients. It is designed to be trivially cloneable, allowing it
/// to be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the run.
    pub config: Config,
    /// The repository whose issues are commented on.
    pub repository: Repository,
    /// The project board client.
    pub projects: ProjectClient,
    /// The issue comment client.
    pub issues: IssueClient,
}

impl Runtime {
    /// Create a new runtime instance backed by GitHub.
    #[instrument(skip_all)]
    pub fn new(config: Config, repository: Repository) -> Res<Self> {
        let projects = ProjectClient::github(&config)?;
        let issues = IssueClient::github(&config)?;

        Ok(Self {
            config,
            repository,
            projects,
            issues,
        })
    }

    /// Run one notification pass against the current local date.
    pub async fn start(&self) -> Void {
        let today = Local::now().date_naive();
        let posted = reminder::notify_due_tomorrow(self, today).await?;

        info!("Posted {posted} reminder(s).");

        Ok(())
    }
}
