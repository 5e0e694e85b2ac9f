//! GitHub REST implementation of the issue service.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::USER_AGENT,
};

use super::{GenericIssueClient, IssueClient};

const GITHUB_API_VERSION: &str = "2022-11-28";

// Extra methods on `IssueClient` applied by the github implementation.

impl IssueClient {
    /// Creates a new GitHub issue client.
    pub fn github(config: &Config) -> Res<Self> {
        let client = GitHubIssueClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<GitHubIssueClient> for IssueClient {
    fn from(client: GitHubIssueClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

/// GitHub REST issue client implementation.
#[derive(Clone)]
pub struct GitHubIssueClient {
    client: Client,
    api_url: String,
    token: String,
}

impl GitHubIssueClient {
    /// Create a new GitHub issue client.
    #[instrument(name = "GitHubIssueClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.gh_token.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct CreateCommentRequest<'a> {
    body: &'a str,
}

#[async_trait]
impl GenericIssueClient for GitHubIssueClient {
    #[instrument(name = "GitHubIssueClient::create_comment", skip(self, body))]
    async fn create_comment(&self, owner: &str, repo: &str, issue_number: u64, body: &str) -> Void {
        let url = format!("{}/repos/{owner}/{repo}/issues/{issue_number}/comments", self.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .json(&CreateCommentRequest { body })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Creating a comment on {owner}/{repo}#{issue_number} failed with status {status}: {error_text}"));
        }

        info!("Commented on {owner}/{repo}#{issue_number}.");

        Ok(())
    }
}
