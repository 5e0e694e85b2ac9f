pub mod github;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Void;

// Traits.

/// Generic "issues" trait that clients must implement.
#[async_trait]
pub trait GenericIssueClient: Send + Sync + 'static {
    /// Post a new comment on an issue.
    ///
    /// Comments are not idempotent: calling this twice posts twice.
    async fn create_comment(&self, owner: &str, repo: &str, issue_number: u64, body: &str) -> Void;
}

// Structs.

/// Issue client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct IssueClient {
    inner: Arc<dyn GenericIssueClient>,
}

impl Deref for IssueClient {
    type Target = dyn GenericIssueClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl IssueClient {
    pub fn new(inner: Arc<dyn GenericIssueClient>) -> Self {
        Self { inner }
    }
}
