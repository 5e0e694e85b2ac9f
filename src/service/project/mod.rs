pub mod github;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{ItemsPageRequest, OwnerItems, Res};

// Traits.

/// Generic "project" trait that clients must implement.
///
/// This trait defines how a single page of project board items is read.
/// Pagination and filtering are left to the caller.
#[async_trait]
pub trait GenericProjectClient: Send + Sync + 'static {
    /// Fetch one page of items.
    ///
    /// Returns [`OwnerItems::Absent`] when the response carries no project under
    /// the root selected by `request.owner_type`. Transport, authentication, and
    /// query errors are returned as errors.
    async fn fetch_items_page(&self, request: &ItemsPageRequest) -> Res<OwnerItems>;
}

// Structs.

/// Project client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ProjectClient {
    inner: Arc<dyn GenericProjectClient>,
}

impl Deref for ProjectClient {
    type Target = dyn GenericProjectClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ProjectClient {
    pub fn new(inner: Arc<dyn GenericProjectClient>) -> Self {
        Self { inner }
    }
}
