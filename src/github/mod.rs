//! Upstream repository lookups.
//!
//! The service only sees the [`RepositoryClient`] trait. Implementations
//! swallow transport and parse failures: a failed search is an empty list and
//! a failed lookup is `None`.

pub mod client;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::models::{RepositoryId, RepositoryRecord};

pub use client::GitHubClient;

#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Search repositories by name. Returns an empty list on any failure.
    async fn search_by_name(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Vec<RepositoryRecord>;

    /// Fetch one repository by id. Returns `None` when it does not exist or the
    /// request fails.
    async fn get_by_id(
        &self,
        id: RepositoryId,
        cancel: &CancellationToken,
    ) -> Option<RepositoryRecord>;
}
