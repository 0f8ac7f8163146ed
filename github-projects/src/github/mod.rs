//! Upstream repository source
//!
//! [`RepoSource`] is the seam between the request handler and the GitHub API.
//! [`GithubClient`] is the real implementation; tests plug in fakes.

pub mod client;
pub mod error;

use async_trait::async_trait;

use crate::types::UpstreamRepository;

pub use client::GithubClient;
pub use error::{UpstreamError, UpstreamResult};

/// One page of an owner's repositories, most recently updated first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoQuery {
    pub owner: String,
    pub per_page: u32,
    pub sort: &'static str,
    pub direction: &'static str,
}

impl RepoQuery {
    pub fn for_owner(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            per_page: 100,
            sort: "updated",
            direction: "desc",
        }
    }
}

/// Trait for repository listing backends
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Fetch a single page of public repositories for `query.owner`
    async fn list_repos(&self, query: &RepoQuery) -> UpstreamResult<Vec<UpstreamRepository>>;
}
