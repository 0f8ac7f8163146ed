//! Repository and response types
//!
//! `UpstreamRepository` mirrors the fields we read from the GitHub
//! "list repositories for a user" endpoint. `ProjectSummary` is the public
//! projection returned to clients.

use serde::{Deserialize, Serialize};

/// A repository record as returned by the GitHub REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamRepository {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Primary language
    #[serde(default)]
    pub language: Option<String>,

    pub html_url: String,

    #[serde(default)]
    pub fork: bool,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub disabled: bool,

    /// Last update timestamp (ISO 8601), kept verbatim
    pub updated_at: String,

    /// Repository size in kilobytes
    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub stargazers_count: u64,

    #[serde(default)]
    pub forks_count: u64,

    #[serde(default)]
    pub open_issues_count: u64,

    #[serde(default)]
    pub default_branch: String,

    #[serde(default)]
    pub topics: Option<Vec<String>>,
}

/// A repository as exposed by this service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub name: String,
    pub description: String,
    pub language: String,
    pub url: String,
    pub updated_at: String,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub default_branch: String,
    pub topics: Vec<String>,
    pub size: u64,
}

impl From<UpstreamRepository> for ProjectSummary {
    fn from(repo: UpstreamRepository) -> Self {
        Self {
            name: repo.name,
            description: repo.description.unwrap_or_default(),
            language: repo.language.unwrap_or_else(|| "Unknown".to_string()),
            url: repo.html_url,
            updated_at: repo.updated_at,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            default_branch: repo.default_branch,
            topics: repo.topics.unwrap_or_default(),
            size: repo.size,
        }
    }
}

/// Successful response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub user: String,
    pub projects: Vec<ProjectSummary>,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}
