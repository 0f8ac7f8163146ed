//! GitHub Projects Library
//!
//! A single-endpoint HTTP proxy that lists a user's public GitHub
//! repositories, filters them by language, topic, size, stars and update
//! window, and returns a trimmed JSON projection.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use github_projects::{web, GithubClient, ProxyConfig};
//!
//! let config = ProxyConfig::default();
//! let client = GithubClient::new(&config)?;
//! let app = web::create_router(web::AppState::new(config, Arc::new(client)));
//! ```
//!
//! # Configuration
//! Set `GITHUB_USER` / `GITHUB_TOKEN` env vars or configure in `~/.config/github-projects.toml`

pub mod config;
pub mod error;
pub mod filter;
pub mod github;
pub mod handler;
pub mod params;
pub mod types;
pub mod web;

pub use config::{Config, ProxyConfig};
pub use error::{ApiError, ApiResult};
pub use github::{GithubClient, RepoQuery, RepoSource, UpstreamError};
pub use handler::list_projects;
pub use params::{FilterCriteria, RequestInput};
pub use types::{ProjectSummary, ProjectsResponse, UpstreamRepository};
