//! Projects request handler
//!
//! A transport-independent function from (method, input) to either a
//! [`ProjectsResponse`] or an [`ApiError`]. The web layer only decodes the
//! request and renders the result.

use axum::http::Method;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::ProxyConfig;
use crate::error::{ApiError, ApiResult};
use crate::github::{RepoQuery, RepoSource, UpstreamError};
use crate::params::{FilterCriteria, RequestInput};
use crate::types::ProjectsResponse;

/// Fallback when the upstream error body is empty
pub const GENERIC_UPSTREAM_MESSAGE: &str = "GitHub API error";

/// List and filter an owner's repositories
///
/// Single attempt, no retries. The upstream call is bounded by
/// `config.timeout`.
pub async fn list_projects(
    method: &Method,
    input: &RequestInput,
    config: &ProxyConfig,
    source: &dyn RepoSource,
) -> ApiResult<ProjectsResponse> {
    if *method != Method::GET && *method != Method::POST {
        debug!(%method, "rejecting method");
        return Err(ApiError::MethodNotAllowed);
    }

    let criteria = FilterCriteria::from_input(input, config.default_user.as_deref())?;
    debug!(user = %criteria.user, limit = criteria.limit, "listing projects");

    let query = RepoQuery::for_owner(&criteria.user);
    let repos = match tokio::time::timeout(config.timeout, source.list_repos(&query)).await {
        Ok(Ok(repos)) => repos,
        Ok(Err(e)) => return Err(map_upstream_error(e)),
        Err(_) => {
            warn!(
                user = %criteria.user,
                timeout_ms = config.timeout.as_millis() as u64,
                "GitHub API timed out"
            );
            return Err(ApiError::UpstreamTimeout);
        }
    };

    let fetched = repos.len();
    let projects = criteria.apply(repos);
    info!(user = %criteria.user, fetched, returned = projects.len(), "projects listed");

    Ok(ProjectsResponse {
        user: criteria.user,
        projects,
    })
}

fn map_upstream_error(e: UpstreamError) -> ApiError {
    match e {
        UpstreamError::Timeout => {
            warn!("GitHub API timed out");
            ApiError::UpstreamTimeout
        }
        UpstreamError::Status { status, body } => {
            warn!(status, "GitHub API returned an error");
            ApiError::Upstream {
                status,
                message: upstream_message(&body),
            }
        }
        other => {
            error!("GitHub API call failed: {}", other);
            ApiError::Internal
        }
    }
}

/// Best-effort message from an upstream error body
///
/// Uses the JSON `message` field when present, else the raw text, else
/// [`GENERIC_UPSTREAM_MESSAGE`].
pub fn upstream_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        json.get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    });

    match from_json {
        Some(message) => message,
        None if !body.is_empty() => body.to_string(),
        None => GENERIC_UPSTREAM_MESSAGE.to_string(),
    }
}
