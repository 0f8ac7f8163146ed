//! GitHub REST client
//!
//! Implements [`RepoSource`] against `GET /users/{owner}/repos`.
//! See: https://docs.github.com/en/rest/repos/repos#list-repositories-for-a-user

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use tracing::{debug, instrument};

use super::error::{UpstreamError, UpstreamResult};
use super::{RepoQuery, RepoSource};
use crate::config::ProxyConfig;
use crate::types::UpstreamRepository;

const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl GithubClient {
    /// Build a client from the proxy settings
    pub fn new(config: &ProxyConfig) -> UpstreamResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let base_url = Url::parse(&config.api_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", config.api_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(config.api_url.clone()));
        }

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// URL of the repository listing for `owner`, without query parameters
    pub fn repos_url(&self, owner: &str) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["users", owner, "repos"]);
        Ok(url)
    }
}

#[async_trait]
impl RepoSource for GithubClient {
    #[instrument(skip(self), fields(owner = %query.owner))]
    async fn list_repos(&self, query: &RepoQuery) -> UpstreamResult<Vec<UpstreamRepository>> {
        let url = self.repos_url(&query.owner)?;
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .query(&[
                ("per_page", query.per_page.to_string()),
                ("sort", query.sort.to_string()),
                ("direction", query.direction.to_string()),
            ])
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest)?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let repos: Vec<UpstreamRepository> = serde_json::from_str(&body)?;
        debug!(count = repos.len(), "received repositories");
        Ok(repos)
    }
}

fn map_reqwest(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> GithubClient {
        GithubClient::new(&ProxyConfig {
            api_url: api_url.to_string(),
            ..ProxyConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_repos_url() {
        let url = client("https://api.github.com").repos_url("octocat").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/users/octocat/repos");
    }

    #[test]
    fn test_repos_url_keeps_base_path() {
        let url = client("https://ghe.example.com/api/v3/")
            .repos_url("octocat")
            .unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/users/octocat/repos");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = GithubClient::new(&ProxyConfig {
            api_url: "not a url".to_string(),
            ..ProxyConfig::default()
        });
        assert!(matches!(result, Err(UpstreamError::InvalidUrl(_))));
    }

    #[test]
    fn test_query_defaults() {
        let query = RepoQuery::for_owner("octocat");
        assert_eq!(query.per_page, 100);
        assert_eq!(query.sort, "updated");
        assert_eq!(query.direction, "desc");
    }
}
