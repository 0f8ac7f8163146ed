//! Error types for GitHub API calls

use thiserror::Error;

/// Errors that can occur when listing repositories upstream
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The call did not complete within its time budget
    #[error("GitHub API request timed out")]
    Timeout,

    /// GitHub answered with a non-success status
    #[error("GitHub API returned {status}: {body}")]
    Status {
        /// HTTP status code from GitHub
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Connection, TLS or protocol failure
    #[error("GitHub API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status but the body was not a repository list
    #[error("failed to parse GitHub response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured API base URL cannot carry a path
    #[error("invalid GitHub API URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for upstream operations
pub type UpstreamResult<T> = Result<T, UpstreamError>;
