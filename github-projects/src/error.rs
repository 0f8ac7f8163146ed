//! Client-facing error type
//!
//! Every failure branch of the request handler ends in one of these. The
//! `Display` text is exactly the `error` string sent to the client.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::types::ErrorResponse;

/// Errors returned by the projects handler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Anything other than GET or POST
    #[error("Method not allowed.")]
    MethodNotAllowed,

    /// Owner identifier missing or not a valid GitHub handle
    #[error("Invalid or missing GitHub user.")]
    InvalidUser,

    /// The upstream call exceeded its time budget
    #[error("GitHub API timed out.")]
    UpstreamTimeout,

    /// GitHub answered with a non-success status, forwarded as-is
    #[error("{message}")]
    Upstream {
        /// Upstream status code
        status: u16,
        /// Extracted upstream message
        message: String,
    },

    /// Transport failure or undecodable upstream payload
    #[error("Unexpected server error.")]
    Internal,
}

/// Result type alias for handler operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status for this error
    ///
    /// An upstream status that is not a valid HTTP code becomes 502.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidUser => StatusCode::BAD_REQUEST,
            ApiError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse::new(self.to_string()));

        if self == ApiError::MethodNotAllowed {
            return (status, [(header::ALLOW, "GET, POST")], body).into_response();
        }

        (status, body).into_response()
    }
}
