//! REST API handlers

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::state::AppState;
use crate::handler;
use crate::params::RequestInput;

/// Shared caches may serve for 10 minutes, stale for up to an hour while revalidating
pub const CACHE_CONTROL: &str = "s-maxage=600, stale-while-revalidate=3600";

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "API ready. Use /api/github"
}

/// `GET|POST /api/github`
pub async fn github_projects(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let input = if method == Method::POST {
        body_input(&headers, &body)
    } else {
        RequestInput::from_urlencoded(query.unwrap_or_default().as_bytes())
    };

    match handler::list_projects(&method, &input, &state.config, state.source.as_ref()).await {
        Ok(payload) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, CACHE_CONTROL)],
            Json(payload),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Decode a POST body: urlencoded forms by content type, JSON otherwise
///
/// Unparseable bodies yield empty input.
fn body_input(headers: &HeaderMap, body: &[u8]) -> RequestInput {
    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if is_form {
        return RequestInput::from_urlencoded(body);
    }

    if body.is_empty() {
        return RequestInput::new();
    }

    match serde_json::from_slice(body) {
        Ok(json) => RequestInput::from_json(&json),
        Err(e) => {
            tracing::debug!("Ignoring unparseable request body: {}", e);
            RequestInput::new()
        }
    }
}
