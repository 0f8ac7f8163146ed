//! Shared application state

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::github::RepoSource;

/// Shared application state
///
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub source: Arc<dyn RepoSource>,
}

impl AppState {
    pub fn new(config: ProxyConfig, source: Arc<dyn RepoSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }
}
