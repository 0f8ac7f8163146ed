//! Configuration loading for github-projects
//!
//! Configuration is loaded from:
//! 1. Environment variables GITHUB_USER, GITHUB_TOKEN, GITHUB_API_URL, PORT
//! 2. Environment variable GITHUB_PROJECTS_CONFIG_PATH
//! 3. ~/.config/github-projects.toml
//! 4. Default values

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream GitHub configuration
    #[serde(default)]
    pub github: GithubConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base URL of the REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Owner listed when a request does not name one
    #[serde(default)]
    pub default_user: Option<String>,
    /// Bearer token sent upstream (never exposed to clients)
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Upstream call timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    "portfolio-site".to_string()
}

fn default_timeout_ms() -> u64 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            default_user: None,
            token: None,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Read-only settings handed to the request handler
///
/// Built once at startup; the handler never looks at the process environment.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub default_user: Option<String>,
    pub token: Option<String>,
    pub api_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        GithubConfig::default().proxy_config()
    }
}

impl GithubConfig {
    pub fn proxy_config(&self) -> ProxyConfig {
        ProxyConfig {
            default_user: self.default_user.clone(),
            token: self.token.clone(),
            api_url: self.api_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply env overrides
    ///
    /// An explicit path must exist; a discovered one may be missing.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
        }

        let config_path = explicit_path
            .map(Path::to_path_buf)
            .or_else(Self::find_config_path);

        let mut config = match config_path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                tracing::info!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply environment overrides (highest priority)
    ///
    /// Empty values are ignored, as is a `PORT` that is not a valid port.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(user) = non_empty("GITHUB_USER") {
            self.github.default_user = Some(user);
        }
        if let Some(token) = non_empty("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }
        if let Some(url) = non_empty("GITHUB_API_URL") {
            self.github.api_url = url;
        }
        if let Some(port) = non_empty("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var("GITHUB_PROJECTS_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.config/github-projects.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home)
                .join(".config")
                .join("github-projects.toml");
            return Some(path);
        }

        None
    }
}
