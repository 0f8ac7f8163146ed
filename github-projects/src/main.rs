//! GitHub Projects Server
//!
//! Serves `GET|POST /api/github`, a filtered view of a user's public
//! repositories.
//!
//! # Configuration
//! Set `GITHUB_USER` / `GITHUB_TOKEN` env vars or configure in `~/.config/github-projects.toml`

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::sync::Arc;

use github_projects::config::Config;
use github_projects::web::{self, AppState, WebConfig};
use github_projects::GithubClient;

#[derive(Parser)]
#[command(name = "github-projects")]
#[command(about = "Filtered proxy for a user's public GitHub repositories")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "GITHUB_PROJECTS_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Address to bind (default: from config or 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (default: from config, PORT, or 3000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Default GitHub user when a request names none
    #[arg(short, long)]
    user: Option<String>,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    service_common::init_tracing("github_projects", cli.verbose)?;

    tracing::info!("Starting GitHub Projects Server");

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(user) = cli.user {
        config.github.default_user = Some(user.trim().to_string());
    }

    match &config.github.default_user {
        Some(user) => tracing::info!("Default GitHub user: {}", user),
        None => tracing::warn!("No default GitHub user - requests must name one"),
    }
    if config.github.token.is_none() {
        tracing::info!("No GITHUB_TOKEN set, using unauthenticated rate limits");
    }

    let proxy = config.github.proxy_config();
    let client = GithubClient::new(&proxy)?;
    let state = AppState::new(proxy, Arc::new(client));

    web::serve(
        WebConfig {
            host: config.server.host,
            port: config.server.port,
        },
        state,
    )
    .await
}
