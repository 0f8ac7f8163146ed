//! Tracing initialization
//!
//! Logs go to stderr. `RUST_LOG` is honoured on top of the crate default.
//! Set `LOG_FORMAT=json` for structured JSON output (useful for production/log aggregation).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `-v` count to the default level directive for `crate_name`
///
/// 0 => info, 1 => debug, 2+ => trace
pub fn level_directive(crate_name: &str, verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("{}={}", crate_name, level)
}

/// Initialize tracing/logging for a service
///
/// # Arguments
///
/// * `crate_name` - The service crate name as it appears in log targets (e.g., "github_projects")
/// * `verbosity` - Number of `-v` flags given on the command line
pub fn init_tracing(crate_name: &str, verbosity: u8) -> anyhow::Result<()> {
    let directive = level_directive(crate_name, verbosity);
    let filter = EnvFilter::from_default_env()
        .add_directive(directive.parse()?)
        .add_directive("tower_http=info".parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // init_tracing itself can only run once per process, so only the
    // directive mapping is covered here.

    #[test]
    fn test_level_directive_default() {
        assert_eq!(level_directive("github_projects", 0), "github_projects=info");
    }

    #[test]
    fn test_level_directive_verbose() {
        assert_eq!(level_directive("svc", 1), "svc=debug");
        assert_eq!(level_directive("svc", 2), "svc=trace");
        assert_eq!(level_directive("svc", 9), "svc=trace");
    }

    #[test]
    fn test_level_directive_parses() {
        let directive = level_directive("github_projects", 1);
        assert!(directive
            .parse::<tracing_subscriber::filter::Directive>()
            .is_ok());
    }
}
