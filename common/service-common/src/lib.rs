//! Service Common - Shared utilities for HTTP services
//!
//! - **Initialization**: [`init_tracing`] for consistent log setup
//! - **Shutdown**: [`shutdown_signal`] for graceful termination of `axum::serve`
//!
//! # Example
//!
//! ```rust,ignore
//! service_common::init_tracing("github_projects", 0)?;
//!
//! axum::serve(listener, app)
//!     .with_graceful_shutdown(service_common::shutdown_signal())
//!     .await?;
//! ```

pub mod init;
pub mod shutdown;

pub use init::{init_tracing, level_directive};
pub use shutdown::shutdown_signal;
