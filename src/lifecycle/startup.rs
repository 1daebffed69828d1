//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the upstream client from validated configuration
//! - Wire the employee service and HTTP server together
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound by the caller, after wiring succeeds

use std::sync::Arc;
use thiserror::Error;

use crate::config::FacadeConfig;
use crate::employees::EmployeeService;
use crate::http::HttpServer;
use crate::upstream::HttpUpstream;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("api.base.url is required")]
    MissingBaseUrl,

    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Construct the server and everything it depends on.
pub fn build_server(config: FacadeConfig) -> Result<HttpServer, StartupError> {
    let base_url = config
        .api_base_url()
        .ok_or(StartupError::MissingBaseUrl)?
        .to_string();

    let upstream = HttpUpstream::new(
        base_url,
        config.timeouts.connect(),
        config.timeouts.upstream(),
    )?;
    tracing::info!(
        base_url = %upstream.base_url(),
        upstream_timeout = ?config.timeouts.upstream(),
        "Upstream client initialized"
    );

    let service = EmployeeService::new(Arc::new(upstream));
    Ok(HttpServer::new(config, service))
}
