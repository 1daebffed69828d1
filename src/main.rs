//! Employee directory façade (v1)
//!
//! A small HTTP service built with Tokio and Axum that proxies an upstream
//! employee directory and aggregates its listing.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                  FAÇADE                      │
//!   Client Request       │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ─────────────────────┼─▶│  http    │──▶│employees │──▶│ upstream │──┼──▶ Upstream
//!                        │  │ handlers │   │ service  │   │  client  │  │    directory
//!   Client Response      │  └──────────┘   └──────────┘   └──────────┘  │
//!   ◀────────────────────┼── ErrorResponse / JSON                       │
//!                        │                                              │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use employee_facade::config::loader::{finalize, read_config};
use employee_facade::config::FacadeConfig;
use employee_facade::lifecycle::{build_server, Shutdown};
use employee_facade::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "employee-facade")]
#[command(about = "HTTP façade over an upstream employee directory", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Upstream base URL; overrides `api.base.url`.
    #[arg(long, env = "API_BASE_URL")]
    api_base_url: Option<String>,

    /// Listen address; overrides `listener.bind_address`.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => FacadeConfig::default(),
    };
    if let Some(url) = cli.api_base_url {
        config.api.base.url = Some(url);
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("employee-facade v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match finalize(config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = build_server(config)?;
    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
