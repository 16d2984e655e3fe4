//! # nestwatch-server
//!
//! HTTP server for the nestwatch child location-monitoring service.
//!
//! This binary provides:
//! - REST API for location ingest, safe zones, notifications, and insights
//! - OpenAPI documentation at /api/openapi.json
//! - Structured logging to file and stdout
//!
//! ## Running
//!
//! ```bash
//! # Development
//! cargo run --package nestwatch-server
//!
//! # Production
//! NESTWATCH_ENV=production ./nestwatch-server
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use nestwatch_server::api;
use nestwatch_server::logging;
use nestwatch_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let is_production = std::env::var("NESTWATCH_ENV")
        .map(|v| v == "production")
        .unwrap_or(false);
    logging::init(is_production)?;

    info!("Starting nestwatch-server");

    let state = AppState::new()?;
    let listen_port = state.config.listen_port;
    let app = api::create_router(state.into_shared());

    let addr = SocketAddr::from(([0, 0, 0, 0], listen_port));
    let listener = TcpListener::bind(addr).await?;

    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
