//! HTTP server for the docview documentation browser.
//!
//! Serves a JSON API over a read-only markdown tree:
//! - `GET /api/tree` — the navigable document tree
//! - `GET /api/pages/{*slug}` — one rendered document
//! - `GET /api/images?path=…` — per-document images through a path-guarded
//!   proxy
//!
//! Every request performs blocking filesystem reads to completion; there is
//! no background task and no shared mutable cache. The only shared state is
//! the immutable document root and exclusion set fixed at startup.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docview_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 7979,
//!         docs_root: PathBuf::from("docs"),
//!         exclude: vec!["node_modules".to_string()],
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Document root directory.
    pub docs_root: PathBuf,
    /// Entry names hidden from the document tree.
    pub exclude: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7979,
            docs_root: PathBuf::from("docs"),
            exclude: Vec::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        docs_root: config.docs_root,
        exclude: config.exclude,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from docview config.
#[must_use]
pub fn server_config_from_config(config: &docview_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        docs_root: config.docs_resolved.root.clone(),
        exclude: config.docs_resolved.exclude.clone(),
    }
}
