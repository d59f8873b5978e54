//! Covidash API Server
//!
//! This crate provides the HTTP server for the Covidash COVID-19
//! dashboard. The dataset is fetched once at startup, and every endpoint
//! is a pure query over that immutable dataset: the external chart
//! frontend calls one endpoint per chart whenever the region selector
//! changes.
//!
//! # Architecture
//!
//! The API server is built on Axum and Tokio, providing:
//! - Overview endpoints for the cases bar chart and deaths scatter plot
//! - Per-region endpoints for the hospitalization and death-rate charts
//! - A region listing for the frontend's dropdown selector
//!
//! # Example
//!
//! ```no_run
//! use api::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod routes;
mod state;

pub use config::Config;
pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use shared::dataset::Dataset;
use shared::source;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Runs the Covidash API server.
///
/// This function loads configuration from environment variables, fetches
/// the upstream dataset once, and starts listening for incoming
/// connections. It handles graceful shutdown on SIGTERM/SIGINT signals.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The dataset cannot be fetched, parsed, or is empty
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    run_server_with_config(config).await
}

/// Runs the Covidash API server with the provided configuration.
///
/// This is useful for testing or when you want to provide configuration
/// programmatically.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded, the server fails to
/// bind to the configured address, or a fatal error occurs during
/// operation.
pub async fn run_server_with_config(config: Config) -> Result<()> {
    let addr = config.socket_addr();

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Covidash API server starting"
    );

    let dataset = load_dataset(&config)
        .await
        .context("Failed to load the COVID-19 dataset at startup")?;
    let state = AppState::new(dataset);

    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a
/// full server.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::overview_routes(state.clone()))
        .merge(routes::region_routes(state))
        .layer(TraceLayer::new_for_http())
        // The chart frontend is served from a different origin.
        .layer(CorsLayer::permissive())
}

/// Loads the dataset once at startup, from a local file when configured
/// or from the upstream feed URL otherwise.
async fn load_dataset(config: &Config) -> Result<Dataset> {
    match &config.data_file {
        Some(path) => source::load_from_path(path)
            .with_context(|| format!("Failed to load dataset from {}", path.display())),
        None => source::fetch_dataset(&config.data_url)
            .await
            .with_context(|| format!("Failed to fetch dataset from {}", config.data_url)),
    }
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
