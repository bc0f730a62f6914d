//! # Pitwall API Server
//!
//! Binary entry point for the HTTP service.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitwall_analytics::H2hEngine;
use pitwall_api::{AppState, Config, build_router, log_level};
use pitwall_persistence::{CsvConfig, CsvRepository, DatasetStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing before configuration so its warnings are emitted
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level(|key| std::env::var(key).ok()).into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();

    tracing::info!(version = pitwall_api::VERSION, "Starting Pitwall H2H API");

    // Load the race tables once; every request shares the snapshot
    tracing::info!(
        data_dir = %config.data_dir.display(),
        strategy = ?config.read_strategy,
        "Loading race tables"
    );
    let store = DatasetStore::new(CsvRepository::new(CsvConfig::new(&config.data_dir)))
        .with_strategy(config.read_strategy);
    let dataset = tokio::task::spawn_blocking(move || store.snapshot())
        .await
        .context("dataset loader panicked")?
        .with_context(|| format!("loading race tables from {}", config.data_dir.display()))?;

    let engine = H2hEngine::new(dataset).with_strategy(config.read_strategy);
    let state = AppState::new(engine).with_suggestion_limit(config.suggestion_limit);

    // Build router
    let app = build_router(state, &config.cors_origins);

    // Start server
    let addr = config.server_addr;
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
