//! # Pitwall API
//!
//! HTTP/JSON service over the head-to-head engine.
//!
//! ## Routes
//!
//! - `GET /health`
//! - `GET /drivers?limit=N`: catalog, most starts first
//! - `GET /drivers/resolve?q=...`: one driver for a query or catalog number
//! - `GET /h2h?a=...&b=...&from=Y&to=Y`: full comparison report
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Axum HTTP Server                         │
//! │                (CORS + request tracing)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  AppState (Arc<H2hEngine>)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Arc<RaceDataset> (immutable snapshot)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use pitwall_analytics::{DEFAULT_SUGGESTION_LIMIT, H2hEngine};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{Config, log_level};
pub use error::{ApiError, ApiResult};

/// Application state for Axum handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<H2hEngine>,
    pub suggestion_limit: usize,
}

impl AppState {
    #[must_use]
    pub fn new(engine: H2hEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    #[must_use]
    pub const fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }
}

/// CORS layer for `origins`; `*` allows any origin.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(allowed))
}

/// Build the Axum router
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/drivers", get(handlers::list_drivers))
        .route("/drivers/resolve", get(handlers::resolve_driver))
        .route("/h2h", get(handlers::head_to_head))
        .route("/", get(|| async { "Pitwall H2H API" }))
        // State and middleware
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
