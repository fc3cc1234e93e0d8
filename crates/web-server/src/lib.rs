//! # Web Server Crate
//!
//! The HTTP surface of the service: record ingestion and listing, and the crossover
//! performance report computed over everything stored.
//!
//! ## Public API
//!
//! - `AppState`: The store, the engine and the default windows shared by all handlers.
//! - `create_router`: Builds the `axum::Router` with its middleware. Tests drive it directly.
//! - `run_server`: Binds a listener and serves the router until shutdown.

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use configuration::WindowParams;
use database::ObservationStore;
use engine::StrategyEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObservationStore>,
    pub engine: StrategyEngine,
    /// Windows used when a request does not name its own.
    pub defaults: WindowParams,
}

impl AppState {
    pub fn new(store: Arc<dyn ObservationStore>, defaults: WindowParams) -> Self {
        Self {
            store,
            engine: StrategyEngine::new(),
            defaults,
        }
    }
}

/// Builds the application router with CORS, request tracing and a body size limit.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/data", get(handlers::get_all_data).post(handlers::add_data))
        .route("/strategy/performance", get(handlers::strategy_performance))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB is plenty for a single record
}

/// Serves the router on `addr` until the process is stopped.
pub async fn run_server(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    // Tracing is initialized by the binary.
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
