//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all endpoints
//! - Middleware stack (logging, compression, CORS, timeout)
//! - Graceful shutdown handling

use crate::config::ServiceConfig;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, not_found};
use crate::routes::{generate, health, permits};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Middleware stack (applied in reverse order):
/// 1. Request ID tracking
/// 2. Request logging
/// 3. Timeout handling
/// 4. Compression
/// 5. CORS
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let timeout_secs = state.config.timeout_secs;

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/permits", get(permits::list_permits))
        .route("/permits/{id}", get(permits::get_permit))
        .route("/permits/{id}/pdf", get(permits::permit_pdf))
        .route("/permits/{id}/qr", get(permits::permit_qr))
        .route("/permits/{id}/verify", get(permits::verify_permit))
        .route("/permits/{id}/verify-document", get(permits::verify_document))
        .route("/validate", post(generate::validate_permit))
        .route("/generate-pdf", post(generate::generate_pdf))
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(timeout_secs),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(request_id))
        .layer(from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the permit office HTTP server
///
/// Initializes structured logging, builds the shared state and router,
/// binds the configured TCP address and serves until SIGTERM or Ctrl+C.
pub async fn start_server(config: ServiceConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .json()
        .init();

    let addr: SocketAddr = config.socket_addr()?;
    tracing::info!(
        "Starting permit office on {} ({} upstream sources, cache TTL {}s)",
        addr,
        config.source_endpoints().len(),
        config.cache_ttl_secs
    );
    tracing::info!(
        "Timeout: {}s, CORS: {}, assets: {}",
        config.timeout_secs,
        config.enable_cors,
        config.assets_dir
    );

    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
