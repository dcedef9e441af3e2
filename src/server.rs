//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all endpoints
//! - Middleware stack (request IDs, logging, timeouts, CORS, panic capture)
//! - Graceful shutdown handling
//!
//! Process lifecycle lives here. Handlers never exit the process; a panic in
//! a handler becomes a 500 response.

use crate::config::ServerConfig;
use crate::middleware::{log_requests, request_id, request_timeout};
use crate::routes::{extract, health, not_found};
use crate::state::ServerState;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, Response, StatusCode};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Build the Axum router with all routes and middleware
///
/// Middleware stack, outermost first:
/// 1. HTTP tracing
/// 2. Request ID tracking
/// 3. Request logging
/// 4. CORS
/// 5. Compression
/// 6. Whole-request timeout
/// 7. Panic capture
pub fn build_router(state: Arc<ServerState>) -> Router {
    // CORS layer
    let cors_layer = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods(cors::Any)
            .allow_headers(cors::Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(health::root_status).fallback(not_found))
        .route("/health", get(health::health_check).fallback(not_found))
        .route(
            "/extract-link",
            post(extract::extract_link).fallback(not_found),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn_with_state(state.clone(), request_timeout))
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render an escaped panic as the generic 500 body
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");

    let body = serde_json::json!({ "error": "internal server error" }).to_string();
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}

/// Start the extract-link HTTP server
///
/// Initializes logging, builds the yt-dlp backed state, binds the configured
/// address and serves until SIGTERM or Ctrl+C.
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    health::mark_started();

    if config.extract_timeout_secs >= config.timeout_secs {
        tracing::warn!(
            extract_timeout_secs = config.extract_timeout_secs,
            timeout_secs = config.timeout_secs,
            effective_ms = config.extract_timeout().as_millis() as u64,
            "Extraction budget is not shorter than the request timeout; clamping it"
        );
    }

    let state = Arc::new(ServerState::new(config.clone()));
    let app = build_router(state);

    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        "Starting extract-link server on {} ({:?} mode)",
        addr,
        config.environment
    );
    tracing::info!(
        "Extraction budget: {}ms, request timeout: {}s, max body: {}KB",
        config.extract_timeout().as_millis(),
        config.timeout_secs,
        config.max_body_size_kb
    );
    tracing::info!(
        "Source: {}, preferred container: {}, CORS: {}",
        config.ytdlp_path,
        config.preferred_container.as_deref().unwrap_or("any"),
        config.enable_cors
    );

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
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
