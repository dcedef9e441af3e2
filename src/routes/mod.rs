//! API route handlers
//!
//! - `health`: root status and liveness
//! - `extract`: video URL to stream URL resolution

pub mod extract;
pub mod health;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes and methods.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "route not found" })),
    )
}
