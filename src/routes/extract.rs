use crate::classify::classify_source_error;
use crate::error::{ServerError, ServerResult};
use crate::extractor::choose_combined_format;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

pub const MISSING_URL: &str = "videoUrl is required";
pub const INVALID_URL: &str = "invalid video URL";
pub const INVALID_BODY: &str = "request body must be a JSON object";
pub const NO_COMBINED_FORMAT: &str = "no combined audio/video format found";
pub const UNKNOWN_QUALITY: &str = "unknown";

/// Request to resolve a video page into a stream URL
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    #[serde(default)]
    pub video_url: Option<String>,

    /// Accepted but not used
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Resolved stream plus basic metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub stream_url: String,
    pub title: String,
    pub duration: String,
    pub quality: String,
}

/// Resolve a video URL into a direct combined audio/video stream.
///
/// # Flow
/// 1. Reject a missing or empty `videoUrl` (400)
/// 2. Reject URLs the source does not recognise (400)
/// 3. Ask the source for video info within the extraction budget (504 on expiry)
/// 4. Pick the best combined format (404 if there is none)
/// 5. Classify any source failure (403 / 404 / 504 / 500)
///
/// # Example
/// ```json
/// // Request
/// { "videoUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ" }
///
/// // Response
/// {
///   "streamUrl": "https://...googlevideo.com/videoplayback?...",
///   "title": "Demo",
///   "duration": "212",
///   "quality": "720p"
/// }
/// ```
pub async fn extract_link(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> ServerResult<Json<ExtractResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        match rejection {
            JsonRejection::BytesRejection(ref inner)
                if inner.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                ServerError::PayloadTooLarge(state.config.max_body_size_kb)
            }
            _ => ServerError::InvalidInput(INVALID_BODY.to_string()),
        }
    })?;

    let video_url = request
        .video_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ServerError::InvalidInput(MISSING_URL.to_string()))?;

    if !state.source.validate_url(video_url) {
        tracing::info!(url = %video_url, "Rejected unsupported video URL");
        return Err(ServerError::InvalidInput(INVALID_URL.to_string()));
    }

    let budget = state.config.extract_timeout();
    let started = Instant::now();

    let info = match tokio::time::timeout(budget, state.source.get_info(video_url)).await {
        Err(_) => {
            tracing::warn!(
                url = %video_url,
                source = state.source.name(),
                budget_ms = budget.as_millis() as u64,
                "Video info lookup timed out"
            );
            return Err(ServerError::Timeout);
        }
        Ok(Err(err)) => {
            let classified = classify_source_error(&err, state.config.expose_error_details());
            if matches!(classified, ServerError::Internal { .. }) {
                tracing::error!(url = %video_url, error = %err, "Video info lookup failed");
            } else {
                tracing::warn!(
                    url = %video_url,
                    error = %err,
                    status = %classified.status_code(),
                    "Video info lookup failed"
                );
            }
            return Err(classified);
        }
        Ok(Ok(info)) => info,
    };

    tracing::info!(
        url = %video_url,
        formats = info.formats.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Fetched video info"
    );

    let format = choose_combined_format(&info.formats, &state.format_filter())
        .ok_or_else(|| ServerError::NotFound(NO_COMBINED_FORMAT.to_string()))?;

    let stream_url = format
        .resolved_url()
        .ok_or_else(|| ServerError::NotFound(NO_COMBINED_FORMAT.to_string()))?;

    tracing::info!(
        url = %video_url,
        format_id = %format.format_id,
        quality = format.quality_label.as_deref().unwrap_or(UNKNOWN_QUALITY),
        "Selected combined format"
    );

    Ok(Json(ExtractResponse {
        stream_url: stream_url.to_string(),
        title: info.details.title.clone(),
        duration: info.details.length_seconds.clone(),
        quality: format
            .quality_label
            .clone()
            .unwrap_or_else(|| UNKNOWN_QUALITY.to_string()),
    }))
}
