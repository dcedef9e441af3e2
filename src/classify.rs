//! Mapping of source failures onto API errors
//!
//! Typed [`SourceError`] variants are matched first. Untyped failures fall
//! back to case-insensitive substring matching on the message text, checked
//! in the order: unavailable, timeout, private.

use crate::error::ServerError;
use crate::extractor::SourceError;

pub const VIDEO_UNAVAILABLE: &str = "video not available";
pub const VIDEO_PRIVATE: &str = "video is private";
pub const EXTRACTION_FAILED: &str = "failed to extract stream link";

const UNAVAILABLE_MARKERS: &[&str] = &["unavailable", "not available"];
const TIMEOUT_MARKERS: &[&str] = &["timeout", "timed out"];
const PRIVATE_MARKERS: &[&str] = &["private"];

/// Classify a failed lookup. `expose_details` controls whether the raw
/// message is attached to internal errors.
pub fn classify_source_error(err: &SourceError, expose_details: bool) -> ServerError {
    match err {
        SourceError::Unavailable(_) => ServerError::NotFound(VIDEO_UNAVAILABLE.to_string()),
        SourceError::TimedOut(_) => ServerError::Timeout,
        SourceError::Private(_) => ServerError::Forbidden(VIDEO_PRIVATE.to_string()),
        SourceError::Failed(_) | SourceError::Io(_) | SourceError::Parse(_) => {
            classify_message(&err.to_string(), expose_details)
        }
    }
}

/// Substring fallback for free-text failure messages.
pub fn classify_message(message: &str, expose_details: bool) -> ServerError {
    let lower = message.to_lowercase();
    let contains_any = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

    if contains_any(UNAVAILABLE_MARKERS) {
        ServerError::NotFound(VIDEO_UNAVAILABLE.to_string())
    } else if contains_any(TIMEOUT_MARKERS) {
        ServerError::Timeout
    } else if contains_any(PRIVATE_MARKERS) {
        ServerError::Forbidden(VIDEO_PRIVATE.to_string())
    } else {
        ServerError::Internal {
            message: EXTRACTION_FAILED.to_string(),
            details: expose_details.then(|| message.to_string()),
        }
    }
}
