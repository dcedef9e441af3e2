//! Video-info sources
//!
//! The HTTP layer never talks to an extraction backend directly. It goes
//! through [`VideoInfoSource`], which keeps the endpoint testable with stub
//! sources and lets the yt-dlp adapter be swapped out.
//!
//! - `models`: the video-info data model
//! - `validate`: host-specific URL validation (no I/O)
//! - `select`: combined-format filtering and selection
//! - `ytdlp`: a source backed by the `yt-dlp` binary

pub mod models;
pub mod select;
pub mod validate;
pub mod ytdlp;

pub use models::{VideoDetails, VideoFormat, VideoInfo};
pub use select::{choose_combined_format, FormatFilter};
pub use ytdlp::YtDlpSource;

use async_trait::async_trait;

/// Failures reported by a video-info source.
///
/// Sources that can tell why a lookup failed should use the typed variants.
/// Everything else ends up in `Failed` with the backend's message text.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("video unavailable: {0}")]
    Unavailable(String),

    #[error("private video: {0}")]
    Private(String),

    #[error("source timed out: {0}")]
    TimedOut(String),

    #[error("{0}")]
    Failed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse source output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Core trait for video-info sources
#[async_trait]
pub trait VideoInfoSource: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    /// Cheap syntactic check of the URL. Must not perform I/O.
    fn validate_url(&self, url: &str) -> bool;

    /// Resolve the URL into formats and metadata.
    ///
    /// Dropping the returned future is the only cancellation signal a
    /// source receives.
    async fn get_info(&self, url: &str) -> Result<VideoInfo, SourceError>;
}
