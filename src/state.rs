use crate::config::ServerConfig;
use crate::extractor::{FormatFilter, VideoInfoSource, YtDlpSource};
use std::sync::Arc;

/// Shared application state
///
/// Read-only after construction; handlers never mutate it.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Video-info source (shared across requests)
    pub source: Arc<dyn VideoInfoSource>,
}

impl ServerState {
    /// Create state backed by the yt-dlp source named in the config
    pub fn new(config: ServerConfig) -> Self {
        let source = Arc::new(YtDlpSource::new(config.ytdlp_path.clone()));
        Self::with_source(config, source)
    }

    /// Create state with an explicit source (used by tests and embedders)
    pub fn with_source(config: ServerConfig, source: Arc<dyn VideoInfoSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }

    pub fn format_filter(&self) -> FormatFilter {
        FormatFilter::with_container(self.config.preferred_container.clone())
    }
}
