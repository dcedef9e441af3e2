//! Data structures returned by a video-info source

use serde::{Deserialize, Serialize};

/// Everything a source reports about one video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Available renditions, best quality first.
    pub formats: Vec<VideoFormat>,
    pub details: VideoDetails,
}

/// Descriptive metadata about a video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    /// Whole seconds, kept as the numeric string the source reported.
    pub length_seconds: String,
}

/// One downloadable rendition of a video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoFormat {
    pub format_id: String,
    pub has_video: bool,
    pub has_audio: bool,
    /// Resolved direct URL, if the source could produce one.
    #[serde(default)]
    pub url: Option<String>,
    /// Human label such as "720p"
    #[serde(default)]
    pub quality_label: Option<String>,
    /// Container / extension (mp4, webm, ...)
    #[serde(default)]
    pub container: Option<String>,
}

impl VideoFormat {
    /// Resolved URL, ignoring empty strings.
    pub fn resolved_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Audio and video in a single stream with a usable URL.
    pub fn is_combined(&self) -> bool {
        self.has_video && self.has_audio && self.resolved_url().is_some()
    }
}
