//! yt-dlp backed video-info source
//!
//! Runs `yt-dlp --dump-json` for a single URL and maps its JSON into
//! [`VideoInfo`]. The child is spawned with `kill_on_drop`, so when the
//! endpoint's timeout drops the lookup future the process is killed rather
//! than left running.

use super::models::{VideoDetails, VideoFormat, VideoInfo};
use super::validate::is_valid_video_url;
use super::{SourceError, VideoInfoSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error};

/// Video-info source that shells out to yt-dlp
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    ytdlp_path: PathBuf,
}

impl YtDlpSource {
    pub fn new(ytdlp_path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
        }
    }

    pub fn ytdlp_path(&self) -> &PathBuf {
        &self.ytdlp_path
    }
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

#[async_trait]
impl VideoInfoSource for YtDlpSource {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    fn validate_url(&self, url: &str) -> bool {
        is_valid_video_url(url)
    }

    async fn get_info(&self, url: &str) -> Result<VideoInfo, SourceError> {
        debug!(url = %url, binary = %self.ytdlp_path.display(), "Running yt-dlp");

        let output = Command::new(&self.ytdlp_path)
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-warnings")
            .arg("--no-playlist")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(status = %output.status, stderr = %stderr, "yt-dlp extraction failed");
            let message = if stderr.is_empty() {
                format!("yt-dlp exited with {}", output.status)
            } else {
                stderr
            };
            return Err(SourceError::Failed(message));
        }

        parse_dump_json(&output.stdout)
    }
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(default)]
    title: String,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    format_id: String,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    vcodec: Option<String>,
    #[serde(default)]
    acodec: Option<String>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    format_note: Option<String>,
}

fn has_codec(codec: &Option<String>) -> bool {
    codec
        .as_deref()
        .is_some_and(|c| !c.is_empty() && c != "none")
}

impl From<RawFormat> for VideoFormat {
    fn from(raw: RawFormat) -> Self {
        let quality_label = raw
            .height
            .map(|h| format!("{h}p"))
            .or_else(|| raw.format_note.clone().filter(|n| !n.is_empty()));

        VideoFormat {
            has_video: has_codec(&raw.vcodec),
            has_audio: has_codec(&raw.acodec),
            format_id: raw.format_id,
            url: raw.url,
            quality_label,
            container: raw.ext,
        }
    }
}

/// Map one `--dump-json` document into [`VideoInfo`].
///
/// yt-dlp lists formats worst first; the result is reversed so the best
/// rendition comes first.
pub fn parse_dump_json(stdout: &[u8]) -> Result<VideoInfo, SourceError> {
    let raw: RawInfo = serde_json::from_slice(stdout)?;

    let length_seconds = raw
        .duration
        .map(|d| (d.max(0.0).round() as u64).to_string())
        .unwrap_or_else(|| "0".to_string());

    Ok(VideoInfo {
        formats: raw.formats.into_iter().rev().map(VideoFormat::from).collect(),
        details: VideoDetails {
            title: raw.title,
            length_seconds,
        },
    })
}
