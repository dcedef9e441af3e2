//! Shared helpers for HTTP integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use server::extractor::{VideoDetails, VideoFormat, VideoInfo};
use server::{build_router, ServerConfig, ServerState, SourceError, VideoInfoSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// What the stub does when asked for video info
#[derive(Clone)]
pub enum StubBehavior {
    Resolve(VideoInfo),
    ResolveAfter(Duration, VideoInfo),
    Fail(fn() -> SourceError),
    Panic,
}

/// Deterministic source that counts its invocations
pub struct StubSource {
    behavior: StubBehavior,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoInfoSource for StubSource {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn validate_url(&self, url: &str) -> bool {
        server::extractor::validate::is_valid_video_url(url)
    }

    async fn get_info(&self, _url: &str) -> Result<VideoInfo, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            StubBehavior::Resolve(info) => Ok(info.clone()),
            StubBehavior::ResolveAfter(delay, info) => {
                tokio::time::sleep(*delay).await;
                Ok(info.clone())
            }
            StubBehavior::Fail(make) => Err(make()),
            StubBehavior::Panic => panic!("stub source exploded"),
        }
    }
}

pub const VALID_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

pub fn format(
    id: &str,
    has_video: bool,
    has_audio: bool,
    url: Option<&str>,
    quality: Option<&str>,
) -> VideoFormat {
    VideoFormat {
        format_id: id.to_string(),
        has_video,
        has_audio,
        url: url.map(str::to_string),
        quality_label: quality.map(str::to_string),
        container: Some("mp4".to_string()),
    }
}

pub fn demo_info(formats: Vec<VideoFormat>) -> VideoInfo {
    VideoInfo {
        formats,
        details: VideoDetails {
            title: "Demo".to_string(),
            length_seconds: "42".to_string(),
        },
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        extract_timeout_secs: 1,
        timeout_secs: 10,
        ..Default::default()
    }
}

pub fn app(config: ServerConfig, source: Arc<StubSource>) -> Router {
    build_router(Arc::new(ServerState::with_source(config, source)))
}

pub async fn post_json(app: Router, path: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, path: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
