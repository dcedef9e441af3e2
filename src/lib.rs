//! Extract Link Server - resolve a video page into a direct stream URL
//!
//! This crate provides a small HTTP service that takes a video page URL,
//! asks a video-info source (yt-dlp by default) for its formats, and returns
//! the best combined audio/video stream together with basic metadata.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - Service status and version
//! - `GET /health` - Liveness probe
//! - `POST /extract-link` - Resolve `{ "videoUrl": ... }` into a stream URL
//!
//! Errors are returned as `{ "error": ..., "details"?: ... }`; `details` is
//! only present outside production mode.

pub mod classify;
pub mod config;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use extractor::{SourceError, VideoInfoSource};
pub use server::{build_router, start_server};
pub use state::ServerState;
