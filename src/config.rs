use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Gap kept between the lookup budget and the whole-request timeout so the
/// handler always answers before the outer guard fires.
const TIMEOUT_HEADROOM: Duration = Duration::from_millis(250);

/// Deployment mode. Controls whether raw failure text reaches clients.
///
/// `production`, `prod` (any case) and an empty value are production; every
/// other value (`development`, `staging`, `test`, ...) counts as development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment mode
    #[serde(default)]
    pub environment: Environment,

    /// Budget for a single collaborator lookup, in seconds
    #[serde(default = "default_extract_timeout_secs")]
    pub extract_timeout_secs: u64,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in KB
    #[serde(default = "default_max_body_size_kb")]
    pub max_body_size_kb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path or name of the yt-dlp binary
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,

    /// Only accept combined formats in this container (e.g. "mp4")
    #[serde(default)]
    pub preferred_container: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            environment: Environment::default(),
            extract_timeout_secs: default_extract_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            max_body_size_kb: default_max_body_size_kb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            ytdlp_path: default_ytdlp_path(),
            preferred_container: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from config file, prefixed environment variables,
    /// and the conventional `PORT` / `APP_ENV` variables (highest priority).
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with_overrides(std::env::var("PORT").ok(), std::env::var("APP_ENV").ok())
    }

    /// Same layering as [`ServerConfig::load`], with the `PORT` and `APP_ENV`
    /// values passed in explicitly.
    pub fn load_with_overrides(
        port: Option<String>,
        app_env: Option<String>,
    ) -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("EXTRACT_LINK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("port", port)?
            .set_override_option("environment", app_env)?;

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the collaborator budget as Duration
    ///
    /// Clamped below the whole-request timeout so a slow lookup always
    /// surfaces as the handler's own 504.
    pub fn extract_timeout(&self) -> Duration {
        let configured = Duration::from_secs(self.extract_timeout_secs);
        let ceiling = self.timeout().saturating_sub(TIMEOUT_HEADROOM);
        configured.min(ceiling)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb * 1024
    }

    pub fn expose_error_details(&self) -> bool {
        !self.environment.is_production()
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_extract_timeout_secs() -> u64 {
    25
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_kb() -> usize {
    64
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}
