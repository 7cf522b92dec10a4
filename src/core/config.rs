use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Store file location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Client configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the API listens on
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

/// Store file configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the store file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name of the store file inside `data_dir`
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

/// Client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base address of the catalog API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values for optional configuration
fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_file_name() -> String {
    "media_data.json".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl LoggingConfig {
    /// Parsed log level, falling back to `Info` for unknown names
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = toml::from_str(&config_text)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Load configuration from a file, or use defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file at {:?}, using defaults", path.as_ref());
            Ok(Self::default())
        }
    }
}
