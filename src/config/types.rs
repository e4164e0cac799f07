// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub media: MediaConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Media directories and streaming parameters
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// Directory holding the streamable video files
    pub root: String,
    /// Poster image mirror
    pub posters_dir: String,
    /// Background image mirror
    pub backgrounds_dir: String,
    /// Extensions listed by `/api/videos`, without the dot
    pub video_extensions: Vec<String>,
    /// Read size used while streaming a file body
    pub chunk_size: usize,
}

/// Cross-origin policy: one permitted origin
#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
    pub allowed_methods: Vec<String>,
    pub allow_credentials: bool,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u32,
}

#[allow(clippy::missing_const_for_fn)]
fn default_cors_max_age() -> u32 {
    86_400
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds allowed for a client to send its request headers
    pub header_read_timeout: u64,
    pub max_connections: Option<u64>,
    /// Seconds open connections may keep running after a shutdown signal
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

#[allow(clippy::missing_const_for_fn)]
fn default_shutdown_timeout() -> u64 {
    10
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_health_path")]
    pub path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_path() -> String {
    "/healthz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            path: default_health_path(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: "./media".to_string(),
            posters_dir: "./posters".to_string(),
            backgrounds_dir: "./backgrounds".to_string(),
            video_extensions: vec!["mp4".to_string(), "mkv".to_string(), "avi".to_string()],
            chunk_size: 64 * 1024,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:8080".to_string(),
            allowed_methods: vec!["GET".to_string(), "POST".to_string()],
            allow_credentials: true,
            max_age: default_cors_max_age(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive: true,
            header_read_timeout: 30,
            max_connections: None,
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3001,
                workers: None,
            },
            media: MediaConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
            performance: PerformanceConfig::default(),
            health: HealthConfig::default(),
        }
    }
}
