// Configuration module entry point
// Loads the immutable server configuration and builds the shared request state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    Config, CorsConfig, HealthConfig, LoggingConfig, MediaConfig, PerformanceConfig, ServerConfig,
};

/// Environment variable prefix, e.g. `MEDIA_SERVER__PORT=3001`
const ENV_PREFIX: &str = "MEDIA";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources in increasing priority: built-in defaults, the config file
    /// (optional), `MEDIA_*` environment variables, then the conventional
    /// `PORT` and `MEDIA_DIR` overrides.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let builder = with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("media.video_extensions")
                    .with_list_parse_key("cors.allowed_methods"),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("media.root", std::env::var("MEDIA_DIR").ok())?;

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse configuration from TOML text layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let cfg: Self = with_defaults(config::Config::builder())?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.workers == Some(0) {
            return Err(config::ConfigError::Message(
                "server.workers must be greater than zero when set".to_string(),
            ));
        }
        if self.media.chunk_size == 0 {
            return Err(config::ConfigError::Message(
                "media.chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.media.video_extensions.is_empty() {
            return Err(config::ConfigError::Message(
                "media.video_extensions must list at least one extension".to_string(),
            ));
        }
        if self.cors.allowed_origin.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "cors.allowed_origin must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    let defaults = Config::default();
    builder
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("media.root", defaults.media.root)?
        .set_default("media.posters_dir", defaults.media.posters_dir)?
        .set_default("media.backgrounds_dir", defaults.media.backgrounds_dir)?
        .set_default("media.video_extensions", defaults.media.video_extensions)?
        .set_default(
            "media.chunk_size",
            i64::try_from(defaults.media.chunk_size).unwrap_or(i64::MAX),
        )?
        .set_default("cors.allowed_origin", defaults.cors.allowed_origin)?
        .set_default("cors.allowed_methods", defaults.cors.allowed_methods)?
        .set_default("cors.allow_credentials", defaults.cors.allow_credentials)?
        .set_default("logging.level", defaults.logging.level)?
        .set_default("logging.access_log", defaults.logging.access_log)?
        .set_default("logging.access_log_format", defaults.logging.access_log_format)?
        .set_default("performance.keep_alive", defaults.performance.keep_alive)?
        .set_default(
            "performance.header_read_timeout",
            i64::try_from(defaults.performance.header_read_timeout).unwrap_or(i64::MAX),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3001);
        assert_eq!(cfg.media.video_extensions, vec!["mp4", "mkv", "avi"]);
        assert_eq!(cfg.media.chunk_size, 65_536);
        assert_eq!(cfg.cors.allowed_origin, "http://localhost:8080");
        assert_eq!(cfg.cors.allowed_methods, vec!["GET", "POST"]);
        assert!(cfg.cors.allow_credentials);
        assert!(cfg.health.enabled);
        assert_eq!(cfg.health.path, "/healthz");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.header_read_timeout, 30);
        assert_eq!(cfg.performance.shutdown_timeout, 10);
        assert_eq!(cfg.performance.max_connections, None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [server]
            port = 9000

            [media]
            root = "/srv/movies"
            video_extensions = ["mp4", "webm"]

            [cors]
            allowed_origin = "https://watch.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.media.root, "/srv/movies");
        assert_eq!(cfg.media.video_extensions, vec!["mp4", "webm"]);
        assert_eq!(cfg.media.posters_dir, "./posters");
        assert_eq!(cfg.cors.allowed_origin, "https://watch.example.com");
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let result = Config::from_toml_str("[media]\nchunk_size = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let result = Config::from_toml_str("[server]\nworkers = 0\n");
        assert!(result.is_err());

        let cfg = Config::from_toml_str("[server]\nworkers = 2\n").unwrap();
        assert_eq!(cfg.server.workers, Some(2));
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:3001".parse::<SocketAddr>().unwrap()
        );
    }
}
