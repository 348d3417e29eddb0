use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use client::HttpConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// File holding the bearer token.
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_token_file() -> PathBuf {
    PathBuf::from(".fleet-admin/token")
}

fn default_page_size() -> usize {
    shared::pagination::DEFAULT_PAGE_SIZE
}

fn default_search_debounce_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional)
    /// 3. Environment variables with FA__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("FA").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds entirely from embedded defaults and overrides, without config
    /// files or environment.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [backend]
            base_url = "http://localhost:8080/api"
            request_timeout_secs = 30

            [session]
            token_file = ".fleet-admin/token"

            [listing]
            page_size = 5
            search_debounce_ms = 500

            [logging]
            level = "warn"
            format = "pretty"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Validation is left to the caller so tests can inspect bad configs.
        Ok(cfg)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "FA__BACKEND__BASE_URL environment variable must be set".to_string(),
            ));
        }

        if self.listing.page_size == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Page size cannot be 0".to_string(),
            ));
        }

        if self.backend.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Request timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.backend.base_url.clone(),
            request_timeout_secs: self.backend.request_timeout_secs,
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.listing.search_debounce_ms)
    }
}
