//! # Configuration
//!
//! Layered service configuration.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml`, if present
//! 3. Environment variables prefixed `PROFILE_AGGREGATOR__`, with `__`
//!    between nested keys (`PROFILE_AGGREGATOR__UPSTREAM__TIMEOUT_MS=2000`)
//!
//! The binary loads a `.env` file into the process environment first.

use crate::infrastructure::sources::SourceError;
use config::{Config, ConfigBuilder, Environment, File, Map};
use config::builder::DefaultState;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PROFILE_AGGREGATOR";

/// Default `EnvFilter` directive when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,profile_aggregator=debug";

/// Error raised while loading configuration or wiring from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// An upstream URL is malformed.
    #[error("invalid URL for {key}: {message}")]
    InvalidUrl {
        /// Configuration key.
        key: &'static str,
        /// Parse error.
        message: String,
    },

    /// The outbound HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] SourceError),
}

/// Inbound server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl ServerConfig {
    /// Returns `host:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upstream service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the user service.
    pub user_service_url: String,
    /// Base URL of the order service.
    pub order_service_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    /// Parses the user service base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL is malformed.
    pub fn user_service_url(&self) -> Result<Url, ConfigError> {
        parse_url("upstream.user_service_url", &self.user_service_url)
    }

    /// Parses the order service base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL is malformed.
    pub fn order_service_url(&self) -> Result<Url, ConfigError> {
        parse_url("upstream.order_service_url", &self.order_service_url)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Inbound server.
    pub server: ServerConfig,
    /// Upstream services.
    pub upstream: UpstreamConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from defaults, `config/default.toml` and the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a URL does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            defaults()?
                .add_source(File::with_name("config/default").required(false))
                .add_source(environment()),
        )
    }

    /// Loads configuration from defaults and the given environment map only.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is malformed or a URL does not parse.
    pub fn from_env_map(vars: Map<String, String>) -> Result<Self, ConfigError> {
        Self::from_builder(defaults()?.add_source(environment().source(Some(vars))))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.upstream.user_service_url()?;
        config.upstream.order_service_url()?;
        Ok(config)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000_i64)?
        .set_default("upstream.user_service_url", "http://localhost:4000")?
        .set_default("upstream.order_service_url", "http://localhost:4000")?
        .set_default("upstream.timeout_ms", 5000_i64)?
        .set_default("logging.json", false)?
        .set_default("logging.filter", DEFAULT_LOG_FILTER)?)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        key,
        message: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            key,
            message: format!("{} cannot carry a path", raw),
        });
    }
    Ok(url)
}
