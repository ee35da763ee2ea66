use axum::http::HeaderValue;
use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub cors: CorsConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "BOARD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "BOARD_PORT", default_value_t = 4000)]
    pub port: u16,

    /// Maximum accepted request body size in bytes (Default: 10MB)
    #[arg(long, env = "BOARD_MAX_BODY_BYTES", default_value_t = 10_485_760)]
    pub max_body_bytes: usize,

    /// Upper bound on how long closing the storage connection may take during shutdown
    #[arg(long, env = "BOARD_SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Volatile store kept in process memory, for local runs without a database
    Memory,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Which storage backend holds the messages
    #[arg(long = "storage", env = "BOARD_STORAGE", value_enum, default_value_t = StorageBackend::Postgres)]
    pub backend: StorageBackend,

    /// Database connection URL
    #[arg(long = "database-url", env = "BOARD_DATABASE_URL", default_value = "postgres://localhost:5432")]
    pub url: String,

    /// Database name; takes precedence over any name in the URL
    #[arg(long = "database-name", env = "BOARD_DATABASE_NAME", default_value = "messagesboard")]
    pub name: String,

    /// Maximum number of pooled connections
    #[arg(long = "db-max-connections", env = "BOARD_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection before failing
    #[arg(long = "db-acquire-timeout-secs", env = "BOARD_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct CorsConfig {
    /// Comma-separated list of origins allowed to make browser requests
    #[arg(long = "cors-origins", env = "BOARD_CORS_ORIGINS", default_value = "http://localhost:5173", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "BOARD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OpenTelemetry collector endpoint (OTLP/HTTP); export is disabled when unset
    #[arg(long, env = "BOARD_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one allowed origin must be configured")]
    NoOrigins,
    #[error("wildcard origin '*' cannot be combined with credentialed requests")]
    WildcardOrigin,
    #[error("invalid origin '{0}'")]
    InvalidOrigin(String),
    #[error("max body size must be greater than zero")]
    ZeroBodyLimit,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }

    /// Checks settings that clap cannot express on its own.
    ///
    /// # Errors
    /// Returns `ConfigError` describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }
        self.cors.origin_header_values()?;
        Ok(())
    }
}

impl CorsConfig {
    /// Parses the allow-list into header values, skipping blank entries.
    ///
    /// # Errors
    /// Returns `ConfigError` if the list is empty, contains `*`, or holds an unparsable origin.
    pub fn origin_header_values(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(|o| {
                if o == "*" {
                    return Err(ConfigError::WildcardOrigin);
                }
                HeaderValue::from_str(o.trim_end_matches('/')).map_err(|_| ConfigError::InvalidOrigin(o.to_string()))
            })
            .collect::<Result<_, _>>()?;

        if origins.is_empty() {
            return Err(ConfigError::NoOrigins);
        }
        Ok(origins)
    }
}
