//! Application configuration module
//!
//! Configuration is assembled from three layers, lowest precedence first:
//! built-in defaults, an optional TOML file, then environment variables.
//! The result is an explicit [`AppConfig`] value that is handed to the
//! components needing it; nothing reads the environment after startup.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default token lifetime in seconds (100 hours)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 360_000;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5001;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Default GitHub REST endpoint
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default timeout for outbound GitHub requests
pub const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 10;

/// Environment variable naming an optional TOML config file
pub const CONFIG_FILE_ENV: &str = "DEVCONNECT_CONFIG";

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Symmetric key used to sign session tokens
    pub jwt_secret: String,
    /// Lifetime of issued session tokens
    pub token_ttl: Duration,
    /// Port the HTTP server binds to
    pub port: u16,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// Base URL of the GitHub REST API
    pub github_api_url: String,
    /// Optional GitHub token to lift anonymous rate limits
    pub github_token: Option<String>,
    /// Timeout applied to each GitHub request
    pub github_timeout: Duration,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from an optional TOML file and the environment
    ///
    /// The file named by `DEVCONNECT_CONFIG` is read first if set; any
    /// environment variable that is present overrides the file value.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => AppConfigBuilder::from_file(path)?,
            Err(_) => AppConfigBuilder::default(),
        };
        builder = builder.merge_env()?;
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                message: format!(
                    "must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}, got {}",
                    self.bcrypt_cost
                ),
            });
        }
        if !self.github_api_url.starts_with("http://") && !self.github_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.github_api_url.clone()));
        }
        Ok(())
    }
}

/// On-disk representation; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    jwt_secret: Option<String>,
    token_ttl_secs: Option<u64>,
    port: Option<u16>,
    database_url: Option<String>,
    bcrypt_cost: Option<u32>,
    github_api_url: Option<String>,
    github_token: Option<String>,
    github_timeout_secs: Option<u64>,
}

/// Builder for AppConfig
#[derive(Debug, Default, Clone)]
pub struct AppConfigBuilder {
    jwt_secret: Option<String>,
    token_ttl: Option<Duration>,
    port: Option<u16>,
    database_url: Option<String>,
    bcrypt_cost: Option<u32>,
    github_api_url: Option<String>,
    github_token: Option<String>,
    github_timeout: Option<Duration>,
}

impl AppConfigBuilder {
    /// Parse a TOML document into a builder
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents)?;
        Ok(Self {
            jwt_secret: file.jwt_secret,
            token_ttl: file.token_ttl_secs.map(Duration::from_secs),
            port: file.port,
            database_url: file.database_url,
            bcrypt_cost: file.bcrypt_cost,
            github_api_url: file.github_api_url,
            github_token: file.github_token,
            github_timeout: file.github_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Override values with any environment variables that are set
    pub fn merge_env(mut self) -> Result<Self, ConfigError> {
        if let Some(secret) = env_var("JWT_SECRET") {
            self.jwt_secret = Some(secret);
        }
        if let Some(ttl) = env_parse::<u64>("TOKEN_TTL_SECS")? {
            self.token_ttl = Some(Duration::from_secs(ttl));
        }
        if let Some(port) = env_parse::<u16>("SERVER_PORT")? {
            self.port = Some(port);
        }
        if let Some(url) = env_var("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(cost) = env_parse::<u32>("BCRYPT_COST")? {
            self.bcrypt_cost = Some(cost);
        }
        if let Some(url) = env_var("GITHUB_API_URL") {
            self.github_api_url = Some(url);
        }
        if let Some(token) = env_var("GITHUB_TOKEN") {
            self.github_token = Some(token);
        }
        if let Some(secs) = env_parse::<u64>("GITHUB_TIMEOUT_SECS")? {
            self.github_timeout = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = Some(url.into());
        self
    }

    pub fn github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }

    pub fn github_timeout(mut self, timeout: Duration) -> Self {
        self.github_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            token_ttl: self
                .token_ttl
                .unwrap_or(Duration::from_secs(DEFAULT_TOKEN_TTL_SECS)),
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url.filter(|url| !url.trim().is_empty()),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            github_api_url: self
                .github_api_url
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            github_token: self.github_token.filter(|t| !t.trim().is_empty()),
            github_timeout: self
                .github_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_GITHUB_TIMEOUT_SECS)),
        };
        config.validate()?;
        Ok(config)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env_var(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key,
                message: format!("{raw:?}: {e}"),
            }),
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
