//! Environment-sourced configuration

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT, DEFAULT_TIKWM_API_URL,
};

/// Presence of this variable means the platform injects the environment,
/// so no local `.env` file is read.
const PLATFORM_ENV_MARKER: &str = "RAILWAY_ENVIRONMENT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
    pub video_api: VideoApiConfig,
    /// Source for `GET /fetch`; the importer is disabled when unset
    pub import_list_url: Option<String>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct VideoApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Load `.env` unless running on the hosting platform. A missing file is fine.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if std::env::var_os(PLATFORM_ENV_MARKER).is_some() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let ssl_mode = match get("DB_SSLMODE") {
            Some(raw) => PgSslMode::from_str(&raw).map_err(|_| ConfigError::Invalid {
                key: "DB_SSLMODE",
                value: raw,
            })?,
            None => PgSslMode::Prefer,
        };

        let log_format = match get("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Config {
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            database: DatabaseConfig {
                url: get("DATABASE_URL"),
                user: get("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                password: get("DB_PASSWORD").unwrap_or_default(),
                host: get("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or("DB_PORT", get("DB_PORT"), 5432)?,
                name: get("DB_NAME").unwrap_or_else(|| "vidroll".to_string()),
                ssl_mode,
                max_connections: parse_or(
                    "DB_MAX_CONNECTIONS",
                    get("DB_MAX_CONNECTIONS"),
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            },
            video_api: VideoApiConfig {
                base_url: get("TIKWM_API_URL")
                    .unwrap_or_else(|| DEFAULT_TIKWM_API_URL.to_string()),
                timeout: Duration::from_secs(parse_timeout(get("HTTP_TIMEOUT_SECS"))?),
            },
            import_list_url: get("IMPORT_LIST_URL"),
            log_format,
        })
    }
}

impl DatabaseConfig {
    /// `DATABASE_URL` wins over the individual `DB_*` parts.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(ConfigError::DatabaseUrl);
        }

        let mut options = PgConnectOptions::new_without_pgpass()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name)
            .ssl_mode(self.ssl_mode);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }

        Ok(options)
    }
}

/// Outbound timeout in seconds; zero would fail every request immediately
fn parse_timeout(raw: Option<String>) -> Result<u64, ConfigError> {
    match parse_or("HTTP_TIMEOUT_SECS", raw.clone(), DEFAULT_HTTP_TIMEOUT_SECS)? {
        0 => Err(ConfigError::Invalid {
            key: "HTTP_TIMEOUT_SECS",
            value: raw.unwrap_or_default(),
        }),
        secs => Ok(secs),
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
