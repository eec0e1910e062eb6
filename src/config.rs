//! Environment-driven settings for the database connection and the HTTP listener.
//! Call `dotenvy::dotenv()` before loading so a local `.env` file is honored.

use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_DB_ENDPOINT: &str = "DB_ENDPOINT";
pub const ENV_DB_USERNAME: &str = "DB_USERNAME";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
/// Full connection string; when set it takes precedence over the four `DB_*` variables.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

pub const ENV_LISTEN_ADDR: &str = "LISTEN_ADDR";
pub const ENV_DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const ENV_BODY_LIMIT_BYTES: &str = "BODY_LIMIT_BYTES";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:80";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub connection_string: String,
}

impl DatabaseSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL).filter(|s| !s.trim().is_empty()) {
            return Ok(DatabaseSettings { connection_string: url });
        }
        let require = |key: &'static str| lookup(key).ok_or(ConfigError::MissingEnv(key));
        let endpoint = require(ENV_DB_ENDPOINT)?;
        let username = require(ENV_DB_USERNAME)?;
        let name = require(ENV_DB_NAME)?;
        let password = require(ENV_DB_PASSWORD)?;
        Ok(DatabaseSettings {
            connection_string: format!("postgres://{}:{}@{}/{}", username, password, endpoint, name),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerSettings {
    pub listen_addr: String,
    pub max_connections: u32,
    pub request_timeout: Duration,
    pub body_limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            body_limit: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerSettings::default();
        let max_connections = parse_or(&lookup, ENV_DB_MAX_CONNECTIONS, defaults.max_connections)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: ENV_DB_MAX_CONNECTIONS,
                message: "must be at least 1".into(),
            });
        }
        let timeout_secs = parse_or(&lookup, ENV_REQUEST_TIMEOUT_SECS, defaults.request_timeout.as_secs())?;
        Ok(ServerSettings {
            listen_addr: lookup(ENV_LISTEN_ADDR).unwrap_or(defaults.listen_addr),
            max_connections,
            request_timeout: Duration::from_secs(timeout_secs),
            body_limit: parse_or(&lookup, ENV_BODY_LIMIT_BYTES, defaults.body_limit)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
    }
}
