use crate::data::database::DatabaseConfig;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://petconnect.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be a valid number, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub log_level: String,
    /// The `.env` file that was loaded, if any. Logged by the caller once a
    /// subscriber is installed.
    pub env_file: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from the process environment, after loading `.env`
    /// if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_file = dotenv::dotenv().ok();
        let mut settings = Self::from_lookup(|key| std::env::var(key).ok())?;
        settings.env_file = env_file;
        Ok(settings)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            ..Default::default()
        };

        Ok(Self {
            host: lookup("PETCONNECT_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PETCONNECT_PORT", DEFAULT_PORT)?,
            database,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            env_file: None,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}
