use std::path::PathBuf;
use std::str::FromStr;

use projects_core::country::DEFAULT_LOCALE;

/// An environment variable was set to a value that does not parse.
#[derive(Debug, thiserror::Error)]
#[error("{var} has invalid value {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. `DATABASE_URL`
/// is read separately by the binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4012`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on pooled database connections (default: `20`).
    pub db_max_connections: u32,
    /// Country reference dataset, re-read on every lookup.
    pub country_dataset_path: PathBuf,
    /// Locale used for listings and when a read names no language.
    pub default_locale: String,
    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default             |
    /// |------------------------|---------------------|
    /// | `HOST`                 | `0.0.0.0`           |
    /// | `PORT`                 | `4012`              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                |
    /// | `DB_MAX_CONNECTIONS`   | `20`                |
    /// | `COUNTRY_DATASET_PATH` | `json/country.json` |
    /// | `DEFAULT_LOCALE`       | `vi`                |
    /// | `LOG_FORMAT`           | `text` (or `json`)  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 4012)?,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30)?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 20)?,
            country_dataset_path: env_or("COUNTRY_DATASET_PATH", "json/country.json").into(),
            default_locale: env_or("DEFAULT_LOCALE", DEFAULT_LOCALE),
            json_logs: env_or("LOG_FORMAT", "text").eq_ignore_ascii_case("json"),
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|_| ConfigError { var, value })
        }
        _ => Ok(default),
    }
}
