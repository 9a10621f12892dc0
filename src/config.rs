//! Process configuration, read once at startup

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_PORT, DEFAULT_UPSTREAM_TIMEOUT_SECS, KICK_BASE_URL, YOUTUBE_API_BASE_URL,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),

    #[error("UPSTREAM_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// `None` makes every YouTube call fail fast
    pub youtube_api_key: Option<String>,
    pub environment: String,
    pub youtube_base_url: String,
    pub kick_base_url: String,
    pub upstream_timeout: Duration,
    /// Exact origins allowed by CORS, in addition to any `http://localhost:<port>`
    pub cors_allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            youtube_api_key: None,
            environment: "development".to_string(),
            youtube_base_url: YOUTUBE_API_BASE_URL.to_string(),
            kick_base_url: KICK_BASE_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Config {
    /// Load `.env` files (if any) and read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // The frontend and backend share one .env at the project root.
        dotenvy::dotenv().ok();
        dotenvy::from_filename("../.env").ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => defaults.upstream_timeout,
        };

        let cors_allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.cors_allowed_origins,
        };

        Ok(Self {
            port,
            youtube_api_key: get("YOUTUBE_API_KEY"),
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            youtube_base_url: get("YOUTUBE_API_BASE_URL").unwrap_or(defaults.youtube_base_url),
            kick_base_url: get("KICK_BASE_URL").unwrap_or(defaults.kick_base_url),
            upstream_timeout,
            cors_allowed_origins,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}
