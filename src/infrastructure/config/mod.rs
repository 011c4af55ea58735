use crate::domain::video::{PollSettings, DEFAULT_VOICE_ID};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_TALKS_API_BASE_URL: &str = "https://api.d-id.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Talks API
    pub bearer_token: String,
    pub talks_api_base_url: String,
    pub default_voice_id: String,
    pub poll_max_attempts: u32,
    pub poll_interval_secs: u64,
    // Catalog cache
    pub catalog_cache_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str, default: &str| {
            lookup(name).unwrap_or_else(|| default.to_string())
        };

        let bearer_token = lookup("BEARER_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::Missing("BEARER_TOKEN"))?;

        let poll_max_attempts = parse("POLL_MAX_ATTEMPTS", var("POLL_MAX_ATTEMPTS", "30"))?;
        if poll_max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "POLL_MAX_ATTEMPTS",
                value: "0".to_string(),
            });
        }

        let config = Config {
            host: var("HOST", "0.0.0.0"),
            port: parse("PORT", var("PORT", "8080"))?,
            environment: match var("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            bearer_token,
            talks_api_base_url: var("TALKS_API_BASE_URL", DEFAULT_TALKS_API_BASE_URL),
            default_voice_id: var("DEFAULT_VOICE_ID", DEFAULT_VOICE_ID),
            poll_max_attempts,
            poll_interval_secs: parse("POLL_INTERVAL_SECS", var("POLL_INTERVAL_SECS", "10"))?,
            catalog_cache_enabled: var("CATALOG_CACHE_ENABLED", "false").to_lowercase() == "true",
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            max_attempts: self.poll_max_attempts,
            interval: Duration::from_secs(self.poll_interval_secs),
        }
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("log_format", &self.log_format)
            .field("bearer_token", &"<redacted>")
            .field("talks_api_base_url", &self.talks_api_base_url)
            .field("default_voice_id", &self.default_voice_id)
            .field("poll_max_attempts", &self.poll_max_attempts)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("catalog_cache_enabled", &self.catalog_cache_enabled)
            .finish()
    }
}
