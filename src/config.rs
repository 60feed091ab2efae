use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

use crate::error::{Result, SearchError};

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://apis.ccbp.in/wiki-search";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {e}"))
});

#[derive(Debug, Clone)]
pub struct Config {
    pub search_endpoint: String,
    pub bind_addr: String,
    /// Drop a response whose search was cleared while it was in flight.
    pub discard_superseded: bool,
    /// `None` means requests never time out.
    pub request_timeout: Option<Duration>,
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            discard_superseded: true,
            request_timeout: None,
            log_level: tracing::Level::INFO,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get_or_default = |key: &str, default: String| lookup(key).unwrap_or(default);

        let discard_superseded = match lookup("DISCARD_SUPERSEDED") {
            Some(value) => parse_bool("DISCARD_SUPERSEDED", value)?,
            None => defaults.discard_superseded,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| invalid("REQUEST_TIMEOUT_SECS", &value))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => defaults.request_timeout,
        };

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => value
                .trim()
                .parse::<tracing::Level>()
                .map_err(|_| invalid("LOG_LEVEL", &value))?,
            None => defaults.log_level,
        };

        Ok(Config {
            search_endpoint: get_or_default("SEARCH_ENDPOINT", defaults.search_endpoint),
            bind_addr: get_or_default("BIND_ADDR", defaults.bind_addr),
            discard_superseded,
            request_timeout,
            log_level,
        })
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SearchError::Config { key, value }),
    }
}

fn invalid(key: &'static str, value: &str) -> SearchError {
    SearchError::Config {
        key,
        value: value.to_string(),
    }
}
