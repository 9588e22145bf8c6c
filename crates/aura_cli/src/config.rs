use std::time::Duration;

use aura_engine::{ClientSettings, SearchEndpoint, SearchSettings, DEFAULT_API_URL};
use aura_logging::LogDestination;
use log::LevelFilter;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Front-end configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub debounce: Duration,
    pub search_endpoint: SearchEndpoint,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let debounce = match get("AURA_SEARCH_DEBOUNCE_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid {
                    key: "AURA_SEARCH_DEBOUNCE_MS",
                    expected: "a number of milliseconds",
                    value: raw.clone(),
                }
            })?),
            None => SearchSettings::default().quiescence,
        };

        let search_endpoint = match get("AURA_SEARCH_ENDPOINT").as_deref().map(str::trim) {
            None | Some("rank") => SearchEndpoint::Rank,
            Some("semantic" | "search") => SearchEndpoint::Semantic,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "AURA_SEARCH_ENDPOINT",
                    expected: "`rank` or `semantic`",
                    value: other.to_string(),
                })
            }
        };

        let log_destination = match get("AURA_LOG") {
            Some(raw) => LogDestination::parse(&raw).ok_or(ConfigError::Invalid {
                key: "AURA_LOG",
                expected: "`terminal`, `file` or `both`",
                value: raw,
            })?,
            None => LogDestination::File,
        };

        let log_level = match get("AURA_LOG_LEVEL") {
            Some(raw) => raw.trim().parse::<LevelFilter>().map_err(|_| ConfigError::Invalid {
                key: "AURA_LOG_LEVEL",
                expected: "a log level",
                value: raw.clone(),
            })?,
            None => LevelFilter::Info,
        };

        Ok(Config {
            api_url: get("AURA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token: get("AURA_API_TOKEN"),
            debounce,
            search_endpoint,
            log_destination,
            log_level,
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_url.clone(),
            bearer_token: self.api_token.clone(),
            ..ClientSettings::default()
        }
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            quiescence: self.debounce,
            endpoint: self.search_endpoint,
            ..SearchSettings::default()
        }
    }
}
