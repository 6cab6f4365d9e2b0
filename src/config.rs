//! Environment-driven configuration.

use crate::assistant::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::model::UserId;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_COMMIT_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;
pub const DEFAULT_CURRENT_USER: &str = "user_1";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Credential for the text assistant. `None` disables it.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    /// Simulated latency between analyzing a smart order and committing it.
    pub commit_delay: Duration,
    /// Owner of orders created without an explicit user.
    pub current_user: UserId,
    /// Request buffer of the order actor.
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            commit_delay: DEFAULT_COMMIT_DELAY,
            current_user: UserId::from(DEFAULT_CURRENT_USER),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|s| !s.trim().is_empty());

        let model = lookup("GEMINI_MODEL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.model);

        let endpoint = lookup("GEMINI_ENDPOINT")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.endpoint);

        let commit_delay = match lookup("MARKET_COMMIT_DELAY_MS") {
            Some(value) => Duration::from_millis(parse_number("MARKET_COMMIT_DELAY_MS", &value)?),
            None => defaults.commit_delay,
        };

        let current_user = lookup("MARKET_CURRENT_USER")
            .filter(|s| !s.trim().is_empty())
            .map(UserId::from)
            .unwrap_or(defaults.current_user);

        let channel_capacity = match lookup("MARKET_CHANNEL_CAPACITY") {
            Some(value) => {
                let capacity = parse_number("MARKET_CHANNEL_CAPACITY", &value)?;
                if capacity == 0 {
                    return Err(ConfigError::Zero {
                        name: "MARKET_CHANNEL_CAPACITY",
                    });
                }
                capacity as usize
            }
            None => defaults.channel_capacity,
        };

        Ok(Config {
            api_key,
            model,
            endpoint,
            commit_delay,
            current_user,
            channel_capacity,
        })
    }

    pub fn with_commit_delay(mut self, delay: Duration) -> Self {
        self.commit_delay = delay;
        self
    }
}

fn parse_number(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn blank_key_is_absent_and_fallback_key_is_used() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());

        let config = Config::from_lookup(lookup_from(&[("API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("MARKET_COMMIT_DELAY_MS", "0"),
            ("MARKET_CURRENT_USER", "user_9"),
            ("MARKET_CHANNEL_CAPACITY", "8"),
            ("GEMINI_MODEL", "gemini-pro"),
        ]))
        .unwrap();
        assert_eq!(config.commit_delay, Duration::ZERO);
        assert_eq!(config.current_user, UserId::from("user_9"));
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.model, "gemini-pro");
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let err = Config::from_lookup(lookup_from(&[("MARKET_COMMIT_DELAY_MS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "MARKET_COMMIT_DELAY_MS",
                value: "soon".to_string()
            }
        );

        let err = Config::from_lookup(lookup_from(&[("MARKET_CHANNEL_CAPACITY", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::Zero { name: "MARKET_CHANNEL_CAPACITY" });
    }
}
