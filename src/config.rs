use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://api.binance.com/api/v3";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_AGENT_MAX_TURNS: usize = 10;

/// Startup configuration errors. Any of these aborts the process.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Process configuration, built once in `main` and shared from there
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub market_data_base_url: String,
    pub http_timeout: Duration,
    pub agent_timeout: Duration,
    pub agent_max_turns: usize,
}

impl Config {
    /// Read the configuration from the process environment (after `.env` is loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated the same as absent ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let llm_api_key = get("GEMINI_API_KEY").ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let llm_base_url = trim_base_url(get("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()));
        let llm_model = get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());
        let market_data_base_url = trim_base_url(
            get("MARKET_DATA_BASE_URL").unwrap_or_else(|| DEFAULT_MARKET_DATA_BASE_URL.to_string()),
        );

        let http_timeout = Duration::from_secs(parse_positive(
            "HTTP_TIMEOUT_SECS",
            get("HTTP_TIMEOUT_SECS"),
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);
        let agent_timeout = Duration::from_secs(parse_positive(
            "AGENT_TIMEOUT_SECS",
            get("AGENT_TIMEOUT_SECS"),
            DEFAULT_AGENT_TIMEOUT_SECS,
        )?);
        let agent_max_turns = parse_positive(
            "AGENT_MAX_TURNS",
            get("AGENT_MAX_TURNS"),
            DEFAULT_AGENT_MAX_TURNS as u64,
        )? as usize;

        Ok(Self {
            discord_token,
            llm_api_key,
            llm_base_url,
            llm_model,
            market_data_base_url,
            http_timeout,
            agent_timeout,
            agent_max_turns,
        })
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn parse_positive(key: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::Invalid { key, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "discord"),
            ("GEMINI_API_KEY", "gemini"),
        ]))
        .unwrap();

        assert_eq!(config.llm_base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
        assert_eq!(config.market_data_base_url, DEFAULT_MARKET_DATA_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.agent_timeout, Duration::from_secs(60));
        assert_eq!(config.agent_max_turns, 10);
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "discord")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("GEMINI_API_KEY"));
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "   "),
            ("GEMINI_API_KEY", "gemini"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("DISCORD_TOKEN"));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "discord"),
            ("GEMINI_API_KEY", "gemini"),
            ("MARKET_DATA_BASE_URL", "http://localhost:9000/api/v3/"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("AGENT_MAX_TURNS", "4"),
        ]))
        .unwrap();

        assert_eq!(config.market_data_base_url, "http://localhost:9000/api/v3");
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.agent_max_turns, 4);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "discord"),
            ("GEMINI_API_KEY", "gemini"),
            ("AGENT_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid { key: "AGENT_TIMEOUT_SECS", value: "0".to_string() }
        );
    }
}
