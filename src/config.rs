use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

const MIN_MAX_TOKENS: u32 = 16;
const MAX_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub model_server_url: String,
    pub model_name: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            model_server_url: "http://localhost:8081".to_string(),
            model_name: "local-model".to_string(),
            api_key: None,
            temperature: 0.7,
            top_p: 0.95,
            max_tokens: 512,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_tokens = parse_or(&lookup, "MAX_TOKENS", defaults.max_tokens)?;
        let clamped = max_tokens.clamp(MIN_MAX_TOKENS, MAX_MAX_TOKENS);
        if clamped != max_tokens {
            log::info!("Clamping MAX_TOKENS from {} to {}", max_tokens, clamped);
        }

        let timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 60u64)?;

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            model_server_url: lookup("MODEL_SERVER_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.model_server_url),
            model_name: lookup("MODEL_NAME").unwrap_or(defaults.model_name),
            api_key: lookup("MODEL_API_KEY").filter(|key| !key.trim().is_empty()),
            temperature: parse_or(&lookup, "TEMPERATURE", defaults.temperature)?,
            top_p: parse_or(&lookup, "TOP_P", defaults.top_p)?,
            max_tokens: clamped,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
