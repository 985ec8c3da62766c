use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::gemini::DEFAULT_BASE_URL;
use crate::mediation::retry::RetryPolicy;

/// Application configuration loaded from environment variables.
/// Fails at startup if the API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub port: u16,
    pub rust_log: String,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let gemini_api_key = api_key_from("GEMINI_API_KEY", "API_KEY")?;

        Ok(Config {
            gemini_api_key,
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            retry: RetryPolicy {
                max_retries: parse_env("LLM_MAX_RETRIES", 0)?,
                base_delay: Duration::from_millis(parse_env("LLM_RETRY_BASE_DELAY_MS", 1000)?),
                max_delay: Duration::from_millis(parse_env("LLM_RETRY_MAX_DELAY_MS", 8000)?),
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

/// Reads the API key from `primary`, falling back to `fallback` when it is unset or empty.
fn api_key_from(primary: &str, fallback: &str) -> Result<String> {
    require_env(primary)
        .or_else(|_| require_env(fallback))
        .with_context(|| format!("Set {primary} (or {fallback}) to a Gemini API key"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
