use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::extract::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::pipeline::{PipelineLimits, DEFAULT_GENERATION_TIMEOUT};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a number is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub max_document_bytes: u64,
    pub generation_timeout_secs: u64,
    /// Extra attempts on 429/5xx. Zero keeps generation single-shot.
    pub llm_max_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_document_bytes: optional_env("MAX_DOCUMENT_BYTES", DEFAULT_MAX_DOCUMENT_BYTES)?,
            generation_timeout_secs: optional_env(
                "GENERATION_TIMEOUT_SECS",
                DEFAULT_GENERATION_TIMEOUT.as_secs(),
            )?,
            llm_max_retries: optional_env("LLM_MAX_RETRIES", 0)?,
        })
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn limits(&self) -> PipelineLimits {
        PipelineLimits {
            max_document_bytes: self.max_document_bytes,
            generation_timeout: self.generation_timeout(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or_default(key, std::env::var(key).ok(), default)
}

fn parse_or_default<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        _ => Ok(default),
    }
}
