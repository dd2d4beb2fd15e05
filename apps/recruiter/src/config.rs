use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_CONFIRMATION_SECS: u64 = 3;

/// Client configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub confirmation_ttl: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = std::env::var("RECRUITER_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let confirmation_secs = match std::env::var("RECRUITER_CONFIRMATION_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .context("RECRUITER_CONFIRMATION_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_CONFIRMATION_SECS,
        };

        Ok(Config {
            api_url: normalize_base_url(&api_url),
            confirmation_ttl: Duration::from_secs(confirmation_secs),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn with_api_url(self, api_url: &str) -> Self {
        Config {
            api_url: normalize_base_url(api_url),
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            confirmation_ttl: Duration::from_secs(DEFAULT_CONFIRMATION_SECS),
            rust_log: "info".to_string(),
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
