//! Configuration (programmatic > environment).

use std::time::Duration;

use crate::error::{Result, StrandError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Configuration for the assistants client.
#[derive(Debug, Clone)]
pub struct StrandConfig {
    api_key: Option<String>,
    base_url: String,
    model: String,
    poll_interval: Duration,
}

impl Default for StrandConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl StrandConfig {
    /// Create a config with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Load from environment variables (`OPENAI_API_KEY`, `OPENAI_BASE_URL`,
    /// `STRAND_MODEL`, `STRAND_POLL_INTERVAL_MS`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(model) = std::env::var("STRAND_MODEL") {
            config.model = model;
        }
        if let Ok(ms) = std::env::var("STRAND_POLL_INTERVAL_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                config.poll_interval = Duration::from_millis(ms);
            }
        }

        config
    }

    /// Override the service base URL (useful for proxies and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model used for new assistant definitions.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the interval between run status polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The configured API key, or a configuration error when absent.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| StrandError::Configuration("missing OPENAI_API_KEY".to_string()))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}
