// ABOUTME: Configuration for the text-generation backend
// ABOUTME: Built once at startup and injected; a missing API key is an expected state, not an error

use std::env;
use std::time::Duration;

use crate::client::AnthropicClient;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Configuration for the Anthropic text-generation backend.
///
/// `api_key` being `None` means "no backend configured" — callers are
/// expected to fall back to deterministic output rather than fail.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl AiConfig {
    /// Read configuration from the environment.
    ///
    /// `ANTHROPIC_API_KEY` is optional; `ANTHROPIC_MODEL` and
    /// `ANTHROPIC_BASE_URL` override the defaults.
    pub fn from_env() -> Self {
        let model = env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self {
            api_key: env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty()),
            model,
            base_url,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Build a client for this configuration, or `None` when no API key
    /// is configured.
    pub fn client(&self) -> Option<AnthropicClient> {
        self.api_key
            .as_ref()
            .map(|key| AnthropicClient::new(key.clone(), self.clone()))
    }
}
