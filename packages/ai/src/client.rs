// ABOUTME: TextGeneration trait and Anthropic Messages API client
// ABOUTME: Handles API requests, status handling, and response text extraction

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::config::AiConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid response format")]
    InvalidResponse,
}

pub type AiResult<T> = Result<T, AiError>;

/// One call to a text-generation backend.
///
/// Implementations take a system instruction and a user prompt and
/// return the raw generated text. The absence of any backend is
/// modeled one level up (`AiConfig::client` returning `None`), so this
/// trait only covers the configured case.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn complete(&self, system_instruction: &str, user_prompt: &str) -> AiResult<String>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[allow(dead_code)]
    id: String,
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    content_type: String,
    text: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Text-generation client for the Anthropic Messages API.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, config: AiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            model: config.model,
            base_url: config.base_url,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGeneration for AnthropicClient {
    async fn complete(&self, system_instruction: &str, user_prompt: &str) -> AiResult<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            messages: vec![Message {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            }],
            system: Some(system_instruction.to_string()),
        };

        info!(
            "Making Anthropic API request: model={}, max_tokens={}",
            request.model, request.max_tokens
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Anthropic API request timed out");
                    AiError::ApiError("Request timed out. The AI service may be overloaded or unavailable.".to_string())
                } else if e.is_connect() {
                    error!("Failed to connect to Anthropic API: {}", e);
                    AiError::ApiError(format!("Connection failed: {}", e))
                } else {
                    error!("Anthropic API request failed: {}", e);
                    AiError::RequestFailed(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Anthropic API error: {} - {}", status, error_text);
            return Err(AiError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        let text = anthropic_response
            .content
            .first()
            .ok_or(AiError::InvalidResponse)?
            .text
            .clone();

        info!(
            "Received completion: model={}, tokens={}",
            self.model,
            anthropic_response.usage.total_tokens()
        );

        Ok(text)
    }
}
