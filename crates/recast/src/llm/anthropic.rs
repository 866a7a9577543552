//! Anthropic Claude API provider implementation.

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{RecastError, Result};

use super::prompts;
use super::provider::{LlmConfig, LlmProvider};

/// Anthropic API endpoint.
const API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version.
const API_VERSION: &str = "2023-06-01";

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Anthropic Claude provider.
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a new Anthropic provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let config = config.or_model(DEFAULT_MODEL);
        Ok(Self {
            client: config.http_client()?,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create from environment variable.
    pub fn from_env(config: LlmConfig) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            RecastError::Config("ANTHROPIC_API_KEY environment variable not set".to_string())
        })?;
        Self::with_config(api_key, config)
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| RecastError::Config(format!("Invalid API key: {}", e)))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        Ok(headers)
    }
}

impl LlmProvider for AnthropicProvider {
    fn complete(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "system": prompts::system_prompt(),
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response = self
            .client
            .post(API_URL)
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .map_err(|e| RecastError::provider(self.name(), format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(RecastError::provider(
                self.name(),
                format!("API error ({}): {}", status, error_text),
            ));
        }

        let api_response: ApiResponse = response.json().map_err(|e| {
            RecastError::provider(self.name(), format!("failed to parse response: {}", e))
        })?;
        debug!(model = %self.config.model, blocks = api_response.content.len(), "anthropic reply");

        extract_text(api_response)
            .ok_or_else(|| RecastError::provider(self.name(), "no text in API response"))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

fn extract_text(response: ApiResponse) -> Option<String> {
    response
        .content
        .into_iter()
        .find(|block| block.content_type == "text" && !block.text.trim().is_empty())
        .map(|block| block.text)
}

/// Anthropic API response structure.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

/// Content block in API response.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_text_block() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "CORRECTED_QUESTION: Q?"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(extract_text(response).unwrap(), "CORRECTED_QUESTION: Q?");
    }

    #[test]
    fn test_extract_without_text() {
        let response: ApiResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(extract_text(response).is_none());
    }

    #[test]
    fn test_default_model() {
        let provider = AnthropicProvider::new("test").unwrap();
        assert_eq!(provider.config().model, DEFAULT_MODEL);
        assert_eq!(provider.name(), "anthropic");
    }
}
