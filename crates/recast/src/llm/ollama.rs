//! Ollama local LLM provider implementation.
//!
//! Ollama allows running LLMs locally without API keys.
//! Install from: https://ollama.ai

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use crate::error::{RecastError, Result};

use super::prompts;
use super::provider::{LlmConfig, LlmProvider};

/// Default Ollama API endpoint.
const DEFAULT_API_URL: &str = "http://localhost:11434/api/chat";

const DEFAULT_MODEL: &str = "llama3.2";

/// Ollama local LLM provider.
pub struct OllamaProvider {
    client: Client,
    api_url: String,
    config: LlmConfig,
}

impl OllamaProvider {
    /// Create a new Ollama provider with default settings.
    ///
    /// Uses llama3.2 model by default. Make sure you've pulled it:
    /// `ollama pull llama3.2`
    pub fn new() -> Result<Self> {
        Self::with_config(LlmConfig::default())
    }

    /// Create with custom configuration. Honors `OLLAMA_HOST`.
    pub fn with_config(config: LlmConfig) -> Result<Self> {
        let config = config.or_model(DEFAULT_MODEL);
        let api_url = std::env::var("OLLAMA_HOST")
            .map(|host| chat_url(&host))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            client: config.http_client()?,
            api_url,
            config,
        })
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

fn chat_url(host: &str) -> String {
    format!("{}/api/chat", host.trim_end_matches('/'))
}

impl LlmProvider for OllamaProvider {
    fn complete(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "stream": false,
            "options": {
                "temperature": self.config.temperature,
                "num_predict": self.config.max_tokens
            },
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt()
                },
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response = self
            .client
            .post(&self.api_url)
            .headers(self.build_headers())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    RecastError::provider(
                        self.name(),
                        "failed to connect to Ollama. Is it running? Start with: ollama serve",
                    )
                } else {
                    RecastError::provider(self.name(), format!("request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();

            if error_text.contains("not found") {
                return Err(RecastError::provider(
                    self.name(),
                    format!(
                        "model '{}' not found. Pull it with: ollama pull {}",
                        self.config.model, self.config.model
                    ),
                ));
            }

            return Err(RecastError::provider(
                self.name(),
                format!("Ollama error ({}): {}", status, error_text),
            ));
        }

        let api_response: OllamaResponse = response.json().map_err(|e| {
            RecastError::provider(self.name(), format!("failed to parse response: {}", e))
        })?;

        if api_response.message.content.trim().is_empty() {
            return Err(RecastError::provider(self.name(), "empty response"));
        }
        Ok(api_response.message.content)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama API response structure.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url_trims_trailing_slash() {
        assert_eq!(
            chat_url("http://gpu-box:11434/"),
            "http://gpu-box:11434/api/chat"
        );
    }

    #[test]
    fn test_response_shape() {
        let parsed: OllamaResponse = serde_json::from_str(
            r#"{"model": "llama3.2", "message": {"role": "assistant", "content": "CITATIONS: C."}, "done": true}"#,
        )
        .unwrap();
        assert_eq!(parsed.message.content, "CITATIONS: C.");
    }
}
