//! Google Gemini API provider implementation.

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use crate::error::{RecastError, Result};

use super::prompts;
use super::provider::{LlmConfig, LlmProvider};

/// Gemini API base; the model name and method are appended.
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Google Gemini provider.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a new Gemini provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let config = config.or_model(DEFAULT_MODEL);
        Ok(Self {
            client: config.http_client()?,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create from `GEMINI_API_KEY`, falling back to `GOOGLE_API_KEY`.
    pub fn from_env(config: LlmConfig) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| {
                RecastError::Config(
                    "GEMINI_API_KEY (or GOOGLE_API_KEY) environment variable not set".to_string(),
                )
            })?;
        Self::with_config(api_key, config)
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.config.model)
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| RecastError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }
}

impl LlmProvider for GeminiProvider {
    fn complete(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "systemInstruction": {
                "parts": [{ "text": prompts::system_prompt() }]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_tokens
            }
        });

        let response = self
            .client
            .post(self.endpoint())
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .map_err(|e| RecastError::provider(self.name(), format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(RecastError::provider(
                self.name(),
                format!("Gemini API error ({}): {}", status, error_text),
            ));
        }

        let api_response: GeminiResponse = response.json().map_err(|e| {
            RecastError::provider(self.name(), format!("failed to parse response: {}", e))
        })?;

        extract_text(api_response)
            .ok_or_else(|| RecastError::provider(self.name(), "no text in Gemini response"))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GeminiResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text: String = candidate
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

/// Gemini API response structure.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}
