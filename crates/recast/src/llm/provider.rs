//! LLM provider trait and configuration.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{RecastError, Result};

/// Configuration shared by all providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model to use. Empty selects the provider's default model.
    pub model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Sampling temperature. Kept above zero so a batch yields distinct rewrites.
    pub temperature: f64,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            max_tokens: 1024,
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Use `default_model` when no model was configured.
    pub(crate) fn or_model(mut self, default_model: &str) -> Self {
        if self.model.trim().is_empty() {
            self.model = default_model.to_string();
        }
        self
    }

    pub(crate) fn http_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| RecastError::Config(format!("Failed to create HTTP client: {}", e)))
    }
}

/// A text-completion service.
///
/// Implementations must be thread-safe (Send + Sync) so one provider can
/// serve every call of a generation batch concurrently.
pub trait LlmProvider: Send + Sync {
    /// Send one prompt and return the raw completion text.
    ///
    /// Any failure (transport, non-success status, empty reply) is reported
    /// as an error; callers treat it as a failed slot.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}
