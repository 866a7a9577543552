//! Mock LLM provider for testing and offline runs.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::contract::{
    ANSWER_MARKER, CITATIONS_MARKER, EXPLANATION_MARKER, OPTIONS_MARKER, QUESTION_MARKER,
};
use crate::error::{RecastError, Result};

use super::provider::{LlmConfig, LlmProvider};

/// Mock provider that returns predictable responses.
///
/// Without a script it echoes the row found in the prompt back in the
/// response layout, with option 1 marked correct. With a script it returns
/// the scripted responses in call order, cycling. Calls can be made to fail
/// by their 1-based call number.
pub struct MockProvider {
    config: LlmConfig,
    script: Vec<String>,
    failing_calls: Vec<usize>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self::with_config(LlmConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: LlmConfig) -> Self {
        Self {
            config: config.or_model("mock"),
            script: Vec::new(),
            failing_calls: Vec::new(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Return these responses in call order.
    pub fn with_responses<I, S>(mut self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script = responses.into_iter().map(Into::into).collect();
        self
    }

    /// Fail the given calls (1-based, counted across the provider's lifetime).
    pub fn failing_on(mut self, calls: impl IntoIterator<Item = usize>) -> Self {
        self.failing_calls = calls.into_iter().collect();
        self
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn complete(&self, prompt: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if self.failing_calls.contains(&call) {
            return Err(RecastError::provider(
                self.name(),
                format!("scripted failure on call {}", call),
            ));
        }

        if self.script.is_empty() {
            return Ok(echo_response(prompt));
        }
        Ok(self.script[(call - 1) % self.script.len()].clone())
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Restate the prompt's question and options in the response layout.
fn echo_response(prompt: &str) -> String {
    let question = prompt
        .lines()
        .find_map(|line| line.strip_prefix("Original Question:"))
        .map(str::trim)
        .unwrap_or_default();

    let options: Vec<&str> = prompt
        .lines()
        .skip_while(|line| line.trim() != "Original Options:")
        .skip(1)
        .take_while(|line| !line.trim().is_empty())
        .collect();

    format!(
        "{QUESTION_MARKER} {question}\n\
         {OPTIONS_MARKER}\n\
         {options}\n\
         {ANSWER_MARKER} 1\n\
         {EXPLANATION_MARKER} Offline rewrite; the original wording is kept.\n\
         {CITATIONS_MARKER} None",
        options = options.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_responses_cycle() {
        let mock = MockProvider::new().with_responses(["a", "b"]);

        assert_eq!(mock.complete("p").unwrap(), "a");
        assert_eq!(mock.complete("p").unwrap(), "b");
        assert_eq!(mock.complete("p").unwrap(), "a");
        assert_eq!(mock.call_count(), 3);
    }

    #[test]
    fn test_failing_calls() {
        let mock = MockProvider::new().with_responses(["ok"]).failing_on([2]);

        assert!(mock.complete("p").is_ok());
        let err = mock.complete("p").unwrap_err();
        assert!(matches!(err, RecastError::Provider { .. }));
        assert!(mock.complete("p").is_ok());
    }

    #[test]
    fn test_records_prompts() {
        let mock = MockProvider::new().with_responses(["ok"]);
        mock.complete("first").unwrap();
        mock.complete("second").unwrap();
        assert_eq!(mock.prompts(), vec!["first", "second"]);
    }

    #[test]
    fn test_echo_response() {
        let prompt = "Intro\n\nOriginal Question: Which dance?\n\nOriginal Options:\n1. Chanchari\n2. Bhangra\n3. Garba\n4. Bihu\n\nPlease provide:";
        let reply = echo_response(prompt);

        assert!(
            reply.starts_with("CORRECTED_QUESTION: Which dance?\nCORRECTED_OPTIONS:\n1. Chanchari\n")
        );
        assert!(reply.contains("4. Bihu\nCORRECT_ANSWER: 1\n"));
    }
}
