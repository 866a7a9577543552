//! Tool configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RecastError, Result};
use crate::generation::{DEFAULT_FAN_OUT, Generator};
use crate::llm::{LlmConfig, LlmProvider};
use crate::prompt::{AnswerPolicy, KnowledgeBase, PromptBuilder};

/// Configuration for generation and prompting.
///
/// Every field has a default, so a configuration file only needs the keys it
/// changes:
///
/// ```json
/// {
///   "fan_out": 3,
///   "answer_policy": { "kind": "fixed_labels", "labels": ["Uttarakhand", "Garhwali"] },
///   "knowledge_base": "knowledge.json",
///   "llm": { "model": "gemini-2.0-flash", "temperature": 0.7 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecastConfig {
    /// Model calls per generation batch.
    pub fan_out: usize,

    /// Which option the model must make correct.
    pub answer_policy: AnswerPolicy,

    /// JSON file of background facts embedded in prompts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base: Option<PathBuf>,

    /// Provider settings.
    pub llm: LlmConfig,
}

impl Default for RecastConfig {
    fn default() -> Self {
        Self {
            fan_out: DEFAULT_FAN_OUT,
            answer_policy: AnswerPolicy::default(),
            knowledge_base: None,
            llm: LlmConfig::default(),
        }
    }
}

impl RecastConfig {
    /// Load a JSON configuration file.
    ///
    /// A relative `knowledge_base` path is resolved against the file's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RecastError::io(path, e))?;
        let mut config: RecastConfig = serde_json::from_str(&text)
            .map_err(|e| RecastError::Config(format!("{}: {}", path.display(), e)))?;

        config.knowledge_base = config.knowledge_base.map(|kb| match path.parent() {
            Some(dir) if kb.is_relative() => dir.join(kb),
            _ => kb,
        });

        config.validate()?;
        debug!(path = %path.display(), fan_out = config.fan_out, "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fan_out == 0 {
            return Err(RecastError::Config(
                "fan_out must be at least 1".to_string(),
            ));
        }
        if let AnswerPolicy::FixedLabels { labels } = &self.answer_policy {
            if labels.iter().all(|l| l.trim().is_empty()) {
                return Err(RecastError::Config(
                    "fixed_labels answer policy needs at least one label".to_string(),
                ));
            }
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(RecastError::Config(format!(
                "temperature {} is outside 0.0-2.0",
                self.llm.temperature
            )));
        }
        Ok(())
    }

    /// Prompt builder for this configuration, loading the knowledge base if set.
    pub fn prompt_builder(&self) -> Result<PromptBuilder> {
        let mut builder = PromptBuilder::new().with_answer_policy(self.answer_policy.clone());
        if let Some(path) = &self.knowledge_base {
            builder = builder.with_knowledge(KnowledgeBase::load(path)?);
        }
        Ok(builder)
    }

    /// Generator over `provider` for this configuration.
    pub fn generator(&self, provider: Arc<dyn LlmProvider>) -> Result<Generator> {
        self.validate()?;
        Ok(Generator::new(provider)
            .with_builder(self.prompt_builder()?)
            .with_fan_out(self.fan_out))
    }
}
