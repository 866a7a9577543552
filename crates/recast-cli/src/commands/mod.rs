//! CLI command implementations.

pub mod apply;
pub mod generate;
pub mod inspect;
pub mod prompt;
pub mod review;

use std::path::Path;
use std::sync::Arc;

use recast::{
    AnthropicProvider, GeminiProvider, LlmConfig, LlmProvider, MockProvider, OllamaProvider,
    OpenAIProvider, RecastConfig,
};

use crate::cli::{LlmArgs, LlmProviderChoice};

/// Load the configuration file if given, then apply command-line overrides.
pub fn load_config(
    path: Option<&Path>,
    llm: Option<&LlmArgs>,
) -> Result<RecastConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => RecastConfig::load(path)?,
        None => RecastConfig::default(),
    };

    if let Some(args) = llm {
        if let Some(model) = &args.model {
            config.llm.model = model.clone();
        }
        if let Some(fan_out) = args.fan_out {
            config.fan_out = fan_out;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Create the provider for `choice`. `None` means generation is disabled.
pub fn build_provider(
    choice: &LlmProviderChoice,
    config: &LlmConfig,
) -> recast::Result<Option<Arc<dyn LlmProvider>>> {
    let config = config.clone();
    let provider: Arc<dyn LlmProvider> = match choice {
        LlmProviderChoice::None => return Ok(None),
        LlmProviderChoice::Gemini => Arc::new(GeminiProvider::from_env(config)?),
        LlmProviderChoice::Anthropic => Arc::new(AnthropicProvider::from_env(config)?),
        LlmProviderChoice::OpenAI => Arc::new(OpenAIProvider::from_env(config)?),
        LlmProviderChoice::Ollama => Arc::new(OllamaProvider::with_config(config)?),
        LlmProviderChoice::Mock => Arc::new(MockProvider::with_config(config)),
    };
    Ok(Some(provider))
}

/// Convert a 1-based row number into an index into `len` rows.
pub fn row_index(number: usize, len: usize) -> Result<usize, Box<dyn std::error::Error>> {
    if number == 0 || number > len {
        return Err(format!("Row {} is out of range (1-{})", number, len).into());
    }
    Ok(number - 1)
}
