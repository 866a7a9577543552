//! LLM provider integration.
//!
//! Every provider turns one prompt into one completion through
//! [`LlmProvider::complete`]. Generation fans the same prompt out to several
//! calls, so providers are shared across threads.
//!
//! # Supported Providers
//!
//! - **Anthropic** - Claude models via API (requires `ANTHROPIC_API_KEY`)
//! - **OpenAI** - GPT models via API (requires `OPENAI_API_KEY`)
//! - **Gemini** - Google models via API (requires `GEMINI_API_KEY` or `GOOGLE_API_KEY`)
//! - **Ollama** - Local models, no API key needed (honors `OLLAMA_HOST`)
//! - **Mock** - Scripted responses for tests and offline runs
//!
//! # Example
//!
//! ```no_run
//! use recast::{LlmConfig, LlmProvider, OllamaProvider};
//!
//! let provider = OllamaProvider::with_config(LlmConfig::default()).unwrap();
//! let reply = provider.complete("CORRECTED_QUESTION: ...").unwrap();
//! ```

mod anthropic;
mod gemini;
mod mock;
mod ollama;
mod openai;
mod prompts;
mod provider;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use prompts::system_prompt;
pub use provider::{LlmConfig, LlmProvider};
