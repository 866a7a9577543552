//! Recast: LLM-assisted rewriting of multiple-choice quiz datasets.
//!
//! A dataset of quiz rows (State, Attribute, Question, four options) is
//! reviewed one row at a time. For the current row a model is asked several
//! times to rewrite the question with regional and cultural context; each
//! reply is parsed into a [`Candidate`]. The reviewer commits a candidate as
//! is, or edits it first, and exports the updated dataset.
//!
//! # Core Principles
//!
//! - **Nothing is written without a commit**: rows change only when a
//!   candidate is used or an edit is saved
//! - **Answers stay consistent**: a committed answer always names one of the
//!   row's four options
//! - **Model output is untrusted**: replies are parsed leniently and never
//!   fail; missing parts come back empty
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use recast::{ExportFormat, Generator, Loader, MockProvider, ReviewSession};
//!
//! let dataset = Loader::new().load_file("questions.csv").unwrap();
//! let mut session = ReviewSession::new(dataset).unwrap();
//!
//! let generator = Generator::new(Arc::new(MockProvider::new()));
//! session.generate(&generator).unwrap();
//! session.use_candidate(0).unwrap();
//!
//! recast::export::write(session.dataset(), "updated.csv", ExportFormat::Csv).unwrap();
//! ```

pub mod candidate;
pub mod config;
pub mod contract;
pub mod dataset;
pub mod error;
pub mod generation;
pub mod llm;
pub mod prompt;
pub mod review;

pub use candidate::{Candidate, CandidateSet, parse_response};
pub use config::RecastConfig;
pub use dataset::{Dataset, ExportFormat, Loader, LoaderConfig, Row, SourceMetadata, export};
pub use error::{RecastError, Result};
pub use generation::{GenerationOutcome, Generator, SlotFailure};
pub use llm::{
    AnthropicProvider, GeminiProvider, LlmConfig, LlmProvider, MockProvider, OllamaProvider,
    OpenAIProvider,
};
pub use prompt::{AnswerPolicy, KnowledgeBase, PromptBuilder};
pub use review::{EditBuffer, ReviewSession, ReviewState};
