//! Prompt construction.

mod builder;
mod knowledge;

pub use builder::{AnswerPolicy, PromptBuilder};
pub use knowledge::KnowledgeBase;
