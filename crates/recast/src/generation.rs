//! Fan-out generation of candidates for one row.

use std::sync::Arc;
use std::thread;

use serde::Serialize;
use tracing::{info, warn};

use crate::candidate::{Candidate, CandidateSet};
use crate::dataset::Row;
use crate::error::{RecastError, Result};
use crate::llm::LlmProvider;
use crate::prompt::PromptBuilder;

/// Default number of model calls per batch.
pub const DEFAULT_FAN_OUT: usize = 3;

/// A batch slot whose model call failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotFailure {
    pub slot: usize,
    pub message: String,
}

/// Result of one generation batch.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub candidates: CandidateSet,
    pub failures: Vec<SlotFailure>,
}

impl GenerationOutcome {
    /// True when some, but not all, calls failed.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Issues one prompt to a provider several times and parses the replies.
#[derive(Clone)]
pub struct Generator {
    provider: Arc<dyn LlmProvider>,
    builder: PromptBuilder,
    fan_out: usize,
}

impl Generator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            builder: PromptBuilder::default(),
            fan_out: DEFAULT_FAN_OUT,
        }
    }

    pub fn with_builder(mut self, builder: PromptBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Set the batch size. Values below one are raised to one.
    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out.max(1);
        self
    }

    pub fn fan_out(&self) -> usize {
        self.fan_out
    }

    pub fn builder(&self) -> &PromptBuilder {
        &self.builder
    }

    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    /// Generate candidates for the row at `index`.
    ///
    /// All calls run concurrently and the method returns once every call has
    /// finished. Failed calls are dropped from the set and reported in
    /// [`GenerationOutcome::failures`]; if every call fails the batch is an
    /// error.
    pub fn generate(&self, index: usize, row: &Row) -> Result<GenerationOutcome> {
        let prompt = self.builder.build_checked(index, row)?;
        let provider = self.provider.as_ref();

        let results: Vec<Result<String>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..self.fan_out)
                .map(|_| scope.spawn(|| provider.complete(&prompt)))
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(RecastError::provider(provider.name(), "model call panicked"))
                    })
                })
                .collect()
        });

        let mut candidates = Vec::with_capacity(self.fan_out);
        let mut failures = Vec::new();
        for (slot, result) in results.into_iter().enumerate() {
            match result {
                Ok(raw) => candidates.push(Candidate::parse(&raw)),
                Err(e) => {
                    warn!(row = index, slot, error = %e, "generation call failed");
                    failures.push(SlotFailure {
                        slot,
                        message: e.to_string(),
                    });
                }
            }
        }

        if candidates.is_empty() {
            let last_error = failures
                .last()
                .map(|f| f.message.clone())
                .unwrap_or_default();
            return Err(RecastError::BatchExhausted {
                attempts: self.fan_out,
                last_error,
            });
        }

        info!(
            row = index,
            provider = provider.name(),
            candidates = candidates.len(),
            failed = failures.len(),
            "generation batch complete"
        );

        Ok(GenerationOutcome {
            candidates: CandidateSet::new(index, candidates),
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockProvider;

    const REPLY: &str = "CORRECTED_QUESTION: Which region...?\nCORRECTED_OPTIONS:\n1. Garhwal\n2. Punjab\n3. Kerala\n4. Assam\nCORRECT_ANSWER: 1\nEXPLANATION: Because X.\nCITATIONS: Wikipedia.";

    fn row() -> Row {
        Row::new(
            "Uttarakhand",
            "History",
            "Which region?",
            ["Garhwal", "Punjab", "Kerala", "Assam"],
        )
    }

    #[test]
    fn test_full_batch() {
        let mock = Arc::new(MockProvider::new().with_responses([REPLY]));
        let generator = Generator::new(mock.clone());

        let outcome = generator.generate(0, &row()).unwrap();
        assert_eq!(outcome.candidates.len(), 3);
        assert_eq!(outcome.candidates.row_index(), 0);
        assert!(!outcome.is_partial());
        assert_eq!(mock.call_count(), 3);
        assert!(
            outcome
                .candidates
                .iter()
                .all(|c| c.question == "Which region...?")
        );
    }

    #[test]
    fn test_same_prompt_for_every_call() {
        let mock = Arc::new(MockProvider::new().with_responses([REPLY]));
        Generator::new(mock.clone()).generate(2, &row()).unwrap();

        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts.iter().all(|p| p == &prompts[0]));
    }

    #[test]
    fn test_partial_failure() {
        let mock = Arc::new(MockProvider::new().with_responses([REPLY]).failing_on([2]));
        let outcome = Generator::new(mock).generate(0, &row()).unwrap();

        assert_eq!(outcome.candidates.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.is_partial());
        assert!(outcome.failures[0].message.contains("scripted failure"));
    }

    #[test]
    fn test_all_calls_fail() {
        let mock = Arc::new(MockProvider::new().failing_on([1, 2, 3]));
        let err = Generator::new(mock).generate(0, &row()).unwrap_err();

        assert!(matches!(err, RecastError::BatchExhausted { attempts: 3, .. }));
    }

    #[test]
    fn test_incomplete_row_is_not_sent() {
        let mock = Arc::new(MockProvider::new());
        let mut incomplete = row();
        incomplete.question.clear();

        let err = Generator::new(mock.clone())
            .generate(5, &incomplete)
            .unwrap_err();
        assert!(matches!(err, RecastError::IncompleteRow { index: 5, .. }));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_fan_out() {
        let mock = Arc::new(MockProvider::new());
        let generator = Generator::new(mock.clone()).with_fan_out(5);
        let outcome = generator.generate(0, &row()).unwrap();

        assert_eq!(outcome.candidates.len(), 5);
        assert_eq!(Generator::new(mock).with_fan_out(0).fan_out(), 1);
    }
}
