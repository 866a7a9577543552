//! Review session: one reviewer walking a dataset row by row.
//!
//! The session owns the dataset, the current row index, the candidates
//! generated for that row and, while editing, the edit buffer. Its state is
//! derived from what it holds:
//!
//! ```text
//!             generate                begin_edit(k)
//!  Browsing ───────────▶ Reviewing ─────────────────▶ Editing
//!     ▲                   │   ▲                         │  │
//!     │  use_candidate(k) │   └──────── cancel_edit ────┘  │
//!     ├───────────────────┘                                │
//!     └──────────────────────── save_edit ─────────────────┘
//! ```
//!
//! Moving to another row returns to `Browsing` from any state and discards
//! candidates and buffer without committing. The dataset is only written by
//! `use_candidate` and `save_edit`, both through a single commit.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::candidate::CandidateSet;
use crate::dataset::{Dataset, Row};
use crate::error::{RecastError, Result};
use crate::generation::{GenerationOutcome, Generator};

use super::edit::EditBuffer;

/// Where the reviewer is in the review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    /// Looking at a row; no candidates.
    Browsing,
    /// Candidates for the current row are on display.
    Reviewing,
    /// A candidate is being edited.
    Editing,
}

impl ReviewState {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewState::Browsing => "browsing",
            ReviewState::Reviewing => "reviewing",
            ReviewState::Editing => "editing",
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session over one dataset.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    dataset: Dataset,
    current_index: usize,
    candidates: Option<CandidateSet>,
    edit: Option<EditBuffer>,
}

impl ReviewSession {
    /// Start a session at the first row.
    pub fn new(dataset: Dataset) -> Result<Self> {
        if dataset.is_empty() {
            return Err(RecastError::EmptyData("dataset has no rows".to_string()));
        }
        Ok(Self {
            dataset,
            current_index: 0,
            candidates: None,
            edit: None,
        })
    }

    pub fn state(&self) -> ReviewState {
        if self.edit.is_some() {
            ReviewState::Editing
        } else if self.candidates.is_some() {
            ReviewState::Reviewing
        } else {
            ReviewState::Browsing
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_row(&self) -> &Row {
        &self.dataset.rows()[self.current_index]
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Whether any row has been committed.
    pub fn is_dirty(&self) -> bool {
        self.dataset.is_dirty()
    }

    pub fn candidates(&self) -> Option<&CandidateSet> {
        self.candidates.as_ref()
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.edit.as_ref()
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.edit.as_mut()
    }

    // Navigation

    /// Move to row `index` (zero-based).
    ///
    /// Moving to the current row is a no-op. Moving elsewhere discards
    /// candidates and any edit buffer without committing.
    pub fn navigate(&mut self, index: usize) -> Result<()> {
        let len = self.dataset.len();
        if index >= len {
            return Err(RecastError::RowOutOfRange { index, len });
        }
        if index == self.current_index {
            return Ok(());
        }

        if self.edit.is_some() {
            debug!(row = self.current_index, "discarding unsaved edit");
        }
        self.current_index = index;
        self.candidates = None;
        self.edit = None;
        debug!(row = index, "navigated");
        Ok(())
    }

    /// Move to the next row. Returns false at the last row.
    pub fn next(&mut self) -> bool {
        let index = self.current_index + 1;
        index < self.dataset.len() && self.navigate(index).is_ok()
    }

    /// Move to the previous row. Returns false at the first row.
    pub fn previous(&mut self) -> bool {
        match self.current_index.checked_sub(1) {
            Some(index) => self.navigate(index).is_ok(),
            None => false,
        }
    }

    // Generation

    /// Index and a copy of the row to generate for.
    ///
    /// Lets callers run the batch without holding the session; the result is
    /// handed back through [`ReviewSession::apply_generation`].
    pub fn generation_request(&self) -> Result<(usize, Row)> {
        self.require_not_editing("generate")?;

        let row = self.current_row();
        let missing = row.missing_fields();
        if !missing.is_empty() {
            return Err(RecastError::IncompleteRow {
                index: self.current_index,
                fields: missing.into_iter().map(String::from).collect(),
            });
        }
        Ok((self.current_index, row.clone()))
    }

    /// Install the candidates of a finished batch.
    ///
    /// Refused if the reviewer has since moved to another row or started
    /// editing. Replaces any earlier candidates for the row.
    pub fn apply_generation(&mut self, outcome: &GenerationOutcome) -> Result<()> {
        let generated_for = outcome.candidates.row_index();
        if generated_for != self.current_index {
            return Err(RecastError::StaleGeneration {
                generated_for,
                current: self.current_index,
            });
        }
        self.require_not_editing("apply generated candidates")?;

        if outcome.candidates.is_empty() {
            return Ok(());
        }
        self.candidates = Some(outcome.candidates.clone());
        Ok(())
    }

    /// Run a batch for the current row and install its candidates.
    ///
    /// If the batch fails the session is left as it was.
    pub fn generate(&mut self, generator: &Generator) -> Result<GenerationOutcome> {
        let (index, row) = self.generation_request()?;
        let outcome = generator.generate(index, &row)?;
        self.apply_generation(&outcome)?;
        Ok(outcome)
    }

    // Review and edit

    /// Open candidate `k` in the editor.
    pub fn begin_edit(&mut self, k: usize) -> Result<()> {
        let candidates = self.reviewing("edit a candidate")?;
        let candidate = candidates
            .get(k)
            .ok_or(RecastError::CandidateOutOfRange {
                index: k,
                len: candidates.len(),
            })?;
        self.edit = Some(EditBuffer::from_candidate(candidate));
        Ok(())
    }

    /// Commit candidate `k` as-is.
    pub fn use_candidate(&mut self, k: usize) -> Result<()> {
        let candidates = self.reviewing("use a candidate")?;
        let candidate = candidates
            .get(k)
            .ok_or(RecastError::CandidateOutOfRange {
                index: k,
                len: candidates.len(),
            })?;
        let buffer = EditBuffer::from_candidate(candidate);

        self.commit(&buffer)?;
        self.candidates = None;
        Ok(())
    }

    /// Replace the edit buffer wholesale.
    pub fn update_edit(&mut self, buffer: EditBuffer) -> Result<()> {
        if self.edit.is_none() {
            return Err(self.invalid("update the edit buffer"));
        }
        self.edit = Some(buffer);
        Ok(())
    }

    /// Commit the edit buffer to the current row.
    ///
    /// On a refused commit the buffer stays open so it can be corrected.
    pub fn save_edit(&mut self) -> Result<()> {
        let Some(buffer) = self.edit.as_ref() else {
            return Err(self.invalid("save"));
        };
        let buffer = buffer.clone();

        self.commit(&buffer)?;
        self.edit = None;
        self.candidates = None;
        Ok(())
    }

    /// Drop the edit buffer and return to the candidates.
    pub fn cancel_edit(&mut self) -> Result<()> {
        if self.edit.take().is_none() {
            return Err(self.invalid("cancel an edit"));
        }
        Ok(())
    }

    /// Write `buffer` into the current row in one replacement.
    ///
    /// Fields are trimmed before the answer is checked, and the checked
    /// values are the ones written.
    fn commit(&mut self, buffer: &EditBuffer) -> Result<()> {
        let buffer = buffer.trimmed();
        if !buffer.is_consistent() {
            warn!(
                row = self.current_index,
                answer = %buffer.answer,
                "refusing commit: answer matches no option"
            );
            return Err(RecastError::AnswerMismatch {
                answer: buffer.answer,
            });
        }

        let mut row = self.current_row().clone();
        row.answer = non_empty(&buffer.answer);
        row.full_answer = non_empty(&buffer.explanation);
        row.answer_source = non_empty(&buffer.citations);
        row.question = buffer.question;
        row.options = buffer.options;

        self.dataset.replace(self.current_index, row)?;
        info!(row = self.current_index, "committed row");
        Ok(())
    }

    fn reviewing(&self, action: &'static str) -> Result<&CandidateSet> {
        match (&self.candidates, &self.edit) {
            (Some(candidates), None) => Ok(candidates),
            _ => Err(self.invalid(action)),
        }
    }

    fn require_not_editing(&self, action: &'static str) -> Result<()> {
        if self.edit.is_some() {
            return Err(self.invalid(action));
        }
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> RecastError {
        RecastError::InvalidTransition {
            action,
            state: self.state().as_str(),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
