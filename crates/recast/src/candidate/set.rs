//! Candidates generated for one row.

use serde::Serialize;

use super::candidate::Candidate;

/// The candidates produced by one generation batch, in slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSet {
    row_index: usize,
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    /// Create a set for the row at `row_index`.
    pub fn new(row_index: usize, candidates: Vec<Candidate>) -> Self {
        Self {
            row_index,
            candidates,
        }
    }

    /// Index of the row these candidates were generated for.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}
