//! Error types for the Recast library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Recast operations.
#[derive(Debug, Error)]
pub enum RecastError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error reading a spreadsheet workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Error writing a spreadsheet workbook.
    #[error("Spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no rows to review.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// The uploaded table lacks required columns. The dataset is left unchanged.
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A row lacks one of the fields the prompt needs.
    #[error("Row {index} is missing required fields: {}", fields.join(", "))]
    IncompleteRow { index: usize, fields: Vec<String> },

    /// A single model call failed.
    #[error("{provider} call failed: {message}")]
    Provider { provider: String, message: String },

    /// Every call in a generation batch failed.
    #[error("All {attempts} generation attempts failed (last error: {last_error})")]
    BatchExhausted { attempts: usize, last_error: String },

    /// Row index outside the dataset.
    #[error("Row {index} is out of range (dataset has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// Candidate index outside the active candidate set.
    #[error("Candidate {index} is out of range ({len} candidates available)")]
    CandidateOutOfRange { index: usize, len: usize },

    /// The requested action is not valid in the current review state.
    #[error("Cannot {action} while {state}")]
    InvalidTransition { action: &'static str, state: &'static str },

    /// Generation results arrived for a row that is no longer current.
    #[error("Generation was for row {generated_for}, but row {current} is now active")]
    StaleGeneration { generated_for: usize, current: usize },

    /// The answer text does not match any of the four options.
    #[error("Answer '{answer}' does not match any option")]
    AnswerMismatch { answer: String },

    /// Export requested before any row was committed.
    #[error("Nothing to export: no rows have been changed")]
    NothingToExport,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RecastError {
    /// Build an IO error tied to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RecastError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a provider error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        RecastError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for Recast operations.
pub type Result<T> = std::result::Result<T, RecastError>;
