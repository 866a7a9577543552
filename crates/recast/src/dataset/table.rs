//! The in-memory working dataset.

use serde::Serialize;

use crate::error::{RecastError, Result};

use super::row::{Field, REQUIRED_COLUMNS, RESULT_COLUMNS, Row};
use super::source::SourceMetadata;

/// Ordered rows under review. Rows are addressed by position only.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<SourceMetadata>,
    dirty: bool,
}

impl Dataset {
    /// Create a dataset with the given source column order.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            source: None,
            dirty: false,
        }
    }

    /// Create a dataset using the standard column layout.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let columns = REQUIRED_COLUMNS
            .iter()
            .chain(RESULT_COLUMNS.iter())
            .map(|c| c.to_string())
            .collect();
        Self::new(columns, rows)
    }

    /// Attach source metadata.
    pub fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = Some(source);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column headers as they appeared in the source.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    /// Whether any row has been replaced since loading.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the row at `index` and mark the dataset dirty.
    pub fn replace(&mut self, index: usize, row: Row) -> Result<()> {
        let len = self.rows.len();
        let slot = self
            .rows
            .get_mut(index)
            .ok_or(RecastError::RowOutOfRange { index, len })?;
        *slot = row;
        self.dirty = true;
        Ok(())
    }

    /// Columns written on export: the source order, then any result column the
    /// source lacked.
    pub fn export_columns(&self) -> Vec<String> {
        let mut columns = self.columns.clone();
        for column in RESULT_COLUMNS {
            let field = Field::from_header(column);
            let present = columns.iter().any(|c| Field::from_header(c) == field);
            if !present {
                columns.push(column.to_string());
            }
        }
        columns
    }

    /// Indices of rows whose question contains `term`, ignoring case.
    /// An empty term matches every row.
    pub fn search(&self, term: &str) -> Vec<usize> {
        let needle = term.trim().to_lowercase();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| needle.is_empty() || row.question.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}
