//! Serialize the working dataset back to a tabular file.

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone};
use indexmap::IndexMap;
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{RecastError, Result};

use super::table::Dataset;

/// Output format for exported data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
    Xlsx,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Tsv => "text/tab-separated-values",
            ExportFormat::Json => "application/json",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        ext.parse().ok()
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, json, or xlsx.", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Default export file name, stamped with the given time.
pub fn default_file_name<Tz: TimeZone>(format: ExportFormat, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "updated_questions_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Serialize the dataset. Refused until at least one row has been committed.
pub fn to_bytes(dataset: &Dataset, format: ExportFormat) -> Result<Vec<u8>> {
    if !dataset.is_dirty() {
        return Err(RecastError::NothingToExport);
    }

    let columns = dataset.export_columns();
    match format {
        ExportFormat::Csv => write_delimited(dataset, &columns, b','),
        ExportFormat::Tsv => write_delimited(dataset, &columns, b'\t'),
        ExportFormat::Json => write_json(dataset, &columns),
        ExportFormat::Xlsx => write_xlsx(dataset, &columns),
    }
}

/// Serialize the dataset to a file.
pub fn write(dataset: &Dataset, path: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(dataset, format)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| RecastError::io(parent, e))?;
        }
    }
    fs::write(path, &bytes).map_err(|e| RecastError::io(path, e))?;

    info!(file = %path.display(), rows = dataset.len(), %format, "exported dataset");
    Ok(())
}

fn write_delimited(dataset: &Dataset, columns: &[String], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for row in dataset.rows() {
        writer.write_record(columns.iter().map(|c| row.value(c)))?;
    }

    writer
        .into_inner()
        .map_err(|e| RecastError::Csv(csv::Error::from(e.into_error())))
}

fn write_json(dataset: &Dataset, columns: &[String]) -> Result<Vec<u8>> {
    let records: Vec<IndexMap<&str, &str>> = dataset
        .rows()
        .iter()
        .map(|row| columns.iter().map(|c| (c.as_str(), row.value(c))).collect())
        .collect();

    Ok(serde_json::to_vec_pretty(&records)?)
}

fn write_xlsx(dataset: &Dataset, columns: &[String]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }
    for (i, row) in dataset.rows().iter().enumerate() {
        for (col, name) in columns.iter().enumerate() {
            let value = row.value(name);
            if !value.is_empty() {
                worksheet.write_string(i as u32 + 1, col as u16, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
