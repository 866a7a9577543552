//! Tabular ingestion: delimited text and spreadsheet workbooks.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{RecastError, Result};

use super::row::{Field, REQUIRED_COLUMNS, Row};
use super::source::SourceMetadata;
use super::table::Dataset;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// File extensions read as spreadsheets.
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// File extensions read as delimited text.
const DELIMITED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use for text files (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Worksheet to read from a workbook (None = first sheet).
    pub sheet: Option<String>,
    /// Quote character.
    pub quote: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            sheet: None,
            quote: b'"',
        }
    }
}

/// Loads quiz tables into a [`Dataset`].
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file, choosing the reader from its extension.
    ///
    /// Fails with [`RecastError::MissingColumns`] when any required column is absent.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let contents = fs::read(path).map_err(|e| RecastError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());
        let size_bytes = contents.len() as u64;

        let (dataset, format, encoding) = if DELIMITED_EXTENSIONS.contains(&extension.as_str()) {
            let (text, encoding) = decode_text(&contents);
            let delimiter = match self.config.delimiter {
                Some(d) => d,
                None => detect_delimiter(text.as_bytes())?,
            };
            let format = match delimiter {
                b'\t' => "tsv",
                b',' => "csv",
                b';' => "csv-semicolon",
                b'|' => "psv",
                _ => "delimited",
            };
            (self.parse_delimited(&text, delimiter)?, format.to_string(), encoding)
        } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
            (self.parse_workbook(path)?, extension.clone(), "binary")
        } else {
            return Err(RecastError::UnsupportedFormat(format!(
                "'{}' (expected csv, tsv, xlsx or xls)",
                path.display()
            )));
        };

        info!(
            file = %path.display(),
            rows = dataset.len(),
            format = %format,
            "loaded dataset"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            encoding,
            dataset.len(),
        );
        Ok(dataset.with_source(source))
    }

    /// Parse delimited text that is already in memory.
    pub fn parse_delimited(&self, text: &str, delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            records.push(record.iter().map(|s| s.to_string()).collect());
        }

        build_dataset(headers, records)
    }

    /// Parse the configured (or first) worksheet of a workbook.
    fn parse_workbook(&self, path: &Path) -> Result<Dataset> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| RecastError::Spreadsheet(format!("Failed to open workbook: {}", e)))?;

        let sheet_name = match &self.config.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| RecastError::EmptyData("Workbook contains no sheets".to_string()))?,
        };

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            RecastError::Spreadsheet(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(cells) => cells.iter().map(|c| cell_text(c).trim().to_string()).collect(),
            None => return Err(RecastError::EmptyData("No header row found".to_string())),
        };

        let records = rows
            .map(|cells| cells.iter().map(cell_text).collect())
            .collect();

        debug!(sheet = %sheet_name, "read worksheet");
        build_dataset(headers, records)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate headers and turn records into rows.
fn build_dataset(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Dataset> {
    if headers.iter().all(|h| h.is_empty()) {
        return Err(RecastError::EmptyData("No columns found".to_string()));
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| {
            let field = Field::from_header(required);
            !headers.iter().any(|h| Field::from_header(h) == field)
        })
        .map(|c| c.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(RecastError::MissingColumns { columns: missing });
    }

    let rows: Vec<Row> = records
        .iter()
        .filter(|record| record.iter().any(|v| !v.trim().is_empty()))
        .map(|record| Row::from_record(&headers, record))
        .collect();

    if rows.is_empty() {
        return Err(RecastError::EmptyData("No data rows found".to_string()));
    }

    Ok(Dataset::new(headers, rows))
}

/// Decode bytes as UTF-8, falling back to Windows-1252 for legacy exports.
fn decode_text(bytes: &[u8]) -> (String, &'static str) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.trim_start_matches('\u{feff}').to_string(), "utf-8"),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            (decoded.into_owned(), "windows-1252")
        }
    }
}

/// Render a worksheet cell as text.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(RecastError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Higher count with consistent lines wins; tab breaks ties.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "State,Attribute,Question,Option1,Option2,Option3,Option4";

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_parse_delimited_rows() {
        let text = format!(
            "{HEADER}\nKerala,Dance,\"Which dance, classical?\",Kathakali,Bihu,Garba,Lavani\n"
        );
        let data = Loader::new().parse_delimited(&text, b',').unwrap();

        assert_eq!(data.len(), 1);
        let row = data.get(0).unwrap();
        assert_eq!(row.question, "Which dance, classical?");
        assert_eq!(row.options[0], "Kathakali");
        assert!(!data.is_dirty());
    }

    #[test]
    fn test_missing_columns_are_enumerated() {
        let text = "State,Question,Option1,Option2\nKerala,Q?,a,b\n";
        let err = Loader::new().parse_delimited(text, b',').unwrap_err();

        match err {
            RecastError::MissingColumns { columns } => {
                assert_eq!(columns, vec!["Attribute", "Option3", "Option4"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_records_are_skipped() {
        let text = format!("{HEADER}\n,,,,,,\nAssam,Food,Q?,a,b,c,d\n");
        let data = Loader::new().parse_delimited(&text, b',').unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.get(0).unwrap().state, "Assam");
    }

    #[test]
    fn test_header_only_is_empty_data() {
        let err = Loader::new().parse_delimited(HEADER, b',').unwrap_err();
        assert!(matches!(err, RecastError::EmptyData(_)));
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        let (text, encoding) = decode_text(b"caf\xe9");
        assert_eq!(text, "café");
        assert_eq!(encoding, "windows-1252");

        let (text, encoding) = decode_text("\u{feff}State".as_bytes());
        assert_eq!(text, "State");
        assert_eq!(encoding, "utf-8");
    }
}
