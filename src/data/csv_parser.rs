//! CSV and TSV file parsing
//!
//! Parses delimited text into rows keyed by the header line. Values are
//! kept as strings; typing happens later in the inference stage.
//!
//! ## Memory Limits
//!
//! Files with more than [`MAX_CSV_ROWS`] rows are rejected by default;
//! callers can pass their own limit (see [`LoadLimits`]).
//!
//! [`LoadLimits`]: crate::data::LoadLimits

use crate::constants::MAX_CSV_ROWS;
use crate::data::error::{DataError, DataResult};
use crate::types::{Cell, Row};
use std::collections::HashSet;
use std::path::Path;

/// Parse a CSV or TSV file into rows
///
/// The delimiter comes from the file extension (.tsv uses tab) or, failing
/// that, from whichever delimiter appears most often in the first lines.
pub fn parse_csv_file(path: &Path, max_rows: usize) -> DataResult<Vec<Row>> {
    let content = std::fs::read_to_string(path)?;
    let delimiter = detect_delimiter(path, &content);
    parse_csv_content(&content, delimiter, max_rows)
}

/// Parse CSV/TSV content from a string
///
/// Blank lines are skipped. A record shorter than the header simply lacks
/// the trailing keys; fields beyond the header are ignored.
pub fn parse_csv_content(content: &str, delimiter: char, max_rows: usize) -> DataResult<Vec<Row>> {
    if content.trim().is_empty() {
        return Err(DataError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = dedupe_headers(reader.headers()?.iter());
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataError::NoColumns);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if rows.len() >= max_rows {
            return Err(DataError::TooManyRows {
                rows: rows.len() + 1, // +1 for the current row that exceeded limit
                max_rows,
            });
        }
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, field)| (name.as_str(), Cell::text(field)))
            .collect();
        rows.push(row);
    }

    tracing::debug!(
        rows = rows.len(),
        columns = headers.len(),
        delimiter = ?delimiter,
        "Parsed CSV"
    );
    Ok(rows)
}

/// Parse CSV content with the default row limit, detecting the delimiter
pub fn parse_csv_str(content: &str) -> DataResult<Vec<Row>> {
    parse_csv_content(content, sniff_delimiter(content), MAX_CSV_ROWS)
}

/// Make repeated header names unique by suffixing `_1`, `_2`, ...
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    headers
        .map(|name| {
            let name = name.trim().to_string();
            if seen.insert(name.clone()) {
                return name;
            }
            let mut n = 1;
            loop {
                let candidate = format!("{name}_{n}");
                if seen.insert(candidate.clone()) {
                    return candidate;
                }
                n += 1;
            }
        })
        .collect()
}

/// Detect the delimiter to use for parsing
pub fn detect_delimiter(path: &Path, content: &str) -> char {
    // Check file extension first
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if ext.eq_ignore_ascii_case("tsv") {
            return '\t';
        }
    }
    sniff_delimiter(content)
}

/// Pick the most frequent delimiter in the first few lines
fn sniff_delimiter(content: &str) -> char {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let semicolon_count = first_lines.matches(';').count();

    if tab_count > comma_count && tab_count > semicolon_count {
        '\t'
    } else if semicolon_count > comma_count {
        ';'
    } else {
        ','
    }
}
