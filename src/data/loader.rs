//! File loading entry point.
//!
//! Picks a parser from the file extension (falling back to sniffing the
//! content) and a reader from the file size: small files are parsed eagerly,
//! large ones go through polars.

use super::csv_parser::{detect_delimiter, parse_csv_content};
use super::error::{DataError, DataResult};
use super::frame_source::FrameSource;
use super::json_parser::parse_json_content;
use crate::constants::{MAX_CSV_ROWS, MAX_CSV_SIZE_MB, MAX_FILE_SIZE_MB};
use crate::perf::ScopedTimer;
use crate::state::{Action, AppState};
use crate::types::Row;
use std::io::Read;
use std::path::Path;

/// Bytes inspected when the extension does not name a format
const SNIFF_BYTES: u64 = 4096;

/// Size and row limits applied while loading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadLimits {
    pub max_rows: usize,
    /// Files above this size are read through polars
    pub max_eager_size_mb: u64,
    /// Files above this size are refused
    pub max_file_size_mb: u64,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            max_rows: MAX_CSV_ROWS,
            max_eager_size_mb: MAX_CSV_SIZE_MB,
            max_file_size_mb: MAX_FILE_SIZE_MB,
        }
    }
}

/// Supported input formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    pub fn label(&self) -> &'static str {
        match self {
            DataFormat::Csv => "CSV",
            DataFormat::Json => "JSON",
        }
    }
}

/// A parsed file
#[derive(Clone, Debug)]
pub struct LoadedData {
    /// File stem, used as a default chart title
    pub name: String,
    pub format: DataFormat,
    pub rows: Vec<Row>,
}

/// Load a CSV/TSV or JSON file into rows
pub fn load_file(path: &Path, limits: &LoadLimits) -> DataResult<LoadedData> {
    let _timer = ScopedTimer::stage("load_file");

    let size = std::fs::metadata(path)?.len();
    let size_mb = size / (1024 * 1024);
    if size_mb > limits.max_file_size_mb {
        return Err(DataError::TooLarge {
            size_mb,
            max_mb: limits.max_file_size_mb,
        });
    }
    if size == 0 {
        return Err(DataError::EmptyFile);
    }

    let format = detect_format(path)?;
    let rows = if size_mb > limits.max_eager_size_mb {
        tracing::debug!(size_mb, "Loading large file through polars");
        let source = match format {
            DataFormat::Csv => {
                let delimiter = detect_delimiter(path, &read_head(path)?);
                FrameSource::from_csv(path, delimiter as u8)?
            }
            DataFormat::Json => FrameSource::from_json(path)?,
        };
        source.to_rows(limits.max_rows)?
    } else {
        let content = std::fs::read_to_string(path)?;
        match format {
            DataFormat::Csv => {
                parse_csv_content(&content, detect_delimiter(path, &content), limits.max_rows)?
            }
            DataFormat::Json => {
                let rows = parse_json_content(&content)?;
                if rows.len() > limits.max_rows {
                    return Err(DataError::TooManyRows {
                        rows: rows.len(),
                        max_rows: limits.max_rows,
                    });
                }
                rows
            }
        }
    };

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Data")
        .to_string();

    tracing::debug!(
        "Loaded {} {} with {} rows",
        format.label(),
        path.display(),
        rows.len()
    );
    Ok(LoadedData { name, format, rows })
}

/// Load a file and hand its rows to `state`.
///
/// On failure the caller's state is untouched.
pub fn load_into_state(
    state: &AppState,
    path: &Path,
    limits: &LoadLimits,
    sample_size: usize,
) -> DataResult<AppState> {
    let loaded = load_file(path, limits)?;
    Ok(state
        .clone()
        .reduce_with_sample(Action::DataLoaded(loaded.rows), sample_size))
}

/// Format from the extension, or from the first non-blank byte of the file
pub fn detect_format(path: &Path) -> DataResult<DataFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" | "tsv" | "txt" => return Ok(DataFormat::Csv),
        "json" => return Ok(DataFormat::Json),
        "xls" | "xlsx" | "ods" => return Err(DataError::UnsupportedFormat(ext)),
        _ => {}
    }

    let head = read_head(path)?;
    if head.contains('\0') {
        return Err(DataError::UnsupportedFormat(ext));
    }
    match head.trim_start().chars().next() {
        Some('{' | '[') => Ok(DataFormat::Json),
        Some(_) => Ok(DataFormat::Csv),
        None => Err(DataError::EmptyFile),
    }
}

/// The first few KB of a file, lossily decoded
fn read_head(path: &Path) -> DataResult<String> {
    let mut buf = Vec::new();
    std::fs::File::open(path)?
        .take(SNIFF_BYTES)
        .read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
