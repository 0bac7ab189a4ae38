//! Error types for loading datasets

use thiserror::Error;

/// Errors that can occur while turning a file into rows
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Large-file reader failure
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// File exceeds the configured size limit
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: u64 },

    /// Dataset exceeds the configured row limit
    #[error("Too many rows: {rows} (max {max_rows})")]
    TooManyRows { rows: usize, max_rows: usize },

    #[error("Empty file")]
    EmptyFile,

    #[error("No columns found")]
    NoColumns,

    /// Neither the extension nor the content identify a supported format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
