//! Error types for format parsing.

use thiserror::Error;

/// Errors that can occur while resolving a format or parsing file contents.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("'{0}' is not a valid input format (expected one of: text, csv, json, jsonl, parquet)")]
    UnsupportedFormat(String),

    #[error("Cannot infer input format from '{0}': pass input_format explicitly")]
    UnknownExtension(String),

    #[error("Invalid UTF-8 in text file: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSONL parse error at line {line}: {source}")]
    JsonLine {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Column count mismatch at row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Parquet read error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;
