//! Input formats for files-connection
//!
//! This crate provides the format registry (name and extension tables),
//! the parsed-result types, and the byte-buffer readers for the supported
//! input formats: text, CSV, JSON, JSONL, and Parquet.
//!
//! Parsing is delegated to the format crates (`csv`, `serde_json`,
//! `parquet`/`arrow`); this crate only maps their output into the uniform
//! [`ReadResult`] shape.

mod error;
mod frame;
mod readers;

use serde_json::Value;
use std::str::FromStr;

pub use error::{FormatError, Result};
pub use frame::Frame;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Raw UTF-8 text
    Text,
    /// Comma-separated values (tabular)
    Csv,
    /// A single JSON document
    Json,
    /// Newline-delimited JSON records
    Jsonl,
    /// Apache Parquet (tabular)
    Parquet,
}

impl Format {
    /// Infer a format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(Format::Text),
            "csv" => Some(Format::Csv),
            "json" => Some(Format::Json),
            "jsonl" | "ndjson" => Some(Format::Jsonl),
            "parquet" | "pq" => Some(Format::Parquet),
            _ => None,
        }
    }

    /// Canonical name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Jsonl => "jsonl",
            Format::Parquet => "parquet",
        }
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "jsonl" | "ndjson" => Ok(Format::Jsonl),
            "parquet" | "pq" => Ok(Format::Parquet),
            other => Err(FormatError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-call parser configuration.
///
/// Only CSV consumes these today; the struct participates in read-cache
/// keys, so it stays `Hash`/`Eq`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadOptions {
    /// CSV delimiter character (default: `,`)
    pub delimiter: u8,

    /// Whether the CSV has a header row (default: true)
    pub has_headers: bool,

    /// Column names to use when `has_headers` is false. Must match the
    /// column count of the file. Without them, names are generated as
    /// `column_0`, `column_1`, ...
    pub column_names: Option<Vec<String>>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            column_names: None,
        }
    }
}

/// Parsed file contents.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadResult {
    /// Raw text (`Format::Text`)
    Text(String),
    /// A single JSON document (`Format::Json`)
    Json(Value),
    /// JSONL records, one per non-blank line (`Format::Jsonl`)
    Records(Vec<Value>),
    /// Tabular data (`Format::Csv`, `Format::Parquet`)
    Frame(Frame),
}

impl ReadResult {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ReadResult::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ReadResult::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_records(&self) -> Option<&[Value]> {
        match self {
            ReadResult::Records(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            ReadResult::Frame(f) => Some(f),
            _ => None,
        }
    }
}

/// Parse fetched file contents according to `format`.
pub fn parse(format: Format, data: &[u8], options: &ReadOptions) -> Result<ReadResult> {
    match format {
        Format::Text => Ok(ReadResult::Text(readers::text::read(data)?)),
        Format::Csv => Ok(ReadResult::Frame(readers::csv::read(data, options)?)),
        Format::Json => Ok(ReadResult::Json(readers::json::read(data)?)),
        Format::Jsonl => Ok(ReadResult::Records(readers::jsonl::read(data)?)),
        Format::Parquet => Ok(ReadResult::Frame(readers::parquet::read(data)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("txt"), Some(Format::Text));
        assert_eq!(Format::from_extension("csv"), Some(Format::Csv));
        assert_eq!(Format::from_extension("json"), Some(Format::Json));
        assert_eq!(Format::from_extension("jsonl"), Some(Format::Jsonl));
        assert_eq!(Format::from_extension("ndjson"), Some(Format::Jsonl));
        assert_eq!(Format::from_extension("parquet"), Some(Format::Parquet));
        assert_eq!(Format::from_extension("PQ"), Some(Format::Parquet));
        assert_eq!(Format::from_extension("pdf"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("csv".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!("Text".parse::<Format>().unwrap(), Format::Text);
        assert_eq!("ndjson".parse::<Format>().unwrap(), Format::Jsonl);

        let err = "pickle".parse::<Format>().unwrap_err();
        assert!(matches!(err, FormatError::UnsupportedFormat(ref s) if s == "pickle"));
        assert!(err.to_string().contains("not a valid input format"));
    }

    #[test]
    fn test_parse_dispatch() {
        let options = ReadOptions::default();

        let result = parse(Format::Text, b"hello", &options).unwrap();
        assert_eq!(result.as_text(), Some("hello"));

        let result = parse(Format::Json, br#"{"a":1}"#, &options).unwrap();
        assert_eq!(result.as_json().unwrap()["a"], 1);

        let result = parse(Format::Csv, b"a,b\n1,2\n", &options).unwrap();
        assert_eq!(result.as_frame().unwrap().num_rows(), 1);
    }
}
