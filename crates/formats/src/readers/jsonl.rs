//! JSONL (newline-delimited JSON) reader.

use crate::error::{FormatError, Result};
use serde_json::Value;
use std::io::BufRead;

/// Parse JSONL contents into one value per non-blank line.
///
/// Parse failures carry the 1-based line number.
pub fn read(data: &[u8]) -> Result<Vec<Value>> {
    let mut records = Vec::new();

    for (idx, line) in data.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let value: Value =
            serde_json::from_str(trimmed).map_err(|source| FormatError::JsonLine {
                line: idx + 1,
                source,
            })?;
        records.push(value);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_records() {
        let data = b"{\"id\": 1}\n{\"id\": 2}\n";
        let records = read(data).unwrap();
        assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let data = b"{\"id\": 1}\n\n   \n{\"id\": 2}\n";
        let records = read(data).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_error_carries_line_number() {
        let data = b"{\"id\": 1}\nnot json\n";
        let err = read(data).unwrap_err();
        match err {
            FormatError::JsonLine { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_empty_input() {
        assert!(read(b"").unwrap().is_empty());
    }
}
