//! JSON document reader.

use crate::error::Result;
use serde_json::Value;

/// Parse a single JSON document.
pub fn read(data: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use serde_json::json;

    #[test]
    fn test_read_object() {
        let value = read(br#"{"name": "alice", "tags": [1, 2]}"#).unwrap();
        assert_eq!(value, json!({"name": "alice", "tags": [1, 2]}));
    }

    #[test]
    fn test_read_invalid() {
        let err = read(b"{not json").unwrap_err();
        assert!(matches!(err, FormatError::Json(_)));
    }
}
