//! Raw text reader.

use crate::error::Result;

/// Decode file contents as UTF-8 text.
pub fn read(data: &[u8]) -> Result<String> {
    Ok(String::from_utf8(data.to_vec())?)
}
