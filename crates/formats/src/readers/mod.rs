//! Byte-buffer readers, one module per input format.

pub(crate) mod csv;
pub(crate) mod json;
pub(crate) mod jsonl;
pub(crate) mod parquet;
pub(crate) mod text;
