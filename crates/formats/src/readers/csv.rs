//! CSV reader.
//!
//! Column names come from the header row, from explicitly supplied names,
//! or are generated as `column_N` when neither is available. Scalar values
//! are inferred per cell (null, bool, integer, float, string).

use crate::error::{FormatError, Result};
use crate::frame::Frame;
use crate::ReadOptions;
use serde_json::Value;

/// Parse CSV contents into a [`Frame`].
pub fn read(data: &[u8], options: &ReadOptions) -> Result<Frame> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_headers)
        .delimiter(options.delimiter)
        .from_reader(data);

    let columns: Option<Vec<String>> = if options.has_headers {
        Some(reader.headers()?.iter().map(str::to_string).collect())
    } else {
        options.column_names.clone()
    };

    let mut frame: Option<Frame> = columns.map(Frame::new);

    for (i, record) in reader.records().enumerate() {
        let record = record?;

        // Without headers or explicit names, generate names from the width
        // of the first record
        let frame = frame.get_or_insert_with(|| {
            Frame::new((0..record.len()).map(|n| format!("column_{n}")).collect())
        });

        if record.len() != frame.num_columns() {
            return Err(FormatError::ColumnCount {
                row: i + 1,
                expected: frame.num_columns(),
                found: record.len(),
            });
        }

        frame.push_row(record.iter().map(infer_scalar).collect())?;
    }

    Ok(frame.unwrap_or_default())
}

/// Infer a JSON scalar from a CSV cell.
fn infer_scalar(value: &str) -> Value {
    if value.is_empty() {
        return Value::Null;
    }
    match value {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(int) = value.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = value.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(float) {
            return Value::Number(num);
        }
    }
    Value::String(value.to_string())
}
