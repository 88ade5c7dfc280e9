//! Parquet reader.
//!
//! Decodes the byte buffer through the parquet arrow reader and flattens
//! record batches into a [`Frame`]. Numeric, boolean, and string columns map
//! to native JSON scalars; binary columns are base64-encoded; anything else
//! (timestamps, decimals, nested types) goes through arrow's display
//! formatting as a string.

use crate::error::{FormatError, Result};
use crate::frame::Frame;
use arrow::array::{
    Array, BinaryArray, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array, Int8Array, LargeBinaryArray, LargeStringArray, StringArray, UInt16Array,
    UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::util::display::array_value_to_string;
use base64::Engine as _;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value;

/// Parse Parquet contents into a [`Frame`].
pub fn read(data: &[u8]) -> Result<Frame> {
    let bytes = Bytes::copy_from_slice(data);
    let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let mut frame = Frame::new(schema.fields().iter().map(|f| f.name().clone()).collect());

    for batch in reader {
        let batch = batch?;
        for row in 0..batch.num_rows() {
            let mut values = Vec::with_capacity(batch.num_columns());
            for column in batch.columns() {
                values.push(value_at(column.as_ref(), row)?);
            }
            frame.push_row(values)?;
        }
    }

    Ok(frame)
}

fn downcast<'a, T: 'static>(array: &'a dyn Array) -> Result<&'a T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        FormatError::Arrow(ArrowError::CastError(format!(
            "Unexpected array layout for {:?}",
            array.data_type()
        )))
    })
}

/// Convert one arrow array cell to a JSON scalar.
fn value_at(array: &dyn Array, row: usize) -> Result<Value> {
    if array.is_null(row) {
        return Ok(Value::Null);
    }

    let value = match array.data_type() {
        DataType::Boolean => Value::Bool(downcast::<BooleanArray>(array)?.value(row)),
        DataType::Int8 => Value::from(downcast::<Int8Array>(array)?.value(row)),
        DataType::Int16 => Value::from(downcast::<Int16Array>(array)?.value(row)),
        DataType::Int32 => Value::from(downcast::<Int32Array>(array)?.value(row)),
        DataType::Int64 => Value::from(downcast::<Int64Array>(array)?.value(row)),
        DataType::UInt8 => Value::from(downcast::<UInt8Array>(array)?.value(row)),
        DataType::UInt16 => Value::from(downcast::<UInt16Array>(array)?.value(row)),
        DataType::UInt32 => Value::from(downcast::<UInt32Array>(array)?.value(row)),
        DataType::UInt64 => Value::from(downcast::<UInt64Array>(array)?.value(row)),
        DataType::Float32 => {
            float_value(f64::from(downcast::<Float32Array>(array)?.value(row)))
        }
        DataType::Float64 => float_value(downcast::<Float64Array>(array)?.value(row)),
        DataType::Utf8 => Value::String(downcast::<StringArray>(array)?.value(row).to_string()),
        DataType::LargeUtf8 => {
            Value::String(downcast::<LargeStringArray>(array)?.value(row).to_string())
        }
        DataType::Binary => {
            let bytes = downcast::<BinaryArray>(array)?.value(row);
            Value::String(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        DataType::LargeBinary => {
            let bytes = downcast::<LargeBinaryArray>(array)?.value(row);
            Value::String(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        // Timestamps, dates, decimals, nested types: formatted representation
        _ => Value::String(array_value_to_string(array, row)?),
    };

    Ok(value)
}

/// Non-finite floats have no JSON representation and become null.
fn float_value(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
