use serde_json::Value;

use super::errors::{DecodeError, DecodeResult};
use super::types::{DecodedRow, NOT_AVAILABLE};

/// Measure values arrive as strings with a trailing type marker (`"1234L"`).
const MEASURE_TYPE_MARKER: char = 'L';

pub fn replace_newlines(rows: &mut [DecodedRow], replacement: &str) {
    for cell in rows.iter_mut().flat_map(|row| row.iter_mut()) {
        if let Value::String(s) = cell {
            if s.contains('\n') {
                *s = s.replace('\n', replacement);
            }
        }
    }
}

/// Only the leading cell is filled here; the report omits it most often.
pub fn fill_leading_null(rows: &mut [DecodedRow]) {
    for row in rows.iter_mut() {
        if let Some(first @ Value::Null) = row.first_mut() {
            *first = Value::String(NOT_AVAILABLE.to_string());
        }
    }
}

/// Parses a measure cell into an integer, stripping the type marker.
pub fn parse_measure(row: usize, value: &Value) -> DecodeResult<i64> {
    let invalid = || DecodeError::InvalidMeasure {
        row,
        value: value.to_string(),
    };

    match value {
        Value::Number(n) => n.as_i64().ok_or_else(invalid),
        Value::String(s) => {
            let digits = s.strip_suffix(MEASURE_TYPE_MARKER).unwrap_or(s);
            digits.trim().parse::<i64>().map_err(|_| invalid())
        }
        _ => Err(invalid()),
    }
}
