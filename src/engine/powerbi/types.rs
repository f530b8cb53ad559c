use serde_json::Value;
use std::collections::HashMap;

use super::errors::{DecodeError, DecodeResult};

/// Sentinel written where the report has no value.
pub const NOT_AVAILABLE: &str = "N/A";

pub const DEFAULT_NEWLINE_REPLACEMENT: &str = " ";

/// A fully reconstructed row: one cell per column.
pub type DecodedRow = Vec<Value>;

/// Dictionary id (`D0`, `D1`, ...) to its ordered categorical values.
pub type ValueDicts = HashMap<String, Vec<Value>>;

/// Per-column metadata from the `S` array of the first `DM0` row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Name of the value dictionary the column is coded against (`DN`).
    pub dictionary: Option<String>,
}

impl ColumnDescriptor {
    pub fn raw() -> Self {
        Self { dictionary: None }
    }

    pub fn coded(dictionary: impl Into<String>) -> Self {
        Self {
            dictionary: Some(dictionary.into()),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            dictionary: value.get("DN").and_then(Value::as_str).map(str::to_string),
        }
    }
}

/// One `DM0` entry before bitset reconstruction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressedRow {
    pub cells: Vec<Value>,
    /// `R`: bit `i` set means column `i` repeats the previous row's value.
    pub copy_mask: u64,
    /// `Ø`: bit `i` set means column `i` is null.
    pub null_mask: u64,
}

impl CompressedRow {
    pub fn new(cells: Vec<Value>) -> Self {
        Self {
            cells,
            copy_mask: 0,
            null_mask: 0,
        }
    }

    pub fn with_copy_mask(mut self, mask: u64) -> Self {
        self.copy_mask = mask;
        self
    }

    pub fn with_null_mask(mut self, mask: u64) -> Self {
        self.null_mask = mask;
        self
    }

    pub fn has_masks(&self) -> bool {
        self.copy_mask != 0 || self.null_mask != 0
    }

    pub fn from_value(row: usize, value: &Value) -> DecodeResult<Self> {
        let cells = match value.get("C") {
            Some(Value::Array(cells)) => cells.clone(),
            Some(_) => {
                return Err(DecodeError::UnexpectedType {
                    path: format!("DM0[{row}].C"),
                    expected: "array",
                });
            }
            None => Vec::new(),
        };

        Ok(Self {
            cells,
            copy_mask: read_mask(row, value, "R")?,
            null_mask: read_mask(row, value, "Ø")?,
        })
    }
}

fn read_mask(row: usize, value: &Value, key: &str) -> DecodeResult<u64> {
    match value.get(key) {
        None => Ok(0),
        Some(mask) => mask.as_u64().ok_or_else(|| DecodeError::UnexpectedType {
            path: format!("DM0[{row}].{key}"),
            expected: "non-negative integer bitset",
        }),
    }
}
