use serde_json::Value;
use tracing::debug;

use super::bitset::reconstruct_rows;
use super::dictionary::expand_values;
use super::errors::{DecodeError, DecodeResult};
use super::normalize::{fill_leading_null, replace_newlines};
use super::types::{
    ColumnDescriptor, CompressedRow, DEFAULT_NEWLINE_REPLACEMENT, DecodedRow, ValueDicts,
};

const DATA: &str = "/results/0/result/data";
const SELECT: &str = "/descriptor/Select";
const DATA_SOURCE: &str = "/dsr/DS/0";
const ROWS: &str = "/PH/0/DM0";
const COLUMN_TYPES: &str = "/PH/0/DM0/0/S";
const GROUP_KEY_KIND: u64 = 1;

#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub newline_replacement: String,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            newline_replacement: DEFAULT_NEWLINE_REPLACEMENT.to_string(),
        }
    }
}

/// Column names plus flat rows, one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedResponse {
    pub columns: Vec<String>,
    pub rows: Vec<DecodedRow>,
}

impl DecodedResponse {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}

pub fn decode(response: &Value) -> DecodeResult<DecodedResponse> {
    decode_with(response, &DecodeOptions::default())
}

/// Decodes one report response.
///
/// Order matters: bitset copies may carry raw dictionary codes forward, so
/// reconstruction runs before dictionary expansion, and both before the
/// newline and leading-null passes.
pub fn decode_with(response: &Value, options: &DecodeOptions) -> DecodeResult<DecodedResponse> {
    let data = response
        .pointer(DATA)
        .ok_or(DecodeError::MissingKey(DATA))?;
    let source = data
        .pointer(DATA_SOURCE)
        .ok_or(DecodeError::MissingKey(DATA_SOURCE))?;
    let raw_rows = source
        .pointer(ROWS)
        .ok_or(DecodeError::MissingKey(ROWS))?
        .as_array()
        .ok_or_else(|| DecodeError::UnexpectedType {
            path: ROWS.to_string(),
            expected: "array",
        })?;

    if raw_rows.is_empty() {
        debug!(target: "pilgrim_stats::decode", "Response carries no rows");
        return Ok(DecodedResponse::default());
    }

    let columns = column_descriptors(raw_rows)?;
    let names = column_names(data)?;
    if names.len() != columns.len() {
        return Err(DecodeError::ColumnCount {
            names: names.len(),
            width: columns.len(),
        });
    }
    let dicts = value_dicts(source)?;

    let compressed = raw_rows
        .iter()
        .enumerate()
        .map(|(i, row)| CompressedRow::from_value(i, row))
        .collect::<DecodeResult<Vec<_>>>()?;

    let mut rows = reconstruct_rows(columns.len(), compressed, None)?;
    expand_values(&columns, &mut rows, &dicts)?;
    replace_newlines(&mut rows, &options.newline_replacement);
    fill_leading_null(&mut rows);

    debug!(
        target: "pilgrim_stats::decode",
        columns = names.len(),
        rows = rows.len(),
        "Decoded response"
    );

    Ok(DecodedResponse {
        columns: names,
        rows,
    })
}

fn column_descriptors(raw_rows: &[Value]) -> DecodeResult<Vec<ColumnDescriptor>> {
    let types = raw_rows
        .first()
        .and_then(|row| row.get("S"))
        .ok_or(DecodeError::MissingKey(COLUMN_TYPES))?
        .as_array()
        .ok_or_else(|| DecodeError::UnexpectedType {
            path: COLUMN_TYPES.to_string(),
            expected: "array",
        })?;
    Ok(types.iter().map(ColumnDescriptor::from_value).collect())
}

/// Group-key columns are named after their source property, measures after
/// their `Value`.
fn column_names(data: &Value) -> DecodeResult<Vec<String>> {
    let select = data
        .pointer(SELECT)
        .ok_or(DecodeError::MissingKey(SELECT))?
        .as_array()
        .ok_or_else(|| DecodeError::UnexpectedType {
            path: SELECT.to_string(),
            expected: "array",
        })?;

    select
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (pointer, expected) = if item.get("Kind").and_then(Value::as_u64)
                == Some(GROUP_KEY_KIND)
            {
                ("/GroupKeys/0/Source/Property", "group key source property")
            } else {
                ("/Value", "measure value name")
            };
            item.pointer(pointer)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| DecodeError::UnexpectedType {
                    path: format!("{SELECT}/{i}{pointer}"),
                    expected,
                })
        })
        .collect()
}

fn value_dicts(source: &Value) -> DecodeResult<ValueDicts> {
    let Some(raw) = source.get("ValueDicts") else {
        return Ok(ValueDicts::new());
    };
    let raw = raw.as_object().ok_or_else(|| DecodeError::UnexpectedType {
        path: "/dsr/DS/0/ValueDicts".to_string(),
        expected: "object",
    })?;

    raw.iter()
        .map(|(name, values)| match values {
            Value::Array(values) => Ok((name.clone(), values.clone())),
            _ => Err(DecodeError::UnexpectedType {
                path: format!("/dsr/DS/0/ValueDicts/{name}"),
                expected: "array",
            }),
        })
        .collect()
}
