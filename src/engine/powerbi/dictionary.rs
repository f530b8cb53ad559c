use serde_json::{Number, Value};

use super::errors::{DecodeError, DecodeResult};
use super::types::{ColumnDescriptor, DecodedRow, ValueDicts};

/// Replaces integer codes in dictionary-coded columns with their dictionary
/// values. Cells that are not integers (strings, nulls) are left as they are,
/// so running this twice changes nothing.
pub fn expand_values(
    columns: &[ColumnDescriptor],
    rows: &mut [DecodedRow],
    dicts: &ValueDicts,
) -> DecodeResult<()> {
    for (idx, column) in columns.iter().enumerate() {
        let Some(name) = column.dictionary.as_deref() else {
            continue;
        };

        for row in rows.iter_mut() {
            let Some(cell) = row.get_mut(idx) else {
                continue;
            };
            let Some(code) = integer_code(cell) else {
                continue;
            };

            let values = dicts
                .get(name)
                .ok_or_else(|| DecodeError::MissingDictionary(name.to_string()))?;
            let expanded = code
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| values.get(i))
                .ok_or_else(|| DecodeError::DictionaryIndex {
                    dictionary: name.to_string(),
                    index: code.to_string(),
                    len: values.len(),
                })?;
            *cell = expanded.clone();
        }
    }
    Ok(())
}

fn integer_code(cell: &Value) -> Option<Number> {
    match cell {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.clone()),
        _ => None,
    }
}
