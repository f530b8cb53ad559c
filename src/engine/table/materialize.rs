use serde_json::Value;

use super::types::{StatsTable, TableValue};
use crate::engine::powerbi::{DecodeError, DecodeResult, DecodedRow, NOT_AVAILABLE, parse_measure};

pub const DEFAULT_MEASURE_COLUMN: &str = "M0";

pub fn materialize<D: AsRef<str>>(
    columns: &[String],
    rows: Vec<DecodedRow>,
    dimensions: &[D],
) -> DecodeResult<StatsTable> {
    materialize_with(columns, rows, dimensions, DEFAULT_MEASURE_COLUMN)
}

/// Builds the table for one decoded response.
///
/// A response with no columns and no rows becomes a single placeholder row,
/// `N/A` for every dimension and 0 for the measure, so every slice and date
/// still has a row to store.
pub fn materialize_with<D: AsRef<str>>(
    columns: &[String],
    rows: Vec<DecodedRow>,
    dimensions: &[D],
    measure_column: &str,
) -> DecodeResult<StatsTable> {
    if columns.is_empty() && rows.is_empty() {
        return Ok(placeholder(dimensions.len(), measure_column));
    }

    let measure_index = columns
        .iter()
        .position(|c| c == measure_column)
        .ok_or_else(|| DecodeError::MissingMeasureColumn(measure_column.to_string()))?;

    let table_rows = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() != columns.len() {
                return Err(DecodeError::RowWidth {
                    row: i,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            row.into_iter()
                .enumerate()
                .map(|(idx, cell)| {
                    if idx == measure_index {
                        parse_measure(i, &cell).map(TableValue::Count)
                    } else {
                        Ok(text_cell(cell))
                    }
                })
                .collect::<DecodeResult<Vec<_>>>()
        })
        .collect::<DecodeResult<Vec<_>>>()?;

    Ok(StatsTable::new(columns.to_vec(), table_rows, measure_index))
}

fn placeholder(dimension_count: usize, measure_column: &str) -> StatsTable {
    let mut columns: Vec<String> = (1..=dimension_count).map(|i| format!("Dim{i}")).collect();
    columns.push(measure_column.to_string());

    let mut row = vec![TableValue::Text(NOT_AVAILABLE.to_string()); dimension_count];
    row.push(TableValue::Count(0));

    StatsTable::new(columns, vec![row], dimension_count)
}

fn text_cell(cell: Value) -> TableValue {
    match cell {
        Value::Null => TableValue::Text(NOT_AVAILABLE.to_string()),
        Value::String(s) => TableValue::Text(s),
        other => TableValue::Text(other.to_string()),
    }
}
