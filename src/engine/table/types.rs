use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TableValue {
    Text(String),
    Count(i64),
}

impl TableValue {
    pub fn as_count(&self) -> Option<i64> {
        match self {
            TableValue::Count(n) => Some(*n),
            TableValue::Text(_) => None,
        }
    }
}

impl From<&str> for TableValue {
    fn from(s: &str) -> Self {
        TableValue::Text(s.to_string())
    }
}

impl From<i64> for TableValue {
    fn from(n: i64) -> Self {
        TableValue::Count(n)
    }
}

/// Rows of one statistics slice, columns in report order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsTable {
    columns: Vec<String>,
    rows: Vec<Vec<TableValue>>,
    measure_index: usize,
}

impl StatsTable {
    pub(super) fn new(columns: Vec<String>, rows: Vec<Vec<TableValue>>, measure_index: usize) -> Self {
        Self {
            columns,
            rows,
            measure_index,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<TableValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn measure_column(&self) -> &str {
        &self.columns[self.measure_index]
    }

    /// Sum of the measure column.
    pub fn measure_total(&self) -> i64 {
        self.rows
            .iter()
            .filter_map(|row| row.get(self.measure_index).and_then(TableValue::as_count))
            .sum()
    }

    /// Rows as JSON objects keyed by column name.
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(name, value)| {
                        let value = match value {
                            TableValue::Text(s) => Value::String(s.clone()),
                            TableValue::Count(n) => Value::from(*n),
                        };
                        (name.clone(), value)
                    })
                    .collect();
                Value::Object(record)
            })
            .collect()
    }
}
