use thiserror::Error;

/// Malformed or self-inconsistent report payloads.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("Missing key in response: {0}")]
    MissingKey(&'static str),

    #[error("Unexpected value at {path}: expected {expected}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
    },

    #[error("Row {row} copies from a previous row but none is available")]
    MissingPreviousRow { row: usize },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Descriptor names {names} columns but rows carry {width}")]
    ColumnCount { names: usize, width: usize },

    #[error("Value dictionary not found: {0}")]
    MissingDictionary(String),

    #[error("Index {index} out of range for value dictionary {dictionary} ({len} entries)")]
    DictionaryIndex {
        dictionary: String,
        index: String,
        len: usize,
    },

    #[error("Measure column not found: {0}")]
    MissingMeasureColumn(String),

    #[error("Row {row} has a non-integer measure: {value}")]
    InvalidMeasure { row: usize, value: String },

    #[error("Invalid last-day summary: {0}")]
    InvalidSummary(String),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
