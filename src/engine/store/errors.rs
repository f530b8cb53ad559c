use thiserror::Error;

use crate::engine::template::TemplateError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("Table {table} has {found} columns, rows carry {expected}")]
    ColumnMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("Table {0} has no date column")]
    MissingDateColumn(String),

    #[error("Stored template {name} is invalid: {source}")]
    Template {
        name: String,
        #[source]
        source: TemplateError,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
