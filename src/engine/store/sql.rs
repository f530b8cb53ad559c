use super::errors::{StoreError, StoreResult};

/// Rows per multi-row INSERT.
pub const BATCH_SIZE: usize = 500;

pub const DATE_COLUMN: &str = "date";

/// Table names are interpolated into statements, so only `[A-Za-z0-9_]+` passes.
pub fn validate_table_name(name: &str) -> StoreResult<&str> {
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        Ok(name)
    } else {
        Err(StoreError::InvalidTableName(name.to_string()))
    }
}

/// Column names come from the catalog; they are still quoted.
fn quote(column: &str) -> String {
    format!("`{}`", column.replace('`', "``"))
}

pub fn insert_prefix(table: &str, columns: &[String]) -> String {
    let columns: Vec<String> = columns.iter().map(|c| quote(c)).collect();
    format!("INSERT INTO {table} ({}) ", columns.join(", "))
}

pub fn upsert_suffix(columns: &[String]) -> String {
    let updates: Vec<String> = columns
        .iter()
        .map(|c| {
            let c = quote(c);
            format!("{c} = VALUES({c})")
        })
        .collect();
    format!(" ON DUPLICATE KEY UPDATE {}", updates.join(", "))
}

pub fn delete_date(table: &str) -> String {
    format!("DELETE FROM {table} WHERE {DATE_COLUMN} = ?")
}

pub fn table_columns() -> &'static str {
    "SELECT CAST(COLUMN_NAME AS CHAR) FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? ORDER BY ORDINAL_POSITION"
}

pub fn latest_date(table: &str) -> String {
    format!("SELECT MAX({DATE_COLUMN}) FROM {table}")
}

pub fn total_on_date(table: &str) -> String {
    format!("SELECT CAST(SUM(pilgrims) AS SIGNED) FROM {table} WHERE {DATE_COLUMN} = ?")
}

pub fn latest_pilgrims(table: &str) -> String {
    format!(
        "SELECT {DATE_COLUMN}, CAST(pilgrims AS SIGNED) FROM {table} ORDER BY {DATE_COLUMN} DESC LIMIT 1"
    )
}

pub fn insert_ignore_pilgrims(table: &str) -> String {
    format!("INSERT IGNORE INTO {table} ({DATE_COLUMN}, pilgrims) VALUES (?, ?)")
}

pub fn upsert_pilgrims(table: &str) -> String {
    format!(
        "INSERT INTO {table} ({DATE_COLUMN}, pilgrims) VALUES (?, ?) \
         ON DUPLICATE KEY UPDATE pilgrims = VALUES(pilgrims)"
    )
}

pub fn select_templates(table: &str) -> String {
    format!("SELECT CAST(template AS CHAR), CAST(query AS CHAR) FROM {table}")
}
