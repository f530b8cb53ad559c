mod errors;
mod memory;
mod mysql;
mod sql;
mod stats_store;
mod types;


pub use errors::{StoreError, StoreResult};
pub use memory::{MemoryStore, StoredRow};
pub use mysql::MySqlStore;
pub use sql::{BATCH_SIZE, validate_table_name};
pub use stats_store::StatsStore;
pub use types::{
    ANY_DAY_TEMPLATE, LAST_DAY_TEMPLATE, QueryTemplates, WriteMode, YEAR_MONTH_TEMPLATE,
};
