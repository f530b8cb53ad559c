mod materialize;
mod types;


pub use materialize::{DEFAULT_MEASURE_COLUMN, materialize, materialize_with};
pub use types::{StatsTable, TableValue};
