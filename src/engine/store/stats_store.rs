use async_trait::async_trait;
use chrono::NaiveDate;

use super::errors::StoreResult;
use super::types::{QueryTemplates, WriteMode};
use crate::engine::powerbi::LastDaySummary;
use crate::engine::table::StatsTable;

/// Persistence used by the update jobs and the read-side API.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn load_templates(&self) -> StoreResult<QueryTemplates>;

    /// Writes every row of `rows` under `date`; returns the number of rows sent.
    async fn write_table(
        &self,
        table: &str,
        date: NaiveDate,
        rows: &StatsTable,
        mode: WriteMode,
    ) -> StoreResult<usize>;

    /// Records the published last-day figure unless that day is already stored.
    async fn insert_last_day(&self, summary: &LastDaySummary) -> StoreResult<()>;

    async fn upsert_pilgrims_now(&self, date: NaiveDate, pilgrims: i64) -> StoreResult<()>;

    /// Latest date in `table` and the sum of its pilgrims on that date.
    async fn latest_total(&self, table: &str) -> StoreResult<Option<(NaiveDate, i64)>>;

    async fn latest_pilgrims(&self) -> StoreResult<Option<(NaiveDate, i64)>>;
}
