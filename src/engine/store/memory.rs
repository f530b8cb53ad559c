use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::errors::StoreResult;
use super::sql::validate_table_name;
use super::stats_store::StatsStore;
use super::types::{QueryTemplates, WriteMode};
use crate::engine::powerbi::LastDaySummary;
use crate::engine::table::{StatsTable, TableValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub date: NaiveDate,
    pub dimensions: Vec<TableValue>,
    pub pilgrims: i64,
}

/// Store kept entirely in memory. Rows are unique on date plus dimension
/// values, the way the MySQL tables are keyed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    templates: QueryTemplates,
    tables: RwLock<HashMap<String, Vec<StoredRow>>>,
    pilgrims: RwLock<BTreeMap<NaiveDate, i64>>,
}

impl MemoryStore {
    pub fn new(templates: QueryTemplates) -> Self {
        Self {
            templates,
            ..Self::default()
        }
    }

    pub async fn rows(&self, table: &str) -> Vec<StoredRow> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn pilgrims_on(&self, date: NaiveDate) -> Option<i64> {
        self.pilgrims.read().await.get(&date).copied()
    }
}

fn split_row(table: &StatsTable, row: &[TableValue], date: NaiveDate) -> StoredRow {
    let measure = table.measure_column();
    let mut dimensions = Vec::with_capacity(row.len().saturating_sub(1));
    let mut pilgrims = 0;
    for (column, value) in table.columns().iter().zip(row) {
        if column == measure {
            pilgrims = value.as_count().unwrap_or_default();
        } else {
            dimensions.push(value.clone());
        }
    }
    StoredRow {
        date,
        dimensions,
        pilgrims,
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn load_templates(&self) -> StoreResult<QueryTemplates> {
        Ok(self.templates.clone())
    }

    async fn write_table(
        &self,
        table: &str,
        date: NaiveDate,
        rows: &StatsTable,
        mode: WriteMode,
    ) -> StoreResult<usize> {
        let table = validate_table_name(table)?;
        let mut tables = self.tables.write().await;
        let stored = tables.entry(table.to_string()).or_default();

        if mode == WriteMode::Incremental {
            stored.retain(|r| r.date != date);
        }
        for row in rows.rows() {
            let row = split_row(rows, row, date);
            match stored
                .iter_mut()
                .find(|r| r.date == row.date && r.dimensions == row.dimensions)
            {
                Some(existing) => *existing = row,
                None => stored.push(row),
            }
        }
        Ok(rows.len())
    }

    async fn insert_last_day(&self, summary: &LastDaySummary) -> StoreResult<()> {
        self.pilgrims
            .write()
            .await
            .entry(summary.date)
            .or_insert(summary.pilgrims);
        Ok(())
    }

    async fn upsert_pilgrims_now(&self, date: NaiveDate, pilgrims: i64) -> StoreResult<()> {
        self.pilgrims.write().await.insert(date, pilgrims);
        Ok(())
    }

    async fn latest_total(&self, table: &str) -> StoreResult<Option<(NaiveDate, i64)>> {
        let table = validate_table_name(table)?;
        let tables = self.tables.read().await;
        let Some(rows) = tables.get(table) else {
            return Ok(None);
        };
        Ok(rows.iter().map(|r| r.date).max().map(|latest| {
            let total = rows
                .iter()
                .filter(|r| r.date == latest)
                .map(|r| r.pilgrims)
                .sum();
            (latest, total)
        }))
    }

    async fn latest_pilgrims(&self) -> StoreResult<Option<(NaiveDate, i64)>> {
        Ok(self
            .pilgrims
            .read()
            .await
            .last_key_value()
            .map(|(date, pilgrims)| (*date, *pilgrims)))
    }
}
