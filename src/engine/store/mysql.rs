use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::mysql::{MySql, MySqlPool, MySqlPoolOptions};
use sqlx::QueryBuilder;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::errors::{StoreError, StoreResult};
use super::sql::{self, BATCH_SIZE, DATE_COLUMN, validate_table_name};
use super::stats_store::StatsStore;
use super::types::{QueryTemplates, WriteMode};
use crate::engine::powerbi::LastDaySummary;
use crate::engine::table::{StatsTable, TableValue};
use crate::shared::config::model::{DatabaseConfig, StatsConfig};

pub struct MySqlStore {
    pool: MySqlPool,
    pilgrims_table: String,
    templates_table: String,
}

impl MySqlStore {
    /// Connects, retrying `connect_retries` times `retry_delay_secs` apart.
    pub async fn connect(database: &DatabaseConfig, stats: &StatsConfig) -> StoreResult<Self> {
        let mut attempt = 0;
        let pool = loop {
            attempt += 1;
            match MySqlPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if attempt < database.connect_retries.max(1) => {
                    warn!(
                        target: "pilgrim_stats::store",
                        attempt,
                        error = %e,
                        "Database connection failed; retrying"
                    );
                    tokio::time::sleep(Duration::from_secs(database.retry_delay_secs)).await;
                }
                Err(e) => return Err(e.into()),
            }
        };
        info!(target: "pilgrim_stats::store", attempt, "Connected to database");
        Self::from_pool(pool, stats)
    }

    pub fn from_pool(pool: MySqlPool, stats: &StatsConfig) -> StoreResult<Self> {
        Ok(Self {
            pool,
            pilgrims_table: validate_table_name(&stats.pilgrims_table)?.to_string(),
            templates_table: validate_table_name(&stats.templates_table)?.to_string(),
        })
    }

    async fn columns_of(&self, table: &str) -> StoreResult<Vec<String>> {
        Ok(sqlx::query_scalar::<_, String>(sql::table_columns())
            .bind(table)
            .fetch_all(&self.pool)
            .await?)
    }
}

#[async_trait]
impl StatsStore for MySqlStore {
    async fn load_templates(&self) -> StoreResult<QueryTemplates> {
        let rows = sqlx::query_as::<_, (String, String)>(&sql::select_templates(
            &self.templates_table,
        ))
        .fetch_all(&self.pool)
        .await?;
        debug!(target: "pilgrim_stats::store", count = rows.len(), "Loaded query templates");
        QueryTemplates::from_rows(rows)
    }

    async fn write_table(
        &self,
        table: &str,
        date: NaiveDate,
        rows: &StatsTable,
        mode: WriteMode,
    ) -> StoreResult<usize> {
        let table = validate_table_name(table)?;
        let columns = self.columns_of(table).await?;
        if !columns.iter().any(|c| c == DATE_COLUMN) {
            return Err(StoreError::MissingDateColumn(table.to_string()));
        }
        let expected = rows.columns().len() + 1;
        if columns.len() != expected {
            return Err(StoreError::ColumnMismatch {
                table: table.to_string(),
                expected,
                found: columns.len(),
            });
        }

        let mut tx = self.pool.begin().await?;
        if mode == WriteMode::Incremental {
            let deleted = sqlx::query(&sql::delete_date(table))
                .bind(date)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            debug!(target: "pilgrim_stats::store", table, %date, deleted, "Cleared date before insert");
        }

        let prefix = sql::insert_prefix(table, &columns);
        let suffix = sql::upsert_suffix(&columns);
        for chunk in rows.rows().chunks(BATCH_SIZE) {
            let mut builder: QueryBuilder<MySql> = QueryBuilder::new(prefix.as_str());
            builder.push_values(chunk, |mut b, row| {
                b.push_bind(date);
                for value in row {
                    match value {
                        TableValue::Text(text) => {
                            b.push_bind(text.clone());
                        }
                        TableValue::Count(count) => {
                            b.push_bind(*count);
                        }
                    }
                }
            });
            builder.push(suffix.as_str());
            builder.build().execute(&mut *tx).await?;
        }
        tx.commit().await?;

        info!(
            target: "pilgrim_stats::store",
            table,
            %date,
            rows = rows.len(),
            ?mode,
            "Wrote statistics"
        );
        Ok(rows.len())
    }

    async fn insert_last_day(&self, summary: &LastDaySummary) -> StoreResult<()> {
        sqlx::query(&sql::insert_ignore_pilgrims(&self.pilgrims_table))
            .bind(summary.date)
            .bind(summary.pilgrims)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn upsert_pilgrims_now(&self, date: NaiveDate, pilgrims: i64) -> StoreResult<()> {
        sqlx::query(&sql::upsert_pilgrims(&self.pilgrims_table))
            .bind(date)
            .bind(pilgrims)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn latest_total(&self, table: &str) -> StoreResult<Option<(NaiveDate, i64)>> {
        let table = validate_table_name(table)?;
        let latest = sqlx::query_scalar::<_, Option<NaiveDate>>(&sql::latest_date(table))
            .fetch_one(&self.pool)
            .await?;
        let Some(latest) = latest else {
            return Ok(None);
        };
        let total = sqlx::query_scalar::<_, Option<i64>>(&sql::total_on_date(table))
            .bind(latest)
            .fetch_one(&self.pool)
            .await?;
        Ok(Some((latest, total.unwrap_or_default())))
    }

    async fn latest_pilgrims(&self) -> StoreResult<Option<(NaiveDate, i64)>> {
        Ok(
            sqlx::query_as::<_, (NaiveDate, i64)>(&sql::latest_pilgrims(&self.pilgrims_table))
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}
