use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::errors::{StatsError, StatsResult};
use super::plan::month_plan;
use super::settings::StatsSettings;
use crate::engine::fetch::{ReportClient, monthly_pacing};
use crate::engine::powerbi::{decode_with, extract_last_day};
use crate::engine::scrape::headline_number;
use crate::engine::store::{
    ANY_DAY_TEMPLATE, LAST_DAY_TEMPLATE, QueryTemplates, StatsStore, WriteMode,
    YEAR_MONTH_TEMPLATE,
};
use crate::engine::table::{StatsTable, materialize_with};
use crate::engine::template::{QueryTemplate, TemplateAdjuster};
use crate::shared::datetime::{MonthNames, month_start, query_date};

pub struct StatsService {
    client: Arc<dyn ReportClient>,
    store: Arc<dyn StatsStore>,
    templates: QueryTemplates,
    adjuster: TemplateAdjuster,
    months: MonthNames,
    settings: StatsSettings,
}

impl StatsService {
    pub fn new(
        client: Arc<dyn ReportClient>,
        store: Arc<dyn StatsStore>,
        templates: QueryTemplates,
        adjuster: TemplateAdjuster,
        months: MonthNames,
        settings: StatsSettings,
    ) -> Self {
        Self {
            client,
            store,
            templates,
            adjuster,
            months,
            settings,
        }
    }

    /// Builds the service with the templates currently kept in `store`.
    pub async fn from_store(
        client: Arc<dyn ReportClient>,
        store: Arc<dyn StatsStore>,
        adjuster: TemplateAdjuster,
        months: MonthNames,
        settings: StatsSettings,
    ) -> StatsResult<Self> {
        let templates = store.load_templates().await?;
        if templates.is_complete() {
            info!(target: "pilgrim_stats::stats", "Query templates loaded");
        } else {
            warn!(target: "pilgrim_stats::stats", "Some query templates are missing");
        }
        Ok(Self::new(client, store, templates, adjuster, months, settings))
    }

    pub fn templates(&self) -> &QueryTemplates {
        &self.templates
    }

    pub fn timezone(&self) -> Tz {
        self.settings.timezone
    }

    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.settings.timezone)
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Stores the published last-day figure, then every slice of that day.
    /// Returns the published figure.
    pub async fn update_last_day(&self) -> StatsResult<i64> {
        let last_day = template(&self.templates.last_day, LAST_DAY_TEMPLATE)?;
        let year_month = template(&self.templates.year_month, YEAR_MONTH_TEMPLATE)?;

        info!(target: "pilgrim_stats::stats", "Starting last day update");
        let response = self.client.query(last_day.payload()).await?;
        let summary = extract_last_day(&response)?;
        self.store.insert_last_day(&summary).await?;

        for (i, slice) in self.settings.slices.iter().enumerate() {
            if i > 0 {
                pause(self.settings.step).await;
            }
            let payload = self
                .adjuster
                .for_period(year_month, &slice.dimensions, None, None)?;
            let table = self.fetch_table(&payload, &slice.dimensions).await?;
            self.store
                .write_table(&slice.last_day_table(), summary.date, &table, WriteMode::Upsert)
                .await?;
        }

        info!(
            target: "pilgrim_stats::stats",
            date = %summary.date,
            pilgrims = summary.pilgrims,
            "Finished last day update"
        );
        Ok(summary.pilgrims)
    }

    pub async fn update_year_month(&self, incremental: bool) -> StatsResult<i64> {
        self.update_year_month_at(incremental, self.today()).await
    }

    /// Refreshes the monthly tables for the months planned up to `today`.
    /// Returns the measure total of the last table written.
    pub async fn update_year_month_at(&self, incremental: bool, today: NaiveDate) -> StatsResult<i64> {
        let template = template(&self.templates.year_month, YEAR_MONTH_TEMPLATE)?;
        let plan = month_plan(self.settings.start_year, today, incremental);
        if plan.is_empty() {
            return Err(StatsError::EmptyPlan {
                from: self.settings.start_year,
                to: today.year(),
            });
        }

        let connections = plan.len() * self.settings.slices.len();
        let wait = monthly_pacing(
            connections,
            self.settings.hourly_budget,
            incremental,
            self.settings.step,
        );
        let mode = if incremental {
            WriteMode::Incremental
        } else {
            WriteMode::Upsert
        };
        info!(
            target: "pilgrim_stats::stats",
            incremental,
            connections,
            wait_secs = wait.as_secs_f64(),
            "Starting monthly update"
        );

        let mut last_total = 0;
        let mut first = true;
        for (year, month) in plan {
            let month_name = self
                .months
                .name(month)
                .ok_or(StatsError::UnknownMonth(month))?;
            let date = month_start(year, month).ok_or(StatsError::UnknownMonth(month))?;

            for slice in &self.settings.slices {
                if !first {
                    pause(wait).await;
                }
                first = false;

                let payload = self.adjuster.for_period(
                    template,
                    &slice.dimensions,
                    Some(year),
                    Some(month_name),
                )?;
                let table = self.fetch_table(&payload, &slice.dimensions).await?;
                last_total = table.measure_total();
                self.store
                    .write_table(&slice.monthly_table(), date, &table, mode)
                    .await?;
            }
        }

        info!(target: "pilgrim_stats::stats", pilgrims = last_total, "Finished monthly update");
        Ok(last_total)
    }

    /// Refreshes the `last_day` tables for each date. Returns, per date, the
    /// measure total of the last slice written.
    pub async fn update_dates(&self, dates: &[NaiveDate]) -> StatsResult<Vec<i64>> {
        let template = template(&self.templates.any_day, ANY_DAY_TEMPLATE)?;
        let mut totals = Vec::with_capacity(dates.len());
        let mut first = true;

        for date in dates {
            let literal = query_date(*date);
            let mut date_total = 0;
            for slice in &self.settings.slices {
                if !first {
                    pause(self.settings.step).await;
                }
                first = false;

                let payload = self.adjuster.for_date(template, &slice.dimensions, &literal)?;
                let table = self.fetch_table(&payload, &slice.dimensions).await?;
                date_total = table.measure_total();
                self.store
                    .write_table(&slice.last_day_table(), *date, &table, WriteMode::Upsert)
                    .await?;
            }
            info!(target: "pilgrim_stats::stats", %date, pilgrims = date_total, "Updated date");
            totals.push(date_total);
        }
        Ok(totals)
    }

    pub async fn log_pilgrims_now(&self) -> StatsResult<(NaiveDate, i64)> {
        self.log_pilgrims_at(self.today()).await
    }

    /// Scrapes the live count and stores it under `date`.
    pub async fn log_pilgrims_at(&self, date: NaiveDate) -> StatsResult<(NaiveDate, i64)> {
        let page = self.client.headline_page().await?;
        let Some(pilgrims) = headline_number(&page) else {
            warn!(target: "pilgrim_stats::stats", "No number found in the website headline");
            return Err(StatsError::HeadlineNotFound);
        };
        self.store.upsert_pilgrims_now(date, pilgrims).await?;
        info!(target: "pilgrim_stats::stats", %date, pilgrims, "Logged pilgrims now");
        Ok((date, pilgrims))
    }

    /// Latest date of the check table and its summed pilgrims.
    pub async fn summary(&self) -> StatsResult<Option<(NaiveDate, i64)>> {
        Ok(self.store.latest_total(&self.settings.check_table).await?)
    }

    pub async fn pilgrims_latest(&self) -> StatsResult<Option<(NaiveDate, i64)>> {
        Ok(self.store.latest_pilgrims().await?)
    }

    async fn fetch_table(&self, payload: &Value, dimensions: &[String]) -> StatsResult<StatsTable> {
        let response = self.client.query(payload).await?;
        let decoded = decode_with(&response, &self.settings.decode)?;
        debug!(
            target: "pilgrim_stats::stats",
            dimensions = ?dimensions,
            rows = decoded.rows.len(),
            "Fetched slice"
        );
        Ok(materialize_with(
            &decoded.columns,
            decoded.rows,
            dimensions,
            &self.settings.measure_column,
        )?)
    }
}

fn template<'a>(
    slot: &'a Option<QueryTemplate>,
    name: &'static str,
) -> StatsResult<&'a QueryTemplate> {
    slot.as_ref().ok_or(StatsError::MissingTemplate(name))
}

async fn pause(wait: Duration) {
    if !wait.is_zero() {
        tokio::time::sleep(wait).await;
    }
}
