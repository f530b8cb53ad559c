use tracing::warn;

use super::errors::{StoreError, StoreResult};
use crate::engine::template::QueryTemplate;

pub const LAST_DAY_TEMPLATE: &str = "query_date_last_day";
pub const YEAR_MONTH_TEMPLATE: &str = "query_template_all_columns_year_month";
pub const ANY_DAY_TEMPLATE: &str = "query_template_all_columns_any_day";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Insert, replacing rows that collide on the table's unique key.
    Upsert,
    /// Drop every row of the target date, then insert.
    Incremental,
}

/// The named query templates the update jobs run.
#[derive(Debug, Clone, Default)]
pub struct QueryTemplates {
    pub last_day: Option<QueryTemplate>,
    pub year_month: Option<QueryTemplate>,
    pub any_day: Option<QueryTemplate>,
}

impl QueryTemplates {
    /// Builds the set from `(name, json)` rows; unknown names are skipped.
    pub fn from_rows<I>(rows: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut templates = Self::default();
        for (name, raw) in rows {
            let slot = match name.as_str() {
                LAST_DAY_TEMPLATE => &mut templates.last_day,
                YEAR_MONTH_TEMPLATE => &mut templates.year_month,
                ANY_DAY_TEMPLATE => &mut templates.any_day,
                _ => {
                    warn!(target: "pilgrim_stats::store", template = %name, "Ignoring unknown template");
                    continue;
                }
            };
            let template = QueryTemplate::parse(&raw)
                .map_err(|source| StoreError::Template { name, source })?;
            *slot = Some(template);
        }
        Ok(templates)
    }

    pub fn is_complete(&self) -> bool {
        self.last_day.is_some() && self.year_month.is_some() && self.any_day.is_some()
    }
}
