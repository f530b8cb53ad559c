use chrono_tz::Tz;
use std::time::Duration;

use super::errors::{StatsError, StatsResult};
use crate::engine::powerbi::DecodeOptions;
use crate::shared::config::Settings;
use crate::shared::config::model::SliceConfig;

/// Knobs of the update jobs, resolved from `Settings`.
#[derive(Debug, Clone)]
pub struct StatsSettings {
    pub slices: Vec<SliceConfig>,
    pub start_year: i32,
    pub measure_column: String,
    /// `last_day` table summed for the API's headline figure
    pub check_table: String,
    /// Delay between report queries outside incremental monthly runs
    pub step: Duration,
    pub hourly_budget: usize,
    pub timezone: Tz,
    pub decode: DecodeOptions,
}

impl StatsSettings {
    pub fn from_config(settings: &Settings) -> StatsResult<Self> {
        if !settings.calendar.is_complete() {
            return Err(StatsError::IncompleteCalendar);
        }
        let timezone = settings
            .server
            .timezone
            .parse::<Tz>()
            .map_err(|_| StatsError::InvalidTimezone(settings.server.timezone.clone()))?;
        Ok(Self {
            slices: settings.stats.tables.clone(),
            start_year: settings.stats.start_year,
            measure_column: settings.stats.measure_column.clone(),
            check_table: settings.stats.check_table.clone(),
            step: Duration::from_millis(settings.powerbi.pacing_ms),
            hourly_budget: settings.powerbi.hourly_budget,
            timezone,
            decode: DecodeOptions::default(),
        })
    }
}
