use thiserror::Error;

use crate::engine::fetch::FetchError;
use crate::engine::powerbi::DecodeError;
use crate::engine::store::StoreError;
use crate::engine::template::TemplateError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Template(s) are empty: {0}")]
    MissingTemplate(&'static str),

    #[error("No month name configured for month {0}")]
    UnknownMonth(u32),

    #[error("No pilgrim count found on the website")]
    HeadlineNotFound,

    #[error("Nothing to update between {from} and {to}")]
    EmptyPlan { from: i32, to: i32 },

    #[error("Calendar must name all 12 months")]
    IncompleteCalendar,

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
}

impl StatsError {
    pub fn is_missing_template(&self) -> bool {
        matches!(self, StatsError::MissingTemplate(_))
    }
}

pub type StatsResult<T> = Result<T, StatsError>;
