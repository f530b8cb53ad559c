use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::errors::{DecodeError, DecodeResult};
use super::normalize::parse_measure;
use crate::shared::datetime::parse_query_date;

const DATA_SOURCE: &str = "/results/0/result/data/dsr/DS/0";

/// Headline figures of the latest published day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastDaySummary {
    pub date: NaiveDate,
    pub pilgrims: i64,
}

/// Reads the last-day query response: the `M1` label carries the date as
/// `"<label>: 'DD/MM/YYYY'"`, the first `DM0` row carries the count as `M0`.
pub fn extract_last_day(response: &Value) -> DecodeResult<LastDaySummary> {
    let source = response
        .pointer(DATA_SOURCE)
        .ok_or(DecodeError::MissingKey(DATA_SOURCE))?;

    let label = source
        .get("M1")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingKey("/dsr/DS/0/M1"))?;
    let date = label
        .split(": ")
        .nth(1)
        .map(|s| s.trim_matches('\''))
        .and_then(|s| parse_query_date(s).ok())
        .ok_or_else(|| DecodeError::InvalidSummary(format!("unreadable date label {label:?}")))?;

    let count = source
        .pointer("/PH/0/DM0/0/M0")
        .ok_or(DecodeError::MissingKey("/dsr/DS/0/PH/0/DM0/0/M0"))?;
    if !count.as_str().is_some_and(|s| s.ends_with('L')) {
        return Err(DecodeError::InvalidSummary(format!(
            "pilgrim count {count} lacks the integer marker"
        )));
    }
    let pilgrims = parse_measure(0, count)?;

    Ok(LastDaySummary { date, pilgrims })
}
