use chrono::{Datelike, NaiveDate};

/// `(year, month)` pairs a monthly run covers, oldest first.
///
/// Incremental runs cover the month of `today` only; full runs every month
/// from January of `start_year` up to and including the month of `today`.
pub fn month_plan(start_year: i32, today: NaiveDate, incremental: bool) -> Vec<(i32, u32)> {
    if incremental {
        return vec![(today.year(), today.month())];
    }
    (start_year..=today.year())
        .flat_map(|year| {
            let last = if year == today.year() { today.month() } else { 12 };
            (1..=last).map(move |month| (year, month))
        })
        .collect()
}
