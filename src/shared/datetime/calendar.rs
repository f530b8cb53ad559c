use chrono::{NaiveDate, ParseResult};
use serde::Deserialize;

const PATH_DATE_FORMAT: &str = "%d-%m-%Y";
const QUERY_DATE_FORMAT: &str = "%d/%m/%Y";
const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Month names in the locale the report filters on, January first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MonthNames {
    months: Vec<String>,
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::new([
            "enero",
            "febrero",
            "marzo",
            "abril",
            "mayo",
            "junio",
            "julio",
            "agosto",
            "septiembre",
            "octubre",
            "noviembre",
            "diciembre",
        ])
    }
}

impl MonthNames {
    pub fn new<I, S>(months: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            months: months.into_iter().map(Into::into).collect(),
        }
    }

    /// Name for a 1-based month number.
    pub fn name(&self, month: u32) -> Option<&str> {
        let index = month.checked_sub(1)? as usize;
        self.months.get(index).map(String::as_str)
    }

    pub fn is_complete(&self) -> bool {
        self.months.len() == 12
    }
}

/// Parses a date as it appears in request paths (`DD-MM-YYYY`).
pub fn parse_path_date(value: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), PATH_DATE_FORMAT)
}

/// Parses a date as the report writes it (`DD/MM/YYYY`).
pub fn parse_query_date(value: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), QUERY_DATE_FORMAT)
}

pub fn query_date(date: NaiveDate) -> String {
    date.format(QUERY_DATE_FORMAT).to_string()
}

pub fn storage_date(date: NaiveDate) -> String {
    date.format(STORAGE_DATE_FORMAT).to_string()
}

/// First day of the month, the date monthly statistics are stored under.
pub fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}
