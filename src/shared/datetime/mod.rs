mod calendar;


pub use calendar::{
    MonthNames, month_start, parse_path_date, parse_query_date, query_date, storage_date,
};
