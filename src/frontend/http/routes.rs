use percent_encoding::percent_decode_str;

const BY_DAY: &str = "/update_stats_by_day";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    UpdateLastDay,
    UpdateCurrentMonth,
    /// Percent-decoded, comma-separated `DD-MM-YYYY` list; `None` when the path carries none.
    UpdateByDay(Option<String>),
    UpdateNow,
    Now,
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let route = match path {
            "/" => Route::Home,
            "/update_stats_last_day" => Route::UpdateLastDay,
            "/update_stats_current_month" => Route::UpdateCurrentMonth,
            "/update_now" => Route::UpdateNow,
            "/now" => Route::Now,
            p if p == BY_DAY => Route::UpdateByDay(None),
            p => {
                let dates = p.strip_prefix(BY_DAY)?.strip_prefix('/')?;
                if dates.contains('/') {
                    return None;
                }
                let dates = percent_decode_str(dates).decode_utf8_lossy();
                Route::UpdateByDay((!dates.is_empty()).then(|| dates.into_owned()))
            }
        };
        Some(route)
    }
}
