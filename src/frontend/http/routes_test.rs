use super::routes::Route;

#[test]
fn fixed_paths() {
    assert_eq!(Route::parse("/"), Some(Route::Home));
    assert_eq!(Route::parse("/update_stats_last_day"), Some(Route::UpdateLastDay));
    assert_eq!(
        Route::parse("/update_stats_current_month"),
        Some(Route::UpdateCurrentMonth)
    );
    assert_eq!(Route::parse("/update_now"), Some(Route::UpdateNow));
    assert_eq!(Route::parse("/now"), Some(Route::Now));
}

#[test]
fn by_day_with_and_without_dates() {
    assert_eq!(Route::parse("/update_stats_by_day/"), Some(Route::UpdateByDay(None)));
    assert_eq!(Route::parse("/update_stats_by_day"), Some(Route::UpdateByDay(None)));
    assert_eq!(
        Route::parse("/update_stats_by_day/14-10-2024,15-10-2024"),
        Some(Route::UpdateByDay(Some("14-10-2024,15-10-2024".to_string())))
    );
}

#[test]
fn by_day_dates_are_percent_decoded() {
    assert_eq!(
        Route::parse("/update_stats_by_day/01-05-2024%2C02-05-2024"),
        Some(Route::UpdateByDay(Some("01-05-2024,02-05-2024".to_string())))
    );
    assert_eq!(
        Route::parse("/update_stats_by_day/01-05-2024,%2002-05-2024"),
        Some(Route::UpdateByDay(Some("01-05-2024, 02-05-2024".to_string())))
    );
}

#[test]
fn unknown_paths() {
    assert_eq!(Route::parse("/update_stats_by_dayx"), None);
    assert_eq!(Route::parse("/update_stats_by_day/01-01-2024/extra"), None);
    assert_eq!(Route::parse("/now/"), None);
    assert_eq!(Route::parse("/command"), None);
}
