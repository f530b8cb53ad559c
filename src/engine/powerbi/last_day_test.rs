use super::errors::DecodeError;
use super::last_day::extract_last_day;
use crate::test_helpers::factories::ResponseFactory;
use chrono::NaiveDate;
use serde_json::json;

#[test]
fn reads_date_and_count() {
    let response = ResponseFactory::last_day("Datos actualizados a: '14/10/2024'", json!("2315L"));

    let summary = extract_last_day(&response).unwrap();

    assert_eq!(summary.date, NaiveDate::from_ymd_opt(2024, 10, 14).unwrap());
    assert_eq!(summary.pilgrims, 2315);
}

#[test]
fn label_without_separator_is_rejected() {
    let response = ResponseFactory::last_day("14/10/2024", json!("2315L"));
    assert!(matches!(
        extract_last_day(&response),
        Err(DecodeError::InvalidSummary(_))
    ));
}

#[test]
fn count_without_marker_is_rejected() {
    let response = ResponseFactory::last_day("Fecha: '14/10/2024'", json!(2315));
    assert!(matches!(
        extract_last_day(&response),
        Err(DecodeError::InvalidSummary(_))
    ));
}

#[test]
fn missing_label_is_reported() {
    let response = json!({"results": [{"result": {"data": {"dsr": {"DS": [{"PH": [{"DM0": [{"M0": "1L"}]}]}]}}}}]});
    assert_eq!(
        extract_last_day(&response).unwrap_err(),
        DecodeError::MissingKey("/dsr/DS/0/M1")
    );
}
