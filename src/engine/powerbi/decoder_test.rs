use super::decoder::{DecodeOptions, DecodedResponse, decode, decode_with};
use super::errors::DecodeError;
use crate::logging::init_for_tests;
use crate::test_helpers::factories::ResponseFactory;
use indoc::indoc;
use serde_json::{Value, json};

fn camino_country() -> ResponseFactory {
    ResponseFactory::new()
        .with_coded_group_key("camino", "Camino", "D0")
        .with_coded_group_key("pais", "País", "D1")
        .with_measure("M0")
        .with_dictionary("D0", &["Francés", "Portugués\nCentral"])
        .with_dictionary("D1", &["España", "Alemania"])
}

#[test]
fn empty_rows_decode_to_empty_response() {
    init_for_tests();

    let response = camino_country().create();

    assert_eq!(decode(&response).unwrap(), DecodedResponse::default());
}

#[test]
fn column_names_come_from_group_keys_and_measures() {
    let response = camino_country()
        .with_cells(vec![json!(0), json!(0), json!("10L")])
        .create();

    let decoded = decode(&response).unwrap();

    assert_eq!(decoded.columns, vec!["Camino", "País", "M0"]);
}

#[test]
fn full_pipeline_reconstructs_expands_and_normalizes() {
    init_for_tests();

    let response = camino_country()
        .with_cells(vec![json!(0), json!(0), json!("120L")])
        // Same camino as previous row: code 0 is copied, then expanded.
        .with_row(json!({ "C": [1, "35L"], "R": 1 }))
        .with_row(json!({ "C": [1, "7L"], "R": 2 }))
        .with_row(json!({ "C": [1, "2L"], "Ø": 1 }))
        .create();

    let decoded = decode(&response).unwrap();

    assert_eq!(
        decoded.rows,
        vec![
            vec![json!("Francés"), json!("España"), json!("120L")],
            vec![json!("Francés"), json!("Alemania"), json!("35L")],
            vec![json!("Portugués Central"), json!("Alemania"), json!("7L")],
            vec![json!("N/A"), json!("Alemania"), json!("2L")],
        ]
    );
}

#[test]
fn copied_codes_are_expanded_after_reconstruction() {
    // Row 1 copies the raw code of row 0; expansion must still resolve it.
    let response = camino_country()
        .with_cells(vec![json!(1), json!(1), json!("1L")])
        .with_row(json!({ "C": ["2L"], "R": 3 }))
        .create();

    let decoded = decode(&response).unwrap();

    assert_eq!(
        decoded.rows[1],
        vec![json!("Portugués Central"), json!("Alemania"), json!("2L")]
    );
}

#[test]
fn newline_replacement_is_configurable() {
    let response = camino_country()
        .with_cells(vec![json!(1), json!(0), json!("1L")])
        .create();
    let options = DecodeOptions {
        newline_replacement: String::new(),
    };

    let decoded = decode_with(&response, &options).unwrap();

    assert_eq!(decoded.rows[0][0], json!("PortuguésCentral"));
}

#[test]
fn raw_columns_without_dictionary_keep_values() {
    let response = ResponseFactory::new()
        .with_group_key("edad", "Edad")
        .with_measure("M0")
        .with_cells(vec![json!("30-60"), json!("9L")])
        .with_row(json!({ "C": ["3L"], "Ø": 1 }))
        .create();

    let decoded = decode(&response).unwrap();

    assert_eq!(decoded.rows[0], vec![json!("30-60"), json!("9L")]);
    assert_eq!(decoded.rows[1], vec![json!("N/A"), json!("3L")]);
}

#[test]
fn first_row_copy_is_a_decode_error() {
    let response = camino_country()
        .with_row(json!({ "C": [0, "1L"], "R": 1 }))
        .create();

    assert_eq!(
        decode(&response).unwrap_err(),
        DecodeError::MissingPreviousRow { row: 0 }
    );
}

#[test]
fn dictionary_miss_is_a_decode_error() {
    let response = camino_country()
        .with_cells(vec![json!(5), json!(0), json!("1L")])
        .create();

    assert!(matches!(
        decode(&response),
        Err(DecodeError::DictionaryIndex { .. })
    ));
}

#[test]
fn missing_result_data_is_reported() {
    let err = decode(&json!({ "results": [] })).unwrap_err();
    assert_eq!(err, DecodeError::MissingKey("/results/0/result/data"));
}

#[test]
fn missing_rows_is_reported() {
    let response: Value = serde_json::from_str(indoc! {r#"
        {
          "results": [
            { "result": { "data": { "descriptor": { "Select": [] }, "dsr": { "DS": [ { "PH": [ {} ] } ] } } } }
          ]
        }
    "#})
    .unwrap();

    assert_eq!(
        decode(&response).unwrap_err(),
        DecodeError::MissingKey("/PH/0/DM0")
    );
}

#[test]
fn select_and_column_types_must_agree() {
    let mut response = ResponseFactory::new()
        .with_group_key("camino", "Camino")
        .with_measure("M0")
        .with_cells(vec![json!("Francés"), json!("1L")])
        .create();
    response["results"][0]["result"]["data"]["descriptor"]["Select"]
        .as_array_mut()
        .unwrap()
        .pop();

    assert_eq!(
        decode(&response).unwrap_err(),
        DecodeError::ColumnCount { names: 1, width: 2 }
    );
}
