//! Unit tests for file loading.

use crate::helpers::{SALES_CSV, fixture_file};
use chartify::data::{
    DataError, DataFormat, LoadLimits, load_file, parse_csv_file, parse_csv_str,
    parse_json_content,
};
use chartify::types::Cell;

#[test]
fn test_load_csv() {
    let (_dir, path) = fixture_file("sales.csv", SALES_CSV);
    let loaded = load_file(&path, &LoadLimits::default()).unwrap();

    assert_eq!(loaded.name, "sales");
    assert_eq!(loaded.format, DataFormat::Csv);
    assert_eq!(loaded.rows.len(), 5);
    assert_eq!(
        loaded.rows[0].keys().collect::<Vec<_>>(),
        vec!["region", "product", "sales", "date"]
    );
    // CSV values stay strings until coerced
    assert_eq!(loaded.rows[3].get("sales"), Some(&Cell::text("n/a")));
}

#[test]
fn test_load_tsv_forces_tab() {
    let (_dir, path) = fixture_file("scores.tsv", "name\tscore, max\nAda\t9, 10\n");
    let rows = parse_csv_file(&path, 10).unwrap();
    assert_eq!(rows[0].get("score, max"), Some(&Cell::text("9, 10")));
}

#[test]
fn test_semicolon_delimiter_detected() {
    let rows = parse_csv_str("city;temp\nOslo;4\nRome;18\n").unwrap();
    assert_eq!(rows[1].get("temp"), Some(&Cell::text("18")));
}

#[test]
fn test_load_json_wrapper() {
    let (_dir, path) = fixture_file(
        "api.json",
        r#"{"items": [{"id": 1, "tags": {"a": true}}, {"id": 2, "tags": null}]}"#,
    );
    let loaded = load_file(&path, &LoadLimits::default()).unwrap();

    assert_eq!(loaded.format, DataFormat::Json);
    assert_eq!(loaded.rows[0].get("id"), Some(&Cell::Number(1.0)));
    assert_eq!(loaded.rows[0].get("tags"), Some(&Cell::text(r#"{"a":true}"#)));
    assert_eq!(loaded.rows[1].get("tags"), Some(&Cell::Empty));
}

#[test]
fn test_sniffed_json_without_extension() {
    let (_dir, path) = fixture_file("download", "\n [{\"x\": 1}]");
    assert_eq!(load_file(&path, &LoadLimits::default()).unwrap().format, DataFormat::Json);
}

#[test]
fn test_json_without_array_is_empty() {
    assert!(parse_json_content(r#"{"total": 3}"#).unwrap().is_empty());
}

#[test]
fn test_row_limit_is_enforced() {
    let (_dir, path) = fixture_file("sales.csv", SALES_CSV);
    let limits = LoadLimits {
        max_rows: 3,
        ..Default::default()
    };
    assert!(matches!(
        load_file(&path, &limits),
        Err(DataError::TooManyRows { max_rows: 3, .. })
    ));
}

#[test]
fn test_size_limit_counts_whole_megabytes() {
    let (_dir, path) = fixture_file("sales.csv", SALES_CSV);
    let limits = LoadLimits {
        max_eager_size_mb: 0,
        ..Default::default()
    };
    // A few bytes round down to 0MB, which is not above a 0MB limit
    let loaded = load_file(&path, &limits).unwrap();
    assert_eq!(loaded.rows.len(), 5);
}

#[test]
fn test_unsupported_and_missing_files() {
    let (_dir, path) = fixture_file("sheet.xlsx", "PK");
    assert!(matches!(
        load_file(&path, &LoadLimits::default()),
        Err(DataError::UnsupportedFormat(_))
    ));

    let missing = path.with_file_name("missing.csv");
    assert!(matches!(
        load_file(&missing, &LoadLimits::default()),
        Err(DataError::Io(_))
    ));
}

#[test]
fn test_error_messages() {
    let err = DataError::TooManyRows {
        rows: 12,
        max_rows: 10,
    };
    assert_eq!(err.to_string(), "Too many rows: 12 (max 10)");
    assert_eq!(
        DataError::UnsupportedFormat("xlsx".to_string()).to_string(),
        "Unsupported file format: xlsx"
    );
}
