//! Unit tests for column type inference.

use crate::helpers::{row, rows};
use chartify::pipeline::{infer_column_type, infer_columns, infer_columns_with_sample};
use chartify::types::{Cell, ColumnMeta, ColumnType, Row};

fn single_column(values: &[&str]) -> Vec<Row> {
    values.iter().map(|v| row(&[("c", *v)])).collect()
}

fn type_of(values: &[&str]) -> ColumnType {
    infer_columns(&single_column(values))[0].column_type
}

#[test]
fn test_columns_follow_first_row_keys() {
    let data = rows(&[
        &[("name", "Ada"), ("age", "36")],
        &[("name", "Alan"), ("age", "41"), ("city", "London")],
    ]);

    let columns = infer_columns(&data);
    assert_eq!(
        columns,
        vec![
            ColumnMeta::new("name", ColumnType::Text),
            ColumnMeta::new("age", ColumnType::Number),
        ]
    );
}

#[test]
fn test_majority_threshold() {
    // 4 of 5 numeric
    assert_eq!(type_of(&["1", "2", "3", "4", "five"]), ColumnType::Number);
    // 3 of 5 is exactly 60%, which is not enough
    assert_eq!(type_of(&["1", "2", "3", "four", "five"]), ColumnType::Text);
}

#[test]
fn test_missing_keys_count_in_denominator() {
    let mut data = single_column(&["1", "2", "3"]);
    data.push(row(&[("other", "x")]));
    data.push(row(&[("other", "y")]));
    assert_eq!(infer_columns(&data)[0].column_type, ColumnType::Text);
}

#[test]
fn test_numeric_spellings() {
    assert_eq!(type_of(&["1.5", "-2", "3e2", " 4 "]), ColumnType::Number);
    assert_eq!(type_of(&["0x10", "0b11", "0o7", "7"]), ColumnType::Number);
    // Infinite values are not finite numbers
    assert_eq!(type_of(&["Infinity", "-Infinity", "NaN", "7"]), ColumnType::Text);
}

#[test]
fn test_date_columns() {
    assert_eq!(
        type_of(&["2024-01-05", "2024-02-10T08:30:00Z", "03/15/2024", "2024-04"]),
        ColumnType::Date
    );
}

#[test]
fn test_numbers_win_over_dates() {
    // Year-like numbers are numbers, not dates
    assert_eq!(type_of(&["2021", "2022", "2023"]), ColumnType::Number);
}

#[test]
fn test_typed_cells() {
    let cells = [Cell::Number(1.0), Cell::Number(f64::NAN), Cell::Boolean(true)];
    assert_eq!(infer_column_type(cells.iter().map(Some)), ColumnType::Text);

    let cells = [Cell::Number(1.0), Cell::Number(2.0), Cell::Empty];
    assert_eq!(infer_column_type(cells.iter().map(Some)), ColumnType::Number);
}

#[test]
fn test_sample_size_limits_rows_examined() {
    let mut values = vec!["1"; 3];
    values.extend(["x"; 10]);
    let data = single_column(&values);

    assert_eq!(infer_columns_with_sample(&data, 3)[0].column_type, ColumnType::Number);
    assert_eq!(infer_columns_with_sample(&data, 100)[0].column_type, ColumnType::Text);
}

#[test]
fn test_inference_is_deterministic() {
    let data = single_column(&["2024-01-01", "n/a", "2024-03-01"]);
    assert_eq!(infer_columns(&data), infer_columns(&data));
}
