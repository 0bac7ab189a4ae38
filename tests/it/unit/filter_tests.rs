//! Unit tests for the filter engine.

use crate::helpers::{row, rows};
use chartify::pipeline::apply_filters;
use chartify::types::{Cell, ColumnMeta, ColumnType, FilterRule, Row};
use std::borrow::Cow;

fn number_rows(values: &[&str]) -> (Vec<Row>, Vec<ColumnMeta>) {
    let data = values.iter().map(|v| row(&[("n", *v)])).collect();
    (data, vec![ColumnMeta::new("n", ColumnType::Number)])
}

fn kept(rows: &[Row], column: &str) -> Vec<String> {
    rows.iter()
        .map(|r| match r.get(column) {
            Some(Cell::Text(s)) => s.clone(),
            other => format!("{other:?}"),
        })
        .collect()
}

#[test]
fn test_no_filters_returns_input_itself() {
    let (data, columns) = number_rows(&["1", "2"]);
    let result = apply_filters(&data, &[], &columns);

    assert!(matches!(result, Cow::Borrowed(_)));
    assert!(std::ptr::eq(result.as_ref(), data.as_slice()));
}

#[test]
fn test_between_with_reversed_bounds() {
    let (data, columns) = number_rows(&["4", "5", "7", "10", "11"]);
    let rule = FilterRule::new("f1", "n", "between", "10").with_value2("5");

    let result = apply_filters(&data, &[rule], &columns);
    assert_eq!(kept(&result, "n"), ["5", "7", "10"]);
}

#[test]
fn test_between_without_second_bound_matches_nothing() {
    let (data, columns) = number_rows(&["5", "7"]);
    let rule = FilterRule::new("f1", "n", "between", "5");
    assert!(apply_filters(&data, &[rule], &columns).is_empty());
}

#[test]
fn test_unparseable_cells_only_pass_not_equal() {
    let (data, columns) = number_rows(&["abc"]);

    let ne = FilterRule::new("f1", "n", "!=", "5");
    assert_eq!(apply_filters(&data, &[ne], &columns).len(), 1);

    for op in ["=", ">", ">=", "<", "<="] {
        let rule = FilterRule::new("f1", "n", op, "5");
        assert!(apply_filters(&data, &[rule], &columns).is_empty(), "op {op}");
    }
}

#[test]
fn test_blank_cells_are_zero_and_missing_cells_nan() {
    let data = vec![row(&[("n", "")]), row(&[("other", "1")])];
    let columns = vec![ColumnMeta::new("n", ColumnType::Number)];

    let rule = FilterRule::new("f1", "n", "=", "0");
    let result = apply_filters(&data, &[rule], &columns);
    assert_eq!(result.len(), 1);
    assert!(result[0].get("n").is_some());
}

#[test]
fn test_text_operators_are_case_insensitive() {
    let data = rows(&[
        &[("name", "Alice Smith")],
        &[("name", "bob jones")],
        &[("name", "SMITHERS")],
    ]);
    let columns = vec![ColumnMeta::new("name", ColumnType::Text)];

    let contains = FilterRule::new("f1", "name", "contains", "smith");
    assert_eq!(kept(&apply_filters(&data, &[contains], &columns), "name"), ["Alice Smith", "SMITHERS"]);

    let starts = FilterRule::new("f1", "name", "startsWith", "BOB");
    assert_eq!(kept(&apply_filters(&data, &[starts], &columns), "name"), ["bob jones"]);

    let ends = FilterRule::new("f1", "name", "endsWith", "ERS");
    assert_eq!(kept(&apply_filters(&data, &[ends], &columns), "name"), ["SMITHERS"]);

    let equals = FilterRule::new("f1", "name", "equals", "alice smith");
    assert_eq!(apply_filters(&data, &[equals], &columns).len(), 1);
}

#[test]
fn test_unknown_column_is_compared_as_text() {
    let data = rows(&[&[("code", "A7")], &[("code", "b9")]]);
    let rule = FilterRule::new("f1", "code", "contains", "a");
    assert_eq!(apply_filters(&data, &[rule], &[]).len(), 1);
}

#[test]
fn test_unknown_operator_passes_every_row() {
    let (data, columns) = number_rows(&["1", "2", "3"]);
    let rule = FilterRule::new("f1", "n", "contains", "9");
    assert_eq!(apply_filters(&data, &[rule], &columns).len(), 3);

    let rule = FilterRule::new("f1", "n", "~=", "9");
    assert_eq!(apply_filters(&data, &[rule], &columns).len(), 3);
}

#[test]
fn test_rules_are_combined_with_and() {
    let data = rows(&[
        &[("region", "North"), ("sales", "100")],
        &[("region", "North"), ("sales", "20")],
        &[("region", "South"), ("sales", "300")],
    ]);
    let columns = vec![
        ColumnMeta::new("region", ColumnType::Text),
        ColumnMeta::new("sales", ColumnType::Number),
    ];
    let filters = [
        FilterRule::new("f1", "region", "equals", "north"),
        FilterRule::new("f2", "sales", ">=", "50"),
    ];

    let result = apply_filters(&data, &filters, &columns);
    assert_eq!(kept(&result, "sales"), ["100"]);
}

#[test]
fn test_date_comparisons() {
    let data = rows(&[
        &[("day", "2024-01-15")],
        &[("day", "2024-02-01")],
        &[("day", "not a date")],
    ]);
    let columns = vec![ColumnMeta::new("day", ColumnType::Date)];

    let after = FilterRule::new("f1", "day", ">", "2024-01-31");
    assert_eq!(kept(&apply_filters(&data, &[after], &columns), "day"), ["2024-02-01"]);

    let range = FilterRule::new("f1", "day", "between", "2024-02-28").with_value2("2024-01-01");
    assert_eq!(apply_filters(&data, &[range], &columns).len(), 2);

    let not_equal = FilterRule::new("f1", "day", "!=", "2024-01-15");
    assert_eq!(
        kept(&apply_filters(&data, &[not_equal], &columns), "day"),
        ["2024-02-01", "not a date"]
    );
}

#[test]
fn test_filtering_does_not_mutate_rows() {
    let (data, columns) = number_rows(&["1", "2", "3"]);
    let before = data.clone();
    let rule = FilterRule::new("f1", "n", ">", "1");
    let _ = apply_filters(&data, &[rule], &columns);
    assert_eq!(data, before);
}
