//! Row filtering.
//!
//! A row is kept when it satisfies every rule (logical AND). Comparisons
//! are dispatched on the inferred type of the rule's column.
//!
//! ## Coercion rules
//!
//! - **number**: cell and rule values are parsed as numbers; unparseable
//!   values are NaN. Every comparison against NaN is false except `!=`,
//!   which is true.
//! - **date**: cell and rule values become epoch milliseconds, invalid
//!   dates are NaN with the same comparison behaviour.
//! - **text**: case-insensitive, missing cells compare as "".
//!
//! An operator that does not belong to the column's type lets every row
//! through instead of failing.

use super::coerce::{
    nan_max, nan_min, parse_date_millis, parse_number, to_epoch_millis, to_label, to_number,
};
use crate::perf::ScopedTimer;
use crate::types::{Cell, ColumnMeta, ColumnType, FilterOp, FilterRule, Row};
use std::borrow::Cow;

/// Keep the rows that satisfy all `filters`.
///
/// With no filters the input slice is handed back as-is.
pub fn apply_filters<'a>(
    rows: &'a [Row],
    filters: &[FilterRule],
    columns: &[ColumnMeta],
) -> Cow<'a, [Row]> {
    if filters.is_empty() {
        return Cow::Borrowed(rows);
    }
    let _timer = ScopedTimer::stage("apply_filters");

    // Resolve each rule's column type once
    let typed: Vec<(&FilterRule, ColumnType)> = filters
        .iter()
        .map(|rule| (rule, column_type(columns, &rule.column)))
        .collect();

    let kept: Vec<Row> = rows
        .iter()
        .filter(|row| {
            typed
                .iter()
                .all(|(rule, column_type)| matches(row.get(&rule.column), rule, *column_type))
        })
        .cloned()
        .collect();

    tracing::debug!(
        filters = filters.len(),
        rows = rows.len(),
        kept = kept.len(),
        "Applied filters"
    );
    Cow::Owned(kept)
}

/// Type of the named column, text when the column is unknown
pub fn column_type(columns: &[ColumnMeta], name: &str) -> ColumnType {
    columns
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.column_type)
        .unwrap_or_default()
}

/// Evaluate one rule against one cell
pub fn matches(cell: Option<&Cell>, rule: &FilterRule, column_type: ColumnType) -> bool {
    match column_type {
        ColumnType::Number => {
            let value2 = rule.value2.as_deref().map(parse_number).unwrap_or(f64::NAN);
            compare(to_number(cell), &rule.op, parse_number(&rule.value), value2)
        }
        ColumnType::Date => {
            let value2 = rule
                .value2
                .as_deref()
                .map(parse_date_millis)
                .unwrap_or(f64::NAN);
            compare(
                to_epoch_millis(cell),
                &rule.op,
                parse_date_millis(&rule.value),
                value2,
            )
        }
        ColumnType::Text => {
            let s = to_label(cell).to_lowercase();
            let a = rule.value.to_lowercase();
            match rule.op {
                FilterOp::Contains => s.contains(&a),
                FilterOp::Equals => s == a,
                FilterOp::StartsWith => s.starts_with(&a),
                FilterOp::EndsWith => s.ends_with(&a),
                _ => true,
            }
        }
    }
}

/// Ordered comparison shared by number and date columns.
///
/// IEEE semantics give exactly the required NaN behaviour: every
/// comparison is false except `!=`.
fn compare(v: f64, op: &FilterOp, a: f64, b: f64) -> bool {
    match op {
        FilterOp::Eq => v == a,
        FilterOp::Ne => v != a,
        FilterOp::Gt => v > a,
        FilterOp::Ge => v >= a,
        FilterOp::Lt => v < a,
        FilterOp::Le => v <= a,
        FilterOp::Between => v >= nan_min(a, b) && v <= nan_max(a, b),
        _ => true,
    }
}
