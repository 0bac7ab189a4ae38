//! Column type inference.
//!
//! Classifies each column as number, date or text from a sample of the
//! leading rows. The decision is majority based, so individual values may
//! still disagree with the type of their column.

use super::coerce::{is_date, parse_number};
use crate::constants::{DEFAULT_SAMPLE_SIZE, TYPE_MAJORITY_RATIO};
use crate::perf::ScopedTimer;
use crate::types::{Cell, ColumnMeta, ColumnType, Row};

/// Infer column metadata using the default sample size
pub fn infer_columns(rows: &[Row]) -> Vec<ColumnMeta> {
    infer_columns_with_sample(rows, DEFAULT_SAMPLE_SIZE)
}

/// Infer column metadata from the first `sample_size` rows.
///
/// The column set is the key set of the first row; rows missing a key
/// simply contribute nothing for that column.
pub fn infer_columns_with_sample(rows: &[Row], sample_size: usize) -> Vec<ColumnMeta> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let _timer = ScopedTimer::stage("infer_columns");
    let sample = &rows[..rows.len().min(sample_size)];

    let columns: Vec<ColumnMeta> = first
        .keys()
        .map(|name| ColumnMeta {
            name: name.to_string(),
            column_type: infer_column_type(sample.iter().map(|row| row.get(name))),
        })
        .collect();

    tracing::debug!(
        columns = columns.len(),
        sampled = sample.len(),
        "Inferred column types"
    );
    columns
}

/// Classify one column from its sampled values.
///
/// Blank values are skipped but still count towards the denominator, so a
/// sparse column needs a clear majority of non-blank values to be typed.
pub fn infer_column_type<'a>(values: impl Iterator<Item = Option<&'a Cell>>) -> ColumnType {
    let mut total = 0usize;
    let mut numbers = 0usize;
    let mut dates = 0usize;

    for value in values {
        total += 1;
        let Some(cell) = value else {
            continue;
        };
        if cell.is_blank() {
            continue;
        }
        match classify(cell) {
            ColumnType::Number => numbers += 1,
            ColumnType::Date => dates += 1,
            ColumnType::Text => {}
        }
    }

    let total = total.max(1) as f64;
    if numbers as f64 / total > TYPE_MAJORITY_RATIO {
        ColumnType::Number
    } else if dates as f64 / total > TYPE_MAJORITY_RATIO {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}

/// Classify a single non-blank value: number first, then date, then text
fn classify(cell: &Cell) -> ColumnType {
    let text = match cell {
        Cell::Number(n) => {
            return if n.is_finite() {
                ColumnType::Number
            } else {
                ColumnType::Text
            };
        }
        // Booleans read as "true"/"false", which are neither numbers nor dates
        Cell::Boolean(_) => return ColumnType::Text,
        Cell::Empty => return ColumnType::Text,
        Cell::Text(s) => s.trim(),
    };

    if parse_number(text).is_finite() {
        ColumnType::Number
    } else if is_date(text) {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}
