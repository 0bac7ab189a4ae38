//! Polars-backed reader for large files.
//!
//! Files above the eager size limit are read by polars, which is much faster
//! than the row-at-a-time parsers, and then materialized into [`Row`]s chunk
//! by chunk so the rest of the pipeline sees the same data model.

use crate::constants::{FRAME_CHUNK_SIZE, FRAME_SCHEMA_SAMPLE};
use crate::data::error::{DataError, DataResult};
use crate::types::{Cell, Row};
use polars::prelude::*;
use std::num::NonZeroUsize;
use std::path::Path;

/// A loaded polars frame and its column order
pub struct FrameSource {
    frame: DataFrame,
    columns: Vec<String>,
}

impl FrameSource {
    /// Read a delimited file
    pub fn from_csv(path: &Path, separator: u8) -> DataResult<Self> {
        let frame = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(separator)
            .with_infer_schema_length(Some(FRAME_SCHEMA_SAMPLE))
            .finish()?
            .collect()?;
        Ok(Self::from_frame(frame))
    }

    /// Read a JSON array of objects
    pub fn from_json(path: &Path) -> DataResult<Self> {
        let file = std::fs::File::open(path)?;
        let frame = JsonReader::new(file)
            .with_json_format(JsonFormat::Json)
            .infer_schema_len(NonZeroUsize::new(FRAME_SCHEMA_SAMPLE))
            .finish()?;
        Ok(Self::from_frame(frame))
    }

    pub fn from_frame(frame: DataFrame) -> Self {
        let columns = frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        Self { frame, columns }
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Rows `start..start + count`, clamped to the frame
    pub fn rows(&self, start: usize, count: usize) -> Vec<Row> {
        let end = (start + count).min(self.row_count());
        if start >= end {
            return Vec::new();
        }

        let slice = self.frame.slice(start as i64, end - start);
        let columns: Vec<(&str, Option<&Column>)> = self
            .columns
            .iter()
            .map(|name| (name.as_str(), slice.column(name).ok()))
            .collect();

        (0..slice.height())
            .map(|idx| {
                columns
                    .iter()
                    .map(|(name, column)| {
                        let cell = column.map_or(Cell::Empty, |c| polars_value_to_cell(c, idx));
                        (*name, cell)
                    })
                    .collect()
            })
            .collect()
    }

    /// Materialize every row, refusing frames above `max_rows`
    pub fn to_rows(&self, max_rows: usize) -> DataResult<Vec<Row>> {
        let total = self.row_count();
        if total > max_rows {
            return Err(DataError::TooManyRows {
                rows: total,
                max_rows,
            });
        }

        let mut rows = Vec::with_capacity(total);
        for start in (0..total).step_by(FRAME_CHUNK_SIZE) {
            rows.extend(self.rows(start, FRAME_CHUNK_SIZE));
        }
        tracing::debug!(
            rows = rows.len(),
            columns = self.columns.len(),
            "Materialized frame"
        );
        Ok(rows)
    }
}

/// Convert a polars cell value to a Cell
fn polars_value_to_cell(column: &Column, row_idx: usize) -> Cell {
    let Ok(value) = column.get(row_idx) else {
        return Cell::Empty;
    };
    match value {
        AnyValue::Null => Cell::Empty,
        AnyValue::Boolean(v) => Cell::Boolean(v),
        AnyValue::Int8(v) => Cell::Number(v as f64),
        AnyValue::Int16(v) => Cell::Number(v as f64),
        AnyValue::Int32(v) => Cell::Number(v as f64),
        AnyValue::Int64(v) => Cell::Number(v as f64),
        AnyValue::UInt8(v) => Cell::Number(v as f64),
        AnyValue::UInt16(v) => Cell::Number(v as f64),
        AnyValue::UInt32(v) => Cell::Number(v as f64),
        AnyValue::UInt64(v) => Cell::Number(v as f64),
        AnyValue::Float32(v) => Cell::Number(v as f64),
        AnyValue::Float64(v) => Cell::Number(v),
        AnyValue::String(s) => Cell::text(s),
        AnyValue::StringOwned(s) => Cell::text(s.as_str()),
        // Dates, times and nested values keep their display form
        other => Cell::Text(other.to_string()),
    }
}
