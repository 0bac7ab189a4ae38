//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `row()` / `rows()` - rows from string pairs
//! - `TestStateBuilder` - builder driving an `AppState` through its reducer
//! - Fixture files written into a temporary directory

#![allow(dead_code)]

use chartify::state::{Action, AppState, FilterPatch};
use chartify::types::{Cell, ChartType, FilterOp, MappingTarget, Row};
use std::path::PathBuf;
use tempfile::TempDir;

/// Regional sales with one unparseable amount
pub const SALES_CSV: &str = "\
region,product,sales,date
North,Widget,100,2024-01-05
South,Gadget,250,2024-01-20
North,Gadget,75,2024-02-03
East,Widget,n/a,2024-02-14
South,Widget,125,2024-03-01
";

/// A row of text cells
pub fn row(pairs: &[(&str, &str)]) -> Row {
    pairs.iter().map(|(k, v)| (*k, Cell::text(*v))).collect()
}

/// Rows of text cells
pub fn rows(data: &[&[(&str, &str)]]) -> Vec<Row> {
    data.iter().map(|pairs| row(pairs)).collect()
}

/// The rows used throughout the examples: A/10, B/5, A/3
pub fn cat_val_rows() -> Vec<Row> {
    vec![
        [("cat", Cell::text("A")), ("val", Cell::Number(10.0))].into_iter().collect(),
        [("cat", Cell::text("B")), ("val", Cell::Number(5.0))].into_iter().collect(),
        [("cat", Cell::text("A")), ("val", Cell::Number(3.0))].into_iter().collect(),
    ]
}

/// Write `content` to `name` inside a fresh temp dir.
///
/// The dir must be kept alive for as long as the file is used.
pub fn fixture_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

// ============================================================================
// TestStateBuilder - Builder pattern for app states
// ============================================================================

/// Builder for app states, applying every step through the reducer.
///
/// # Example
/// ```ignore
/// let state = TestStateBuilder::new(rows)
///     .chart(ChartType::Pie)
///     .assign(MappingTarget::Category, "region")
///     .filter("sales", ">", "100", None)
///     .build();
/// ```
pub struct TestStateBuilder {
    state: AppState,
}

impl TestStateBuilder {
    /// Start from a fresh session with `rows` loaded
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            state: AppState::new().reduce(Action::DataLoaded(rows)),
        }
    }

    pub fn chart(mut self, chart_type: ChartType) -> Self {
        self.state = self.state.reduce(Action::SetChartType(chart_type));
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.state = self.state.reduce(Action::SetTitle(title.to_string()));
        self
    }

    pub fn palette(mut self, key: &str) -> Self {
        self.state = self.state.reduce(Action::SetPalette(key.to_string()));
        self
    }

    /// Assign a column to a role of the current chart type
    pub fn assign(mut self, target: MappingTarget, column: &str) -> Self {
        self.state = self.state.reduce(Action::AssignColumn {
            target,
            column: column.to_string(),
        });
        self
    }

    /// Add a filter rule through AddFilter + UpdateFilter
    pub fn filter(mut self, column: &str, op: &str, value: &str, value2: Option<&str>) -> Self {
        self.state = self.state.reduce(Action::AddFilter);
        let id = self.state.filters.last().unwrap().id.clone();
        self.state = self.state.reduce(Action::UpdateFilter {
            id,
            patch: FilterPatch {
                column: Some(column.to_string()),
                op: Some(FilterOp::from(op)),
                value: Some(value.to_string()),
                value2: value2.map(str::to_string),
            },
        });
        self
    }

    pub fn build(self) -> AppState {
        self.state
    }
}
