//! Application state - the full chart configuration and its reducer.
//!
//! The state is an immutable snapshot owned by one place. Every user action
//! goes through [`AppState::reduce`], which returns a new snapshot; derived
//! data (filtered rows, chart series) is recomputed from scratch on demand.

use crate::constants::DEFAULT_SAMPLE_SIZE;
use crate::palettes::{DEFAULT_PALETTE_KEY, Palette};
use crate::pipeline::{
    ChartRequest, ChartSeries, apply_filters, build_chart_data, column_type,
    infer_columns_with_sample,
};
use crate::types::{
    ChartType, ColumnMeta, ColumnType, FilterOp, FilterRule, MappingTarget, Mappings, Row, Summary,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Snapshot of everything needed to reproduce a chart.
///
/// This is also the payload of a share link, so field names and defaults
/// must stay stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppState {
    pub rows: Vec<Row>,
    pub columns: Vec<ColumnMeta>,
    pub chart_type: ChartType,
    pub palette_key: String,
    pub show_legend: bool,
    pub show_data_labels: bool,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub filters: Vec<FilterRule>,
    pub mappings: Mappings,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            chart_type: ChartType::default(),
            palette_key: DEFAULT_PALETTE_KEY.to_string(),
            show_legend: false,
            show_data_labels: false,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            filters: Vec::new(),
            mappings: Mappings::default(),
        }
    }
}

/// Partial update of a filter rule; `None` fields are left unchanged
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterPatch {
    pub column: Option<String>,
    pub op: Option<FilterOp>,
    pub value: Option<String>,
    pub value2: Option<String>,
}

/// Every change a user can make to the state
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// A new dataset replaced the old one
    DataLoaded(Vec<Row>),
    SetChartType(ChartType),
    SetPalette(String),
    SetTitle(String),
    SetXLabel(String),
    SetYLabel(String),
    SetShowLegend(bool),
    SetShowDataLabels(bool),
    /// Assign a column to a role of the active chart kind
    AssignColumn { target: MappingTarget, column: String },
    /// Unassign a role of the active chart kind
    ClearField(MappingTarget),
    /// Aggregation of bar and line charts
    SetSummary(Summary),
    AddFilter,
    UpdateFilter { id: String, patch: FilterPatch },
    RemoveFilter(String),
    ClearData,
}

impl AppState {
    /// A fresh state with legends shown, as a new session starts
    pub fn new() -> Self {
        Self {
            show_legend: true,
            ..Default::default()
        }
    }

    /// Apply an action, producing the next state
    pub fn reduce(self, action: Action) -> Self {
        self.reduce_with_sample(action, DEFAULT_SAMPLE_SIZE)
    }

    /// Apply an action, inferring column types from `sample_size` rows
    pub fn reduce_with_sample(mut self, action: Action, sample_size: usize) -> Self {
        match action {
            Action::DataLoaded(rows) => {
                let columns = infer_columns_with_sample(&rows, sample_size);
                self.apply_default_mappings(&columns);
                self.rows = rows;
                self.columns = columns;
                self.filters.clear();
            }
            Action::SetChartType(chart_type) => self.chart_type = chart_type,
            Action::SetPalette(key) => self.palette_key = key,
            Action::SetTitle(title) => self.title = title,
            Action::SetXLabel(label) => self.x_label = label,
            Action::SetYLabel(label) => self.y_label = label,
            Action::SetShowLegend(show) => self.show_legend = show,
            Action::SetShowDataLabels(show) => self.show_data_labels = show,
            Action::AssignColumn { target, column } => self.set_field(target, column),
            Action::ClearField(target) => self.set_field(target, String::new()),
            Action::SetSummary(summary) => self.mappings.bar_line.summary = summary,
            Action::AddFilter => {
                let column = self
                    .columns
                    .first()
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                let id = uuid::Uuid::new_v4().to_string();
                self.filters
                    .push(FilterRule::new(id, column, FilterOp::Equals, "").with_value2(""));
            }
            Action::UpdateFilter { id, patch } => {
                if let Some(rule) = self.filters.iter_mut().find(|r| r.id == id) {
                    if let Some(column) = patch.column {
                        rule.column = column;
                    }
                    if let Some(op) = patch.op {
                        rule.op = op;
                    }
                    if let Some(value) = patch.value {
                        rule.value = value;
                    }
                    if let Some(value2) = patch.value2 {
                        rule.value2 = Some(value2);
                    }
                }
            }
            Action::RemoveFilter(id) => self.filters.retain(|r| r.id != id),
            Action::ClearData => {
                self = Self {
                    chart_type: self.chart_type,
                    palette_key: self.palette_key,
                    show_legend: self.show_legend,
                    show_data_labels: self.show_data_labels,
                    ..Default::default()
                };
            }
        }
        self
    }

    /// Point the mappings at the first numeric and first non-numeric columns
    fn apply_default_mappings(&mut self, columns: &[ColumnMeta]) {
        let first_number = columns
            .iter()
            .find(|c| c.column_type == ColumnType::Number)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let first_category = columns
            .iter()
            .find(|c| c.column_type != ColumnType::Number)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        let mappings = &mut self.mappings;
        mappings.bar_line.x = first_category.clone();
        mappings.bar_line.y = first_number.clone();
        mappings.scatter.x = first_number.clone();
        mappings.scatter.y = first_number.clone();
        mappings.pie.category = first_category;
        mappings.pie.value = first_number;
    }

    /// Set a role of the active chart kind; roles it does not have are ignored
    fn set_field(&mut self, target: MappingTarget, column: String) {
        let mappings = &mut self.mappings;
        match (self.chart_type, target) {
            (ChartType::Bar | ChartType::Line, MappingTarget::X) => mappings.bar_line.x = column,
            (ChartType::Bar | ChartType::Line, MappingTarget::Y) => mappings.bar_line.y = column,
            (ChartType::Bar | ChartType::Line, MappingTarget::GroupBy) => {
                mappings.bar_line.group_by = Some(column)
            }
            (ChartType::Scatter, MappingTarget::X) => mappings.scatter.x = column,
            (ChartType::Scatter, MappingTarget::Y) => mappings.scatter.y = column,
            (ChartType::Scatter, MappingTarget::GroupBy) => mappings.scatter.group_by = Some(column),
            (ChartType::Pie, MappingTarget::Category) => mappings.pie.category = column,
            (ChartType::Pie, MappingTarget::Value) => mappings.pie.value = column,
            (chart_type, target) => {
                tracing::debug!(
                    chart = chart_type.label(),
                    ?target,
                    "Ignoring assignment to a role the chart does not have"
                );
            }
        }
    }

    /// Rows passing every filter
    pub fn filtered_rows(&self) -> Cow<'_, [Row]> {
        apply_filters(&self.rows, &self.filters, &self.columns)
    }

    /// Palette selected by `palette_key`
    pub fn palette(&self) -> Palette {
        Palette::named(&self.palette_key)
    }

    /// Chart series for the current configuration and filters
    pub fn chart_series(&self) -> ChartSeries {
        let palette = self.palette();
        let rows = self.filtered_rows();
        build_chart_data(&ChartRequest {
            rows: &rows,
            columns: &self.columns,
            chart_type: self.chart_type,
            mappings: &self.mappings,
            palette: &palette,
        })
    }

    /// Type of a column, text when unknown
    pub fn column_type(&self, name: &str) -> ColumnType {
        column_type(&self.columns, name)
    }

    /// Operators a filter on `name` can use
    pub fn operators_for(&self, name: &str) -> &'static [FilterOp] {
        FilterOp::for_type(self.column_type(name))
    }
}
