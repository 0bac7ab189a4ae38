//! Core types for the Chartify data pipeline.
//!
//! This module defines the row model shared by the loaders and the
//! pipeline, the inferred column metadata, chart mappings and filter rules.
//! Serialized field names follow the share-link format (camelCase).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Rows
// ============================================================================

/// A single loosely-typed cell value
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Cell {
    Text(String),
    Number(f64),
    Boolean(bool),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// True for null cells and strings that are blank after trimming
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Number(n) => {
                // Whole numbers are written without a fractional part
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Cell::Boolean(b) => serializer.serialize_bool(*b),
            Cell::Empty => serializer.serialize_unit(),
        }
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Cell::Empty,
            Value::Bool(b) => Cell::Boolean(b),
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            Value::String(s) => Cell::Text(s),
            // Nested structures are kept as their JSON text
            other => Cell::Text(other.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Boolean(value)
    }
}

/// One record of a dataset, keyed by column name in source order.
///
/// A key that is absent is different from a key holding [`Cell::Empty`]:
/// coercions treat the former as "undefined" and the latter as "null".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, Cell>);

impl Row {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.0.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: impl Into<Cell>) {
        self.0.insert(column.into(), cell.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, C: Into<Cell>> FromIterator<(K, C)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, c)| (k.into(), c.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Column Metadata
// ============================================================================

/// Inferred semantic type of a column
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Date,
    #[default]
    Text,
}

impl ColumnType {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Text => "text",
        }
    }
}

/// Column name with its inferred type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnMeta {
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
        }
    }
}

// ============================================================================
// Chart Types
// ============================================================================

/// Types of charts available
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
}

impl ChartType {
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Scatter => "scatter",
            ChartType::Pie => "pie",
        }
    }

    pub fn all() -> &'static [ChartType] {
        &[ChartType::Bar, ChartType::Line, ChartType::Scatter, ChartType::Pie]
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::all()
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown chart type: {s}"))
    }
}

/// How bar/line values are aggregated per category
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Summary {
    #[default]
    Sum,
    Count,
}

impl FromStr for Summary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(Summary::Sum),
            "count" => Ok(Summary::Count),
            _ => Err(format!("unknown summary: {s}")),
        }
    }
}

// ============================================================================
// Mappings
// ============================================================================

/// Column roles for bar and line charts. Empty strings are unassigned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarLineMapping {
    pub x: String,
    pub y: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    pub summary: Summary,
}

/// Column roles for scatter charts
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScatterMapping {
    pub x: String,
    pub y: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
}

/// Column roles for pie charts
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieMapping {
    pub category: String,
    pub value: String,
}

/// The mapping of every chart family, so switching chart type keeps each one
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Mappings {
    pub bar_line: BarLineMapping,
    pub scatter: ScatterMapping,
    pub pie: PieMapping,
}

/// The mapping relevant to one chart kind
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartMapping<'a> {
    Bar(&'a BarLineMapping),
    Line(&'a BarLineMapping),
    Scatter(&'a ScatterMapping),
    Pie(&'a PieMapping),
}

impl Mappings {
    pub fn for_chart(&self, chart_type: ChartType) -> ChartMapping<'_> {
        match chart_type {
            ChartType::Bar => ChartMapping::Bar(&self.bar_line),
            ChartType::Line => ChartMapping::Line(&self.bar_line),
            ChartType::Scatter => ChartMapping::Scatter(&self.scatter),
            ChartType::Pie => ChartMapping::Pie(&self.pie),
        }
    }
}

/// Treats an absent or empty group column as "no grouping"
pub fn assigned(column: &Option<String>) -> Option<&str> {
    column.as_deref().filter(|c| !c.is_empty())
}

/// A role a column can be assigned to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingTarget {
    X,
    Y,
    GroupBy,
    Category,
    Value,
}

// ============================================================================
// Filters
// ============================================================================

/// Comparison operator of a filter rule.
///
/// Operators are kept verbatim when unknown so a rule round-trips through a
/// share link unchanged; the filter engine lets such rules pass every row.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Between,
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    Other(String),
}

impl FilterOp {
    pub fn as_str(&self) -> &str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "!=",
            FilterOp::Gt => ">",
            FilterOp::Ge => ">=",
            FilterOp::Lt => "<",
            FilterOp::Le => "<=",
            FilterOp::Between => "between",
            FilterOp::Contains => "contains",
            FilterOp::Equals => "equals",
            FilterOp::StartsWith => "startsWith",
            FilterOp::EndsWith => "endsWith",
            FilterOp::Other(op) => op,
        }
    }

    const ORDERED: &'static [FilterOp] = &[
        FilterOp::Eq,
        FilterOp::Ne,
        FilterOp::Gt,
        FilterOp::Ge,
        FilterOp::Lt,
        FilterOp::Le,
        FilterOp::Between,
    ];

    const TEXTUAL: &'static [FilterOp] = &[
        FilterOp::Contains,
        FilterOp::Equals,
        FilterOp::StartsWith,
        FilterOp::EndsWith,
    ];

    /// Operators offered for a column type
    pub fn for_type(column_type: ColumnType) -> &'static [FilterOp] {
        match column_type {
            ColumnType::Number | ColumnType::Date => Self::ORDERED,
            ColumnType::Text => Self::TEXTUAL,
        }
    }
}

impl From<&str> for FilterOp {
    fn from(op: &str) -> Self {
        match op {
            "=" => FilterOp::Eq,
            "!=" => FilterOp::Ne,
            ">" => FilterOp::Gt,
            ">=" => FilterOp::Ge,
            "<" => FilterOp::Lt,
            "<=" => FilterOp::Le,
            "between" => FilterOp::Between,
            "contains" => FilterOp::Contains,
            "equals" => FilterOp::Equals,
            "startsWith" => FilterOp::StartsWith,
            "endsWith" => FilterOp::EndsWith,
            other => FilterOp::Other(other.to_string()),
        }
    }
}

impl From<String> for FilterOp {
    fn from(op: String) -> Self {
        FilterOp::from(op.as_str())
    }
}

impl From<FilterOp> for String {
    fn from(op: FilterOp) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single predicate on one column
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterRule {
    pub id: String,
    pub column: String,
    pub op: FilterOp,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,
}

impl FilterRule {
    pub fn new(
        id: impl Into<String>,
        column: impl Into<String>,
        op: impl Into<FilterOp>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            op: op.into(),
            value: value.into(),
            value2: None,
        }
    }

    pub fn with_value2(mut self, value2: impl Into<String>) -> Self {
        self.value2 = Some(value2.into());
        self
    }
}
