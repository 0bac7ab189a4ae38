//! Chart series builder
//!
//! Turns filtered rows and the mapping of the active chart kind into the
//! labels/datasets structure consumed by the chart renderer. Grouping keeps
//! first-occurrence order of categories and groups, never sorted order.

use super::coerce::{to_category, to_number, to_number_or_zero};
use crate::constants::{BAR_BORDER_WIDTH, LINE_BORDER_WIDTH, LINE_TENSION, PIE_BORDER_COLOR};
use crate::palettes::Palette;
use crate::perf::ScopedTimer;
use crate::types::{
    BarLineMapping, ChartMapping, ChartType, ColumnMeta, Mappings, PieMapping, Row,
    ScatterMapping, Summary, assigned,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Processed chart data ready for rendering
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Category labels; scatter charts have none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    /// A series with empty labels and no datasets
    pub fn empty() -> Self {
        Self {
            labels: Some(Vec::new()),
            datasets: Vec::new(),
        }
    }

    /// A label-less series with no datasets
    fn empty_points() -> Self {
        Self {
            labels: None,
            datasets: Vec::new(),
        }
    }

    pub fn labels(&self) -> &[String] {
        self.labels.as_deref().unwrap_or_default()
    }
}

/// One series of values or points
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<DataPoint>,
    pub background_color: Fill,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

impl Dataset {
    /// Plain values of a category dataset; points are skipped
    pub fn values(&self) -> Vec<f64> {
        self.data
            .iter()
            .filter_map(|d| match d {
                DataPoint::Value(v) => Some(*v),
                DataPoint::Point { .. } => None,
            })
            .collect()
    }
}

/// A category value or a scatter point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoint {
    Value(f64),
    Point { x: f64, y: f64 },
}

/// Background colour of a whole dataset or of each data point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fill {
    Single(String),
    PerPoint(Vec<String>),
}

/// Line and bar datasets differ only in these style fields
#[derive(Clone, Copy, Debug, PartialEq)]
struct DatasetStyle {
    border_width: u32,
    fill: bool,
    tension: f64,
}

impl DatasetStyle {
    fn for_chart(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Line => Self {
                border_width: LINE_BORDER_WIDTH,
                fill: false,
                tension: LINE_TENSION,
            },
            _ => Self {
                border_width: BAR_BORDER_WIDTH,
                fill: true,
                tension: 0.0,
            },
        }
    }

    fn dataset(&self, label: String, data: Vec<DataPoint>, color: &str) -> Dataset {
        Dataset {
            label,
            data,
            background_color: Fill::Single(color.to_string()),
            border_color: Some(color.to_string()),
            border_width: Some(self.border_width),
            fill: Some(self.fill),
            tension: Some(self.tension),
        }
    }
}

/// Everything needed to build a chart
#[derive(Clone, Copy, Debug)]
pub struct ChartRequest<'a> {
    pub rows: &'a [Row],
    pub columns: &'a [ColumnMeta],
    pub chart_type: ChartType,
    pub mappings: &'a Mappings,
    pub palette: &'a Palette,
}

/// Build chart-ready series for the requested chart kind
pub fn build_chart_data(request: &ChartRequest<'_>) -> ChartSeries {
    let _timer = ScopedTimer::stage("build_chart_data");
    let ChartRequest { rows, palette, .. } = *request;
    let series = match request.mappings.for_chart(request.chart_type) {
        ChartMapping::Bar(mapping) => build_bar_line(rows, mapping, ChartType::Bar, palette),
        ChartMapping::Line(mapping) => build_bar_line(rows, mapping, ChartType::Line, palette),
        ChartMapping::Scatter(mapping) => build_scatter(rows, mapping, palette),
        ChartMapping::Pie(mapping) => build_pie(rows, mapping, palette),
    };

    tracing::debug!(
        chart = request.chart_type.label(),
        rows = rows.len(),
        columns = request.columns.len(),
        datasets = series.datasets.len(),
        "Built chart series"
    );
    series
}

/// Running aggregate for one category (or category × group cell)
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    count: usize,
    sum: f64,
}

impl Tally {
    fn add(&mut self, y: f64) {
        self.count += 1;
        self.sum += y;
    }

    fn value(&self, summary: Summary) -> f64 {
        match summary {
            Summary::Count => self.count as f64,
            Summary::Sum => self.sum,
        }
    }
}

/// Bar and line charts: one value per distinct x category
pub fn build_bar_line(
    rows: &[Row],
    mapping: &BarLineMapping,
    chart_type: ChartType,
    palette: &Palette,
) -> ChartSeries {
    if mapping.x.is_empty() || mapping.y.is_empty() {
        return ChartSeries::empty();
    }
    let style = DatasetStyle::for_chart(chart_type);

    // Categories in order of first appearance
    let mut categories: IndexMap<String, usize> = IndexMap::new();
    for row in rows {
        let next = categories.len();
        categories.entry(to_category(row.get(&mapping.x))).or_insert(next);
    }
    let labels: Vec<String> = categories.keys().cloned().collect();

    let datasets = match assigned(&mapping.group_by) {
        None => {
            let mut tallies = vec![Tally::default(); categories.len()];
            for row in rows {
                let idx = categories[&to_category(row.get(&mapping.x))];
                tallies[idx].add(to_number_or_zero(row.get(&mapping.y)));
            }
            let data = tallies
                .iter()
                .map(|t| DataPoint::Value(t.value(mapping.summary)))
                .collect();
            vec![style.dataset(mapping.y.clone(), data, palette.color(0))]
        }
        Some(group_key) => {
            let mut groups: IndexMap<String, Vec<Tally>> = IndexMap::new();
            for row in rows {
                let idx = categories[&to_category(row.get(&mapping.x))];
                let tallies = groups
                    .entry(to_category(row.get(group_key)))
                    .or_insert_with(|| vec![Tally::default(); categories.len()]);
                tallies[idx].add(to_number_or_zero(row.get(&mapping.y)));
            }
            groups
                .into_iter()
                .enumerate()
                .map(|(i, (group, tallies))| {
                    let data = tallies
                        .iter()
                        .map(|t| DataPoint::Value(t.value(mapping.summary)))
                        .collect();
                    style.dataset(group, data, palette.color(i))
                })
                .collect()
        }
    };

    ChartSeries {
        labels: Some(labels),
        datasets,
    }
}

/// Scatter charts: numeric points, non-finite coordinates silently dropped
pub fn build_scatter(rows: &[Row], mapping: &ScatterMapping, palette: &Palette) -> ChartSeries {
    if mapping.x.is_empty() || mapping.y.is_empty() {
        return ChartSeries::empty_points();
    }

    let point = |row: &Row| -> Option<DataPoint> {
        let x = to_number(row.get(&mapping.x));
        let y = to_number(row.get(&mapping.y));
        (x.is_finite() && y.is_finite()).then_some(DataPoint::Point { x, y })
    };

    let datasets = match assigned(&mapping.group_by) {
        None => vec![Dataset {
            label: format!("{} vs {}", mapping.y, mapping.x),
            data: rows.iter().filter_map(point).collect(),
            background_color: Fill::Single(palette.color(0).to_string()),
            border_color: None,
            border_width: None,
            fill: None,
            tension: None,
        }],
        Some(group_key) => {
            // Groups are discovered before points are filtered, so a group
            // whose points are all non-finite still gets an empty dataset
            let mut groups: IndexMap<String, Vec<DataPoint>> = IndexMap::new();
            for row in rows {
                let points = groups.entry(to_category(row.get(group_key))).or_default();
                points.extend(point(row));
            }
            groups
                .into_iter()
                .enumerate()
                .map(|(i, (group, data))| Dataset {
                    label: group,
                    data,
                    background_color: Fill::Single(palette.color(i).to_string()),
                    border_color: None,
                    border_width: None,
                    fill: None,
                    tension: None,
                })
                .collect()
        }
    };

    ChartSeries {
        labels: None,
        datasets,
    }
}

/// Pie charts: one slice per distinct category, values summed
pub fn build_pie(rows: &[Row], mapping: &PieMapping, palette: &Palette) -> ChartSeries {
    if mapping.category.is_empty() || mapping.value.is_empty() {
        return ChartSeries::empty();
    }

    let mut slices: IndexMap<String, f64> = IndexMap::new();
    for row in rows {
        *slices.entry(to_category(row.get(&mapping.category))).or_insert(0.0) +=
            to_number_or_zero(row.get(&mapping.value));
    }

    let colors = (0..slices.len())
        .map(|i| palette.color(i).to_string())
        .collect();
    let (labels, values): (Vec<String>, Vec<DataPoint>) = slices
        .into_iter()
        .map(|(label, sum)| (label, DataPoint::Value(sum)))
        .unzip();

    ChartSeries {
        labels: Some(labels),
        datasets: vec![Dataset {
            label: mapping.value.clone(),
            data: values,
            background_color: Fill::PerPoint(colors),
            border_color: Some(PIE_BORDER_COLOR.to_string()),
            border_width: Some(BAR_BORDER_WIDTH),
            fill: None,
            tension: None,
        }],
    }
}
