//! Data transformation pipeline
//!
//! Raw rows flow through three pure stages:
//!
//! 1. [`infer_columns`] classifies every column as number, date or text
//! 2. [`apply_filters`] keeps the rows satisfying all filter rules
//! 3. [`build_chart_data`] aggregates the kept rows into a [`ChartSeries`]
//!
//! None of the stages fail: malformed values are coerced the way a
//! spreadsheet user would expect (see [`coerce`]) and degenerate input
//! produces empty output.

pub mod coerce;
mod filter;
mod infer;
mod series;

pub use filter::*;
pub use infer::*;
pub use series::*;
