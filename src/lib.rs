//! Chartify: local tabular data to chart series.
//!
//! Load a CSV or JSON file ([`data`]), infer column types, filter rows and
//! aggregate them into renderer-ready series ([`pipeline`]), and carry the
//! whole configuration in a shareable URL fragment ([`share`]). The
//! configuration itself lives in [`state::AppState`] and changes only
//! through its reducer.

pub mod constants;
pub mod data;
pub mod export;
pub mod palettes;
pub mod perf;
pub mod pipeline;
pub mod settings;
pub mod share;
pub mod state;
pub mod types;

pub use pipeline::{ChartSeries, Dataset, build_chart_data};
pub use share::{decode_state_from_fragment, encode_state_to_url};
pub use state::{Action, AppState};
