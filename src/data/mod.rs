//! Data loading module
//!
//! Turns CSV/TSV and JSON files into the uniform [`Row`] model consumed by
//! the pipeline.
//!
//! ## Performance
//!
//! Files up to [`LoadLimits::max_eager_size_mb`] are parsed eagerly in
//! pure Rust. Larger files are read with polars ([`FrameSource`]) and
//! materialized in chunks.
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Common errors include:
//! - `TooLarge`: File exceeds size limits
//! - `TooManyRows`: Dataset exceeds row limits
//! - `Io`: File system errors
//! - `Csv`/`Json`: Parse errors
//!
//! [`Row`]: crate::types::Row

mod csv_parser;
mod error;
mod frame_source;
mod json_parser;
mod loader;

pub use csv_parser::*;
pub use error::*;
pub use frame_source::*;
pub use json_parser::*;
pub use loader::*;
