//! Single test binary entry point.
//!
//! All integration-style tests compile into one binary to keep link times down.
//!
//! Structure:
//! - helpers: row and state builders shared by the tests
//! - integration: file-to-series and share-link workflows
//! - unit: single-component tests through the public API

mod helpers;
mod integration;
