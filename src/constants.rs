//! Application-wide constants.
//!
//! Centralizes thresholds and limits used by the loaders and the
//! data pipeline.

// ============================================================================
// Loading Limits
// ============================================================================

/// Maximum number of CSV rows to load eagerly
pub const MAX_CSV_ROWS: usize = 100_000;

/// Maximum file size in MB for eager parsing; larger files go through polars
pub const MAX_CSV_SIZE_MB: u64 = 100;

/// Files above this size in MB are refused outright
pub const MAX_FILE_SIZE_MB: u64 = 1_024;

/// Rows per chunk when materializing a polars frame into rows
pub const FRAME_CHUNK_SIZE: usize = 1_000;

/// Rows polars looks at when inferring a frame schema
pub const FRAME_SCHEMA_SAMPLE: usize = 1_000;

// ============================================================================
// Type Inference
// ============================================================================

/// Number of leading rows sampled per column
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Share of sampled rows that must agree before a column gets a non-text type
pub const TYPE_MAJORITY_RATIO: f64 = 0.6;

// ============================================================================
// Chart Styling
// ============================================================================

/// Border width of line datasets
pub const LINE_BORDER_WIDTH: u32 = 2;

/// Curve tension of line datasets
pub const LINE_TENSION: f64 = 0.3;

/// Border width of bar datasets and pie slices
pub const BAR_BORDER_WIDTH: u32 = 1;

/// Border colour between pie slices
pub const PIE_BORDER_COLOR: &str = "#fff";

// ============================================================================
// Sharing & Export
// ============================================================================

/// Fragment key carrying the compressed state
pub const SHARE_STATE_KEY: &str = "state";

/// Base URL used when no settings override it
pub const DEFAULT_SHARE_BASE_URL: &str = "https://chartify.app/app";

/// File stem used for exports of untitled charts
pub const DEFAULT_EXPORT_STEM: &str = "chartify-chart";

/// Length of the random suffix appended to export file names
pub const EXPORT_SUFFIX_LEN: usize = 6;

// ============================================================================
// Performance
// ============================================================================

/// Pipeline stages slower than this are logged as warnings
pub const SLOW_STAGE_MS: f64 = 50.0;

// ============================================================================
// Configuration
// ============================================================================

/// Directory under the platform config dir holding the settings file
pub const CONFIG_DIR_NAME: &str = "chartify";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Log filter used when neither `RUST_LOG` nor the settings provide one
pub const DEFAULT_LOG_FILTER: &str = "chartify=info";
