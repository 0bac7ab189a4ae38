//! User settings.
//!
//! Stored as JSON at `<config_dir>/chartify/settings.json`. Every field has a
//! default, so partial files are fine; a missing file means all defaults and
//! an unreadable one is reported and ignored.

use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_LOG_FILTER, DEFAULT_SAMPLE_SIZE, DEFAULT_SHARE_BASE_URL,
    MAX_CSV_ROWS, MAX_CSV_SIZE_MB, MAX_FILE_SIZE_MB, SETTINGS_FILE_NAME,
};
use crate::data::LoadLimits;
use crate::palettes::DEFAULT_PALETTE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Palette for new sessions
    pub palette: String,
    /// Rows sampled per column during type inference
    pub sample_size: usize,
    /// Page that share links point at
    pub share_base_url: String,
    pub max_rows: usize,
    /// Files above this size are loaded through polars
    pub max_eager_size_mb: u64,
    pub max_file_size_mb: u64,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE_KEY.to_string(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            max_rows: MAX_CSV_ROWS,
            max_eager_size_mb: MAX_CSV_SIZE_MB,
            max_file_size_mb: MAX_FILE_SIZE_MB,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Location of the settings file, if the platform has a config directory
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(SETTINGS_FILE_NAME))
}

impl Settings {
    /// Load from the default location
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read settings from {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    pub fn load_limits(&self) -> LoadLimits {
        LoadLimits {
            max_rows: self.max_rows,
            max_eager_size_mb: self.max_eager_size_mb,
            max_file_size_mb: self.max_file_size_mb,
        }
    }
}
