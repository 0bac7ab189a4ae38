//! Export helpers: file naming and series output for the renderer.

use crate::constants::{DEFAULT_EXPORT_STEM, EXPORT_SUFFIX_LEN};
use crate::pipeline::ChartSeries;
use rand::Rng;
use std::path::Path;

const SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Lowercase `title`, collapsing every run of non `[a-z0-9]` into one `-`
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// PNG file name for a chart titled `title`, with a random suffix
pub fn export_filename(title: &str) -> String {
    let slug = slugify(title);
    let stem = if slug.is_empty() {
        DEFAULT_EXPORT_STEM
    } else {
        slug.as_str()
    };

    let mut rng = rand::thread_rng();
    let suffix: String = (0..EXPORT_SUFFIX_LEN)
        .map(|_| SUFFIX_CHARS[rng.gen_range(0..SUFFIX_CHARS.len())] as char)
        .collect();
    format!("{stem}-{suffix}.png")
}

/// Write `series` as pretty JSON
pub fn write_series_json(series: &ChartSeries, path: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(series).map_err(std::io::Error::other)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), datasets = series.datasets.len(), "Wrote series");
    Ok(())
}
