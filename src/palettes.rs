//! Named colour palettes.
//!
//! Colours are opaque strings handed to the renderer; series and slices
//! pick them by index modulo the palette length.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Key of the palette used when none (or an unknown one) is selected
pub const DEFAULT_PALETTE_KEY: &str = "blueGreen";

/// Built-in palettes: key, display label, colours
const BUILTIN: &[(&str, &str, [&str; 6])] = &[
    (
        "blueGreen",
        "Blue/Green",
        ["#0ea5e9", "#10b981", "#6366f1", "#22d3ee", "#14b8a6", "#60a5fa"],
    ),
    (
        "tealOrange",
        "Teal/Orange",
        ["#0d9488", "#f97316", "#14b8a6", "#fb923c", "#2dd4bf", "#fdba74"],
    ),
    (
        "grape",
        "Grape",
        ["#7c3aed", "#a855f7", "#22c55e", "#eab308", "#ef4444", "#06b6d4"],
    ),
    (
        "slate",
        "Slate",
        ["#334155", "#64748b", "#94a3b8", "#60a5fa", "#22c55e", "#f59e0b"],
    ),
];

static PALETTES: Lazy<IndexMap<&'static str, (&'static str, Palette)>> = Lazy::new(|| {
    BUILTIN
        .iter()
        .map(|(key, label, colors)| {
            let palette = Palette(colors.iter().map(|c| c.to_string()).collect());
            (*key, (*label, palette))
        })
        .collect()
});

/// A non-empty ordered list of colours
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Returns `None` for an empty colour list
    pub fn new(colors: Vec<String>) -> Option<Self> {
        (!colors.is_empty()).then_some(Self(colors))
    }

    /// Look up a built-in palette, falling back to the default one
    pub fn named(key: &str) -> Self {
        match PALETTES.get(key) {
            Some((_, palette)) => palette.clone(),
            None => {
                tracing::debug!(key, "Unknown palette, using {}", DEFAULT_PALETTE_KEY);
                Self::default()
            }
        }
    }

    /// Colour for the `index`-th series, wrapping around
    pub fn color(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

}

impl Default for Palette {
    fn default() -> Self {
        PALETTES[DEFAULT_PALETTE_KEY].1.clone()
    }
}

/// Built-in palettes as (key, label) pairs in display order
pub fn palette_options() -> Vec<(&'static str, &'static str)> {
    PALETTES.iter().map(|(key, (label, _))| (*key, *label)).collect()
}
