//! Pipeline timing.
//!
//! Stages of the data pipeline (loading, inference, filtering, series
//! building) are wrapped in [`ScopedTimer`]s. A stage slower than its
//! threshold is logged as a warning.
//!
//! Building with the `profiling` feature additionally traces every stage
//! with its nesting depth:
//! ```toml
//! [dependencies]
//! chartify = { features = ["profiling"] }
//! ```

use crate::constants::SLOW_STAGE_MS;
use std::time::Instant;
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// RAII timer that reports when dropped.
#[must_use = "the timer measures until it is dropped"]
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

impl ScopedTimer {
    /// Create a timer that warns when the scope takes longer than `threshold_ms`.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Timer for a pipeline stage, using [`SLOW_STAGE_MS`]
    pub fn stage(name: &'static str) -> Self {
        Self::new(name, SLOW_STAGE_MS)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            let indent = "  ".repeat(self.depth);
            trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
        }

        if elapsed_ms > self.threshold_ms {
            warn!(
                stage = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow pipeline stage"
            );
        }
    }
}
