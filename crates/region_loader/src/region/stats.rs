//! Counters describing loader activity.

/// Running totals for a [`RegionLoader`](super::RegionLoader).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoaderStats {
    /// Calls to `refresh` and `force_refresh`.
    pub refresh_calls: u64,
    /// Calls that recomputed coverage.
    pub recomputations: u64,
    /// Calls skipped because the center chunk was unchanged.
    pub debounced: u64,
    /// Calls made through `force_refresh`.
    pub forced: u64,
    /// Total chunks reported as entered.
    pub chunks_entered: u64,
    /// Total chunks reported as left.
    pub chunks_left: u64,
    /// Chunks in the current coverage set.
    pub covered: usize,
}

impl LoaderStats {
    /// Fraction of refresh calls that were debounced.
    pub fn debounce_ratio(&self) -> f32 {
        if self.refresh_calls == 0 {
            return 0.0;
        }
        self.debounced as f32 / self.refresh_calls as f32
    }

    /// Chunks loaded minus chunks unloaded; equals `covered` unless the
    /// loader was cleared.
    pub fn net_loaded(&self) -> i64 {
        self.chunks_entered as i64 - self.chunks_left as i64
    }
}
