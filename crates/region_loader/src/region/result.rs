//! Per-refresh outcome returned to the caller.

use super::cache::CoverageDelta;
use super::coord::ChunkCoord;

/// Outcome of one refresh.
///
/// `valid` is false when the refresh was debounced; `entered` and `left` are
/// then empty and the caller has nothing to do this tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionResult {
    /// Whether a recomputation was performed.
    pub valid: bool,
    /// Chunks to load.
    pub entered: Vec<ChunkCoord>,
    /// Chunks to unload.
    pub left: Vec<ChunkCoord>,
}

impl RegionResult {
    /// Result of a debounced refresh.
    pub fn skipped() -> Self {
        Self::default()
    }

    /// Check whether the refresh recomputed coverage.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether there is nothing to load or unload.
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.left.is_empty()
    }

    /// Reset to the debounced state, keeping allocations.
    pub fn clear(&mut self) {
        self.valid = false;
        self.entered.clear();
        self.left.clear();
    }
}

impl From<CoverageDelta> for RegionResult {
    fn from(delta: CoverageDelta) -> Self {
        Self {
            valid: true,
            entered: delta.entered,
            left: delta.left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_is_invalid_and_empty() {
        let result = RegionResult::skipped();
        assert!(!result.is_valid());
        assert!(result.is_empty());
    }

    #[test]
    fn from_delta_is_valid() {
        let delta = CoverageDelta {
            entered: vec![ChunkCoord::ZERO],
            left: vec![],
        };
        let result = RegionResult::from(delta);
        assert!(result.is_valid());
        assert_eq!(result.entered, vec![ChunkCoord::ZERO]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut result = RegionResult {
            valid: true,
            entered: Vec::with_capacity(32),
            left: vec![ChunkCoord::ZERO],
        };
        result.clear();
        assert!(!result.is_valid());
        assert!(result.is_empty());
        assert!(result.entered.capacity() >= 32);
    }
}
