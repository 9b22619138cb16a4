//! Coverage cache and load/unload differ.

use std::collections::HashSet;

use super::coord::ChunkCoord;

/// Load/unload delta between two successive coverage sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageDelta {
    /// Chunks covered now but not before, in first-occurrence order.
    pub entered: Vec<ChunkCoord>,
    /// Chunks covered before but not now, in previous coverage order.
    pub left: Vec<ChunkCoord>,
}

impl CoverageDelta {
    /// Whether nothing entered or left.
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.left.is_empty()
    }
}

/// Holds the previously computed coverage set.
///
/// Keeps both the enumeration order (for a stable `left` order) and a
/// HashSet for membership tests. Duplicates in the input are dropped.
#[derive(Clone, Debug, Default)]
pub struct CoverageCache {
    /// Previous coverage in first-occurrence order.
    coords: Vec<ChunkCoord>,
    /// Same coordinates as `coords`, for lookups.
    members: HashSet<ChunkCoord>,
}

impl CoverageCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            coords: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Diff `current` against the stored coverage, then store `current`.
    ///
    /// # Example
    /// ```
    /// use region_loader::{ChunkCoord, CoverageCache};
    ///
    /// let a = ChunkCoord::new(0, 0, 0);
    /// let b = ChunkCoord::new(16, 0, 0);
    /// let c = ChunkCoord::new(32, 0, 0);
    ///
    /// let mut cache = CoverageCache::new();
    /// cache.diff([a, b]);
    ///
    /// let delta = cache.diff([b, c]);
    /// assert_eq!(delta.entered, vec![c]);
    /// assert_eq!(delta.left, vec![a]);
    /// ```
    pub fn diff<I>(&mut self, current: I) -> CoverageDelta
    where
        I: IntoIterator<Item = ChunkCoord>,
    {
        let mut delta = CoverageDelta::default();
        self.diff_into(current, &mut delta.entered, &mut delta.left);
        delta
    }

    /// Like [`diff`](Self::diff), appending into caller-owned buffers.
    ///
    /// The buffers are cleared first so stale entries never survive.
    pub fn diff_into<I>(
        &mut self,
        current: I,
        entered: &mut Vec<ChunkCoord>,
        left: &mut Vec<ChunkCoord>,
    ) where
        I: IntoIterator<Item = ChunkCoord>,
    {
        entered.clear();
        left.clear();

        let current = current.into_iter();
        let capacity = current.size_hint().0;
        let mut next_coords = Vec::with_capacity(capacity);
        let mut next_members = HashSet::with_capacity(capacity);

        for coord in current {
            if !next_members.insert(coord) {
                continue;
            }
            next_coords.push(coord);
            if !self.members.contains(&coord) {
                entered.push(coord);
            }
        }

        left.extend(
            self.coords
                .iter()
                .copied()
                .filter(|coord| !next_members.contains(coord)),
        );

        self.coords = next_coords;
        self.members = next_members;
    }

    /// Check if a chunk is in the stored coverage.
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.members.contains(&coord)
    }

    /// Stored coverage in enumeration order.
    pub fn as_slice(&self) -> &[ChunkCoord] {
        &self.coords
    }

    /// Number of covered chunks.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether nothing is covered.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Forget the stored coverage.
    pub fn clear(&mut self) {
        self.coords.clear();
        self.members.clear();
    }
}
