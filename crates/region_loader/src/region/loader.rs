//! RegionLoader - debounced coverage refresh around a moving point.

use glam::Vec3;
use log::{debug, trace};

use super::cache::CoverageCache;
use super::config::LoaderConfig;
use super::coord::{ChunkCoord, ChunkSize};
use super::gather::Gather;
use super::result::RegionResult;
use super::shape::RegionShape;
use super::stats::LoaderStats;
use crate::convert::world_to_chunk;
use crate::debug::{generate_debug_region, DebugRegion};
use crate::error::Result;

/// Tracks which chunks are covered around a reference point.
///
/// Handles:
/// - Mapping the reference position to its center chunk
/// - Skipping recomputation while the center chunk is unchanged
/// - Enumerating the configured shape and diffing it against the last result
///
/// Call [`refresh`](Self::refresh) once per tick. The caller owns whatever
/// it instantiates per chunk: it creates objects for `entered`, removes them
/// for `left`, and releases everything itself on teardown.
#[derive(Debug)]
pub struct RegionLoader {
    /// Shape and debug settings.
    config: LoaderConfig,

    /// Center used by the last recomputation; `None` until the first one.
    last_center: Option<ChunkCoord>,

    /// Coverage from the last recomputation.
    cache: CoverageCache,

    stats: LoaderStats,
}

impl RegionLoader {
    /// Create a loader for `shape` with default debug settings.
    pub fn new(shape: RegionShape) -> Result<Self> {
        Self::from_config(LoaderConfig::with_shape(shape))
    }

    /// Create a loader from a full configuration.
    pub fn from_config(config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            last_center: None,
            cache: CoverageCache::new(),
            stats: LoaderStats::default(),
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Current shape.
    pub fn shape(&self) -> RegionShape {
        self.config.shape
    }

    /// Replace the shape.
    ///
    /// An invalid shape is rejected and the old one kept. The cached coverage
    /// is untouched; follow with [`force_refresh`](Self::force_refresh) to
    /// apply the new shape without waiting for the center to move.
    pub fn set_shape(&mut self, shape: RegionShape) -> Result<()> {
        shape.validate()?;
        debug!("region shape changed from {:?} to {:?}", self.config.shape, shape);
        self.config.shape = shape;
        Ok(())
    }

    /// Enable or disable debug geometry.
    pub fn set_show_debug(&mut self, show: bool) {
        self.config.show_debug = show;
    }

    /// Set the chunk size used for debug geometry.
    pub fn set_debug_chunk_size(&mut self, size: ChunkSize) {
        self.config.debug_chunk_size = size.get();
    }

    /// Center chunk of the last recomputation.
    pub fn last_center(&self) -> Option<ChunkCoord> {
        self.last_center
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// Refresh coverage for a reference position.
    ///
    /// Returns an invalid result without touching the cache when `position`
    /// is in the same chunk as the last recomputation.
    ///
    /// # Example
    /// ```
    /// use glam::Vec3;
    /// use region_loader::{ChunkSize, RegionLoader, RegionShape};
    ///
    /// let mut loader = RegionLoader::new(RegionShape::sphere(1).unwrap()).unwrap();
    /// let size = ChunkSize::DEFAULT;
    ///
    /// let first = loader.refresh(Vec3::new(1.0, 2.0, 3.0), size);
    /// assert!(first.valid);
    /// assert_eq!(first.entered.len(), 7);
    ///
    /// // Same chunk: debounced.
    /// assert!(!loader.refresh(Vec3::new(15.0, 2.0, 3.0), size).valid);
    ///
    /// // Next chunk over on +X.
    /// let moved = loader.refresh(Vec3::new(17.0, 2.0, 3.0), size);
    /// assert!(moved.valid);
    /// assert_eq!(moved.entered.len(), 5);
    /// assert_eq!(moved.left.len(), 5);
    /// ```
    pub fn refresh(&mut self, position: Vec3, size: ChunkSize) -> RegionResult {
        match self.next_center(position, size, false) {
            Some(center) => self.recompute(center, size),
            None => RegionResult::skipped(),
        }
    }

    /// Recompute coverage even if the center chunk is unchanged.
    pub fn force_refresh(&mut self, position: Vec3, size: ChunkSize) -> RegionResult {
        match self.next_center(position, size, true) {
            Some(center) => self.recompute(center, size),
            None => RegionResult::skipped(),
        }
    }

    /// [`refresh`](Self::refresh) into a caller-owned result.
    ///
    /// Both sequences are cleared before anything is written.
    pub fn refresh_into(&mut self, position: Vec3, size: ChunkSize, result: &mut RegionResult) {
        match self.next_center(position, size, false) {
            Some(center) => self.recompute_into(center, size, result),
            None => result.clear(),
        }
    }

    /// [`force_refresh`](Self::force_refresh) into a caller-owned result.
    pub fn force_refresh_into(
        &mut self,
        position: Vec3,
        size: ChunkSize,
        result: &mut RegionResult,
    ) {
        match self.next_center(position, size, true) {
            Some(center) => self.recompute_into(center, size, result),
            None => result.clear(),
        }
    }

    /// Count the call and pick the center to recompute at.
    ///
    /// `None` when the call is debounced.
    fn next_center(
        &mut self,
        position: Vec3,
        size: ChunkSize,
        forced: bool,
    ) -> Option<ChunkCoord> {
        self.stats.refresh_calls += 1;
        let center = world_to_chunk(position, size);

        if forced {
            self.stats.forced += 1;
        } else if self.last_center == Some(center) {
            self.stats.debounced += 1;
            trace!("region refresh skipped, center unchanged at {center}");
            return None;
        }

        self.last_center = Some(center);
        Some(center)
    }

    fn recompute(&mut self, center: ChunkCoord, size: ChunkSize) -> RegionResult {
        let delta = self.cache.diff(self.config.shape.gather(center, size));
        self.record(center, &delta.entered, &delta.left);
        RegionResult::from(delta)
    }

    fn recompute_into(&mut self, center: ChunkCoord, size: ChunkSize, result: &mut RegionResult) {
        let coords = self.config.shape.gather(center, size);
        self.cache
            .diff_into(coords, &mut result.entered, &mut result.left);
        result.valid = true;
        self.record(center, &result.entered, &result.left);
    }

    fn record(&mut self, center: ChunkCoord, entered: &[ChunkCoord], left: &[ChunkCoord]) {
        self.stats.recomputations += 1;
        self.stats.chunks_entered += entered.len() as u64;
        self.stats.chunks_left += left.len() as u64;

        debug!(
            "region refreshed at {center}: {} entered, {} left, {} covered",
            entered.len(),
            left.len(),
            self.cache.len()
        );
    }

    // ========================================================================
    // Debug / Inspection
    // ========================================================================

    /// Enumerate the configured shape at the last center without changing
    /// any state.
    ///
    /// Uses the origin chunk if the loader has never refreshed.
    pub fn gather_debug(&self, size: ChunkSize) -> Gather {
        let center = self.last_center.unwrap_or(ChunkCoord::ZERO);
        self.config.shape.gather(center, size)
    }

    /// Wireframe geometry for the configured region at the last center,
    /// scaled by the debug chunk size.
    ///
    /// `None` when debug drawing is disabled.
    pub fn debug_region(&self) -> Option<DebugRegion> {
        if !self.config.show_debug {
            return None;
        }
        let size = self.config.debug_chunk_size().ok()?;
        Some(generate_debug_region(self.gather_debug(size), size))
    }

    /// Currently covered chunks in enumeration order.
    pub fn loaded(&self) -> &[ChunkCoord] {
        self.cache.as_slice()
    }

    /// Number of currently covered chunks.
    pub fn loaded_count(&self) -> usize {
        self.cache.len()
    }

    /// Check if a chunk is currently covered.
    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.cache.contains(coord)
    }

    /// Activity counters.
    pub fn stats(&self) -> LoaderStats {
        LoaderStats {
            covered: self.cache.len(),
            ..self.stats.clone()
        }
    }

    /// Forget the cached coverage and last center.
    ///
    /// Emits no unload delta; the caller is expected to release every chunk
    /// it holds. The next refresh starts from an empty cache.
    pub fn clear(&mut self) {
        debug!("region loader cleared, dropping {} covered chunks", self.cache.len());
        self.cache.clear();
        self.last_center = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use std::collections::{HashMap, HashSet};

    fn sphere(radius: i32) -> RegionLoader {
        RegionLoader::new(RegionShape::sphere(radius).unwrap()).unwrap()
    }

    fn cube(size: IVec3, per_axis: bool, centered: bool) -> RegionLoader {
        RegionLoader::new(RegionShape::cube(size, per_axis, centered).unwrap()).unwrap()
    }

    fn as_set(coords: &[ChunkCoord]) -> HashSet<ChunkCoord> {
        coords.iter().copied().collect()
    }

    #[test]
    fn new_loader_is_empty() {
        let loader = sphere(2);
        assert_eq!(loader.loaded_count(), 0);
        assert!(loader.last_center().is_none());
    }

    #[test]
    fn rejects_invalid_shape() {
        assert!(RegionLoader::new(RegionShape::Sphere { radius: -1 }).is_err());

        let mut loader = sphere(1);
        let bad = RegionShape::Cube {
            size: IVec3::new(-1, 1, 1),
            per_axis: false,
            centered: true,
        };
        assert!(loader.set_shape(bad).is_err());
        assert_eq!(loader.shape(), RegionShape::Sphere { radius: 1 });
    }

    #[test]
    fn first_refresh_at_origin_recomputes() {
        let mut loader = sphere(0);
        let result = loader.refresh(Vec3::ZERO, ChunkSize::DEFAULT);

        assert!(result.valid);
        assert_eq!(result.entered, vec![ChunkCoord::ZERO]);
        assert_eq!(loader.last_center(), Some(ChunkCoord::ZERO));
    }

    #[test]
    fn refresh_in_same_chunk_is_debounced() {
        let mut loader = sphere(2);
        let size = ChunkSize::DEFAULT;

        assert!(loader.refresh(Vec3::new(1.0, 1.0, 1.0), size).valid);
        let loaded = loader.loaded().to_vec();

        let again = loader.refresh(Vec3::new(14.0, 3.0, 9.5), size);
        assert!(!again.valid);
        assert!(again.is_empty());
        assert_eq!(loader.loaded(), loaded.as_slice());
    }

    #[test]
    fn force_refresh_in_same_chunk_is_settled() {
        let mut loader = cube(IVec3::splat(2), true, true);
        let size = ChunkSize::DEFAULT;

        let first = loader.force_refresh(Vec3::splat(3.0), size);
        assert!(first.valid);
        assert_eq!(first.entered.len(), 125);

        let second = loader.force_refresh(Vec3::splat(3.0), size);
        assert!(second.valid);
        assert!(second.is_empty());
    }

    #[test]
    fn force_refresh_applies_new_shape() {
        let mut loader = sphere(0);
        let size = ChunkSize::DEFAULT;
        loader.refresh(Vec3::ZERO, size);

        loader.set_shape(RegionShape::sphere(1).unwrap()).unwrap();
        assert!(!loader.refresh(Vec3::ZERO, size).valid);

        let result = loader.force_refresh(Vec3::ZERO, size);
        assert_eq!(result.entered.len(), 6);
        assert!(result.left.is_empty());
        assert_eq!(loader.loaded_count(), 7);
    }

    #[test]
    fn round_trip_is_symmetric() {
        let mut loader = sphere(4);
        let size = ChunkSize::DEFAULT;
        let p1 = Vec3::new(8.0, 8.0, 8.0);
        let p2 = Vec3::new(40.0, -8.0, 8.0);

        loader.refresh(p1, size);
        let second = loader.refresh(p2, size);
        let third = loader.refresh(p1, size);

        assert!(second.valid && third.valid);
        assert_eq!(as_set(&third.entered), as_set(&second.left));
        assert_eq!(as_set(&third.left), as_set(&second.entered));
    }

    #[test]
    fn far_move_replaces_everything() {
        let mut loader = cube(IVec3::new(3, 3, 3), false, true);
        let size = ChunkSize::DEFAULT;

        let first = loader.refresh(Vec3::ZERO, size);
        let second = loader.refresh(Vec3::splat(1000.0), size);

        assert_eq!(second.left, first.entered);
        assert_eq!(second.entered.len(), 27);
    }

    #[test]
    fn refresh_into_reuses_buffer() {
        let mut loader = sphere(1);
        let size = ChunkSize::DEFAULT;
        let mut result = RegionResult {
            valid: false,
            entered: vec![ChunkCoord::new(999, 999, 999)],
            left: vec![ChunkCoord::new(-999, 0, 0)],
        };

        loader.refresh_into(Vec3::ZERO, size, &mut result);
        assert!(result.valid);
        assert_eq!(result.entered.len(), 7);
        assert!(result.left.is_empty());

        loader.refresh_into(Vec3::ONE, size, &mut result);
        assert!(!result.valid);
        assert!(result.is_empty());
    }

    #[test]
    fn chunk_size_may_vary_per_call() {
        let mut loader = cube(IVec3::ONE, false, true);

        let a = loader.refresh(Vec3::new(20.0, 0.0, 0.0), ChunkSize::DEFAULT);
        assert_eq!(a.entered, vec![ChunkCoord::new(16, 0, 0)]);

        // Same world-space chunk origin under a smaller size is still debounced.
        let b = loader.refresh(Vec3::new(20.0, 0.0, 0.0), ChunkSize::splat(8).unwrap());
        assert!(!b.valid);

        let c = loader.refresh(Vec3::new(25.0, 0.0, 0.0), ChunkSize::splat(8).unwrap());
        assert_eq!(c.entered, vec![ChunkCoord::new(24, 0, 0)]);
        assert_eq!(c.left, vec![ChunkCoord::new(16, 0, 0)]);
    }

    #[test]
    fn host_mirror_matches_coverage() {
        // A host that creates and removes handles from each delta.
        let mut loader = sphere(6);
        let size = ChunkSize::DEFAULT;
        let mut handles: HashMap<ChunkCoord, u32> = HashMap::new();
        let mut next_handle = 0;

        for step in 0..64 {
            let t = step as f32 * 0.2;
            let position = Vec3::new(t.cos() * 40.0, 0.0, t.sin() * 40.0) + Vec3::X * step as f32;
            let result = loader.refresh(position, size);
            if !result.valid {
                continue;
            }

            for coord in &result.left {
                assert!(handles.remove(coord).is_some(), "unloaded missing {coord}");
            }
            for coord in &result.entered {
                next_handle += 1;
                assert!(handles.insert(*coord, next_handle).is_none(), "loaded {coord} twice");
            }

            assert_eq!(handles.len(), loader.loaded_count());
            assert!(handles.keys().all(|c| loader.is_loaded(*c)));
        }
    }

    #[test]
    fn refresh_near_grid_edge_does_not_overflow() {
        let mut loader = sphere(1);
        let size = ChunkSize::DEFAULT;

        let result = loader.refresh(Vec3::new(2.1474836e9, 0.0, 0.0), size);
        assert!(result.valid);
        assert_eq!(as_set(&result.entered).len(), 7);
        assert!(result.entered.contains(&ChunkCoord::new(i32::MIN, 0, 0)));

        let result = loader.force_refresh(Vec3::new(-3.0e9, 0.0, -3.0e9), size);
        assert!(result.valid);
        assert_eq!(result.entered.len(), 7);
        assert_eq!(result.left.len(), 7);
        assert_eq!(loader.loaded_count(), 7);
    }

    #[test]
    fn owned_and_buffered_refresh_agree() {
        let size = ChunkSize::DEFAULT;
        let path = [
            Vec3::ZERO,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(20.0, 0.0, -5.0),
            Vec3::new(70.0, 33.0, -5.0),
        ];

        let mut owned = sphere(3);
        let mut buffered = sphere(3);
        let mut buffer = RegionResult::default();

        for position in path {
            let result = owned.refresh(position, size);
            buffered.refresh_into(position, size, &mut buffer);
            assert_eq!(result, buffer);
        }
        assert_eq!(owned.stats(), buffered.stats());
    }

    #[test]
    fn gather_debug_does_not_mutate() {
        let mut loader = sphere(1);
        let size = ChunkSize::DEFAULT;

        let at_origin: Vec<_> = loader.gather_debug(size).collect();
        assert_eq!(at_origin.len(), 7);
        assert!(loader.last_center().is_none());
        assert_eq!(loader.loaded_count(), 0);

        loader.refresh(Vec3::new(40.0, 0.0, 0.0), size);
        let moved: Vec<_> = loader.gather_debug(size).collect();
        assert!(moved.contains(&ChunkCoord::new(32, 0, 0)));
        assert_eq!(moved, loader.loaded());
    }

    #[test]
    fn debug_region_respects_toggle() {
        let mut loader = sphere(1);
        assert!(loader.debug_region().is_none());

        loader.set_show_debug(true);
        loader.set_debug_chunk_size(ChunkSize::splat(4).unwrap());
        let region = loader.debug_region().unwrap();
        assert_eq!(region.box_count(), 7);
        assert_eq!(region.box_size, [4.0, 4.0, 4.0]);
    }

    #[test]
    fn clear_resets_state() {
        let mut loader = sphere(1);
        let size = ChunkSize::DEFAULT;
        loader.refresh(Vec3::ZERO, size);

        loader.clear();
        assert_eq!(loader.loaded_count(), 0);
        assert!(loader.last_center().is_none());

        // Same chunk again is not debounced after clearing.
        let result = loader.refresh(Vec3::ZERO, size);
        assert!(result.valid);
        assert_eq!(result.entered.len(), 7);
    }

    #[test]
    fn stats_count_calls() {
        let mut loader = sphere(1);
        let size = ChunkSize::DEFAULT;

        loader.refresh(Vec3::ZERO, size);
        loader.refresh(Vec3::ONE, size);
        loader.force_refresh(Vec3::ONE, size);
        loader.refresh(Vec3::new(16.0, 0.0, 0.0), size);

        let stats = loader.stats();
        assert_eq!(stats.refresh_calls, 4);
        assert_eq!(stats.debounced, 1);
        assert_eq!(stats.forced, 1);
        assert_eq!(stats.recomputations, 3);
        assert_eq!(stats.covered, 7);
        assert_eq!(stats.net_loaded(), 7);
    }

    #[test]
    fn from_config() {
        let config = LoaderConfig::from_toml_str("[shape]\nkind = \"sphere\"\nradius = 0").unwrap();
        let mut loader = RegionLoader::from_config(config).unwrap();
        assert_eq!(loader.refresh(Vec3::ZERO, ChunkSize::DEFAULT).entered.len(), 1);
    }
}
