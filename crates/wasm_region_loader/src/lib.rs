//! WASM bindings for the region loader.
//!
//! Provides a JavaScript-accessible handle that reports chunks entering and
//! leaving a region around a moving point.

use wasm_bindgen::prelude::*;
use region_loader::{
    ChunkCoord, ChunkSize, LoaderConfig, RegionError, RegionLoader, RegionResult, RegionShape,
};
use glam::{IVec3, Vec3};

/// Refresh outcome returned to JavaScript.
///
/// Coordinates are flat xyz triples of chunk origins in world units.
#[wasm_bindgen]
pub struct RegionDelta {
    valid: bool,
    entered: Vec<i32>,
    left: Vec<i32>,
}

#[wasm_bindgen]
impl RegionDelta {
    /// False when the refresh was skipped because the center chunk did not change.
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Chunks to load (3 ints per chunk).
    #[wasm_bindgen(getter)]
    pub fn entered(&self) -> Vec<i32> {
        self.entered.clone()
    }

    /// Chunks to unload (3 ints per chunk).
    #[wasm_bindgen(getter)]
    pub fn left(&self) -> Vec<i32> {
        self.left.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn entered_count(&self) -> usize {
        self.entered.len() / 3
    }

    #[wasm_bindgen(getter)]
    pub fn left_count(&self) -> usize {
        self.left.len() / 3
    }

    /// Whether there is nothing to load or unload.
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.left.is_empty()
    }
}

impl From<&RegionResult> for RegionDelta {
    fn from(result: &RegionResult) -> Self {
        Self {
            valid: result.valid,
            entered: flatten_coords(&result.entered),
            left: flatten_coords(&result.left),
        }
    }
}

/// Loader statistics for debugging.
#[wasm_bindgen]
pub struct RegionStats {
    refresh_calls: u32,
    recomputations: u32,
    debounced: u32,
    covered: usize,
}

#[wasm_bindgen]
impl RegionStats {
    #[wasm_bindgen(getter)]
    pub fn refresh_calls(&self) -> u32 { self.refresh_calls }

    #[wasm_bindgen(getter)]
    pub fn recomputations(&self) -> u32 { self.recomputations }

    #[wasm_bindgen(getter)]
    pub fn debounced(&self) -> u32 { self.debounced }

    #[wasm_bindgen(getter)]
    pub fn covered(&self) -> usize { self.covered }
}

/// Region loader owned by JavaScript.
///
/// # Example (JavaScript)
/// ```javascript
/// const loader = RegionLoaderHandle.sphere(4);
/// const delta = loader.refresh(player.x, player.y, player.z, 16, 16, 16);
/// if (delta.valid) {
///     const entered = delta.entered;
///     for (let i = 0; i < entered.length; i += 3) {
///         spawnChunk(entered[i], entered[i + 1], entered[i + 2]);
///     }
/// }
/// ```
#[wasm_bindgen]
pub struct RegionLoaderHandle {
    loader: RegionLoader,
    // Reused across refreshes
    result: RegionResult,
}

#[wasm_bindgen]
impl RegionLoaderHandle {
    /// Sphere of chunks within `radius` of the center chunk.
    pub fn sphere(radius: i32) -> Result<RegionLoaderHandle, JsError> {
        let shape = RegionShape::sphere(radius).map_err(to_js_error)?;
        Self::with_shape(shape)
    }

    /// Box of chunks around (or starting at) the center chunk.
    pub fn cube(
        size_x: i32,
        size_y: i32,
        size_z: i32,
        per_axis: bool,
        centered: bool,
    ) -> Result<RegionLoaderHandle, JsError> {
        let size = IVec3::new(size_x, size_y, size_z);
        let shape = RegionShape::cube(size, per_axis, centered).map_err(to_js_error)?;
        Self::with_shape(shape)
    }

    /// Build from a TOML configuration document.
    pub fn from_toml(text: &str) -> Result<RegionLoaderHandle, JsError> {
        let config = LoaderConfig::from_toml_str(text).map_err(to_js_error)?;
        let loader = RegionLoader::from_config(config).map_err(to_js_error)?;
        Ok(Self::from_loader(loader))
    }

    /// Refresh for a reference position; skipped if the center chunk is unchanged.
    pub fn refresh(
        &mut self,
        pos_x: f32,
        pos_y: f32,
        pos_z: f32,
        chunk_x: i32,
        chunk_y: i32,
        chunk_z: i32,
    ) -> Result<RegionDelta, JsError> {
        let size = chunk_size(chunk_x, chunk_y, chunk_z).map_err(to_js_error)?;
        let position = Vec3::new(pos_x, pos_y, pos_z);
        self.loader.refresh_into(position, size, &mut self.result);
        Ok(self.delta())
    }

    /// Refresh even if the center chunk is unchanged.
    pub fn force_refresh(
        &mut self,
        pos_x: f32,
        pos_y: f32,
        pos_z: f32,
        chunk_x: i32,
        chunk_y: i32,
        chunk_z: i32,
    ) -> Result<RegionDelta, JsError> {
        let size = chunk_size(chunk_x, chunk_y, chunk_z).map_err(to_js_error)?;
        let position = Vec3::new(pos_x, pos_y, pos_z);
        self.loader.force_refresh_into(position, size, &mut self.result);
        Ok(self.delta())
    }

    /// Replace the shape with a sphere. Takes effect on the next recompute.
    pub fn set_sphere(&mut self, radius: i32) -> Result<(), JsError> {
        let shape = RegionShape::sphere(radius).map_err(to_js_error)?;
        self.loader.set_shape(shape).map_err(to_js_error)
    }

    /// Replace the shape with a cube. Takes effect on the next recompute.
    pub fn set_cube(
        &mut self,
        size_x: i32,
        size_y: i32,
        size_z: i32,
        per_axis: bool,
        centered: bool,
    ) -> Result<(), JsError> {
        let size = IVec3::new(size_x, size_y, size_z);
        let shape = RegionShape::cube(size, per_axis, centered).map_err(to_js_error)?;
        self.loader.set_shape(shape).map_err(to_js_error)
    }

    /// Chunk origins of the configured shape at the last center (flat xyz).
    /// Does not change loader state.
    pub fn gather_debug(
        &self,
        chunk_x: i32,
        chunk_y: i32,
        chunk_z: i32,
    ) -> Result<Vec<i32>, JsError> {
        let size = chunk_size(chunk_x, chunk_y, chunk_z).map_err(to_js_error)?;
        let coords: Vec<ChunkCoord> = self.loader.gather_debug(size).collect();
        Ok(flatten_coords(&coords))
    }

    /// Enable or disable debug line generation.
    pub fn set_show_debug(&mut self, show: bool) {
        self.loader.set_show_debug(show);
    }

    /// Chunk size used by `debug_lines`.
    pub fn set_debug_chunk_size(
        &mut self,
        chunk_x: i32,
        chunk_y: i32,
        chunk_z: i32,
    ) -> Result<(), JsError> {
        let size = chunk_size(chunk_x, chunk_y, chunk_z).map_err(to_js_error)?;
        self.loader.set_debug_chunk_size(size);
        Ok(())
    }

    /// Wireframe line positions (pairs of xyz endpoints), one box per chunk.
    /// Empty when debug drawing is disabled.
    pub fn debug_lines(&self) -> Vec<f32> {
        self.loader
            .debug_region()
            .map(|region| region.line_positions)
            .unwrap_or_default()
    }

    /// Currently covered chunks (flat xyz).
    pub fn loaded(&self) -> Vec<i32> {
        flatten_coords(self.loader.loaded())
    }

    #[wasm_bindgen(getter)]
    pub fn loaded_count(&self) -> usize {
        self.loader.loaded_count()
    }

    pub fn is_loaded(&self, x: i32, y: i32, z: i32) -> bool {
        self.loader.is_loaded(ChunkCoord::new(x, y, z))
    }

    pub fn stats(&self) -> RegionStats {
        let stats = self.loader.stats();
        RegionStats {
            refresh_calls: clamp_count(stats.refresh_calls),
            recomputations: clamp_count(stats.recomputations),
            debounced: clamp_count(stats.debounced),
            covered: stats.covered,
        }
    }

    /// Forget all coverage. The caller releases its own chunk objects.
    pub fn clear(&mut self) {
        self.loader.clear();
        self.result.clear();
    }
}

impl RegionLoaderHandle {
    fn with_shape(shape: RegionShape) -> Result<Self, JsError> {
        let loader = RegionLoader::new(shape).map_err(to_js_error)?;
        Ok(Self::from_loader(loader))
    }

    fn from_loader(loader: RegionLoader) -> Self {
        Self {
            loader,
            result: RegionResult::default(),
        }
    }

    fn delta(&self) -> RegionDelta {
        if self.result.valid {
            log(&format!(
                "region refresh: {} entered, {} left, {} covered",
                self.result.entered.len(),
                self.result.left.len(),
                self.loader.loaded_count()
            ));
        }
        RegionDelta::from(&self.result)
    }
}

/// Flatten chunk coordinates to xyz triples.
fn flatten_coords(coords: &[ChunkCoord]) -> Vec<i32> {
    bytemuck::cast_slice(coords).to_vec()
}

/// Counter as `u32`, pinned at `u32::MAX` once it no longer fits.
fn clamp_count(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn chunk_size(x: i32, y: i32, z: i32) -> Result<ChunkSize, RegionError> {
    ChunkSize::new(IVec3::new(x, y, z))
}

fn to_js_error(err: RegionError) -> JsError {
    JsError::new(&err.to_string())
}

// Logging support

thread_local! {
    static LOG_ENABLED: std::cell::Cell<bool> = std::cell::Cell::new(false);
}

/// Enable or disable console logging.
#[wasm_bindgen]
pub fn set_log_enabled(enabled: bool) {
    LOG_ENABLED.with(|flag| flag.set(enabled));
}

fn log(message: &str) {
    if LOG_ENABLED.with(|enabled| enabled.get()) {
        web_sys::console::log_1(&message.into());
    }
}

/// Get the version of the region loader library.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_keeps_xyz_order() {
        let coords = [ChunkCoord::new(1, 2, 3), ChunkCoord::new(-16, 0, 32)];
        assert_eq!(flatten_coords(&coords), vec![1, 2, 3, -16, 0, 32]);
        assert!(flatten_coords(&[]).is_empty());
    }

    #[test]
    fn counters_saturate() {
        assert_eq!(clamp_count(7), 7);
        assert_eq!(clamp_count(u32::MAX as u64), u32::MAX);
        assert_eq!(clamp_count(u32::MAX as u64 + 1), u32::MAX);
        assert_eq!(clamp_count(u64::MAX), u32::MAX);
    }

    #[test]
    fn handle_stats() {
        let mut handle = RegionLoaderHandle::sphere(1).unwrap();
        handle.refresh(0.0, 0.0, 0.0, 16, 16, 16).unwrap();
        handle.refresh(1.0, 0.0, 0.0, 16, 16, 16).unwrap();

        let stats = handle.stats();
        assert_eq!(stats.refresh_calls(), 2);
        assert_eq!(stats.recomputations(), 1);
        assert_eq!(stats.debounced(), 1);
        assert_eq!(stats.covered(), 7);
    }

    #[test]
    fn chunk_size_rejects_zero() {
        assert!(chunk_size(16, 16, 16).is_ok());
        assert!(matches!(
            chunk_size(16, 0, 16),
            Err(RegionError::InvalidChunkSize { .. })
        ));
    }

    #[test]
    fn handle_refresh_and_debounce() {
        let mut handle = RegionLoaderHandle::sphere(1).unwrap();

        let first = handle.refresh(1.0, 1.0, 1.0, 16, 16, 16).unwrap();
        assert!(first.valid());
        assert_eq!(first.entered_count(), 7);
        assert!(first.entered().chunks(3).any(|c| c == [0, 0, 0]));

        let second = handle.refresh(2.0, 2.0, 2.0, 16, 16, 16).unwrap();
        assert!(!second.valid());
        assert!(second.is_empty());

        let forced = handle.force_refresh(2.0, 2.0, 2.0, 16, 16, 16).unwrap();
        assert!(forced.valid());
        assert!(forced.is_empty());
        assert_eq!(handle.loaded_count(), 7);
    }

    #[test]
    fn handle_gather_and_debug_lines() {
        let mut handle = RegionLoaderHandle::cube(1, 1, 1, false, true).unwrap();
        assert_eq!(handle.gather_debug(16, 16, 16).unwrap(), vec![0, 0, 0]);

        assert!(handle.debug_lines().is_empty());
        handle.set_show_debug(true);
        assert_eq!(handle.debug_lines().len(), 72);
    }

    #[test]
    fn handle_clear() {
        let mut handle = RegionLoaderHandle::sphere(0).unwrap();
        handle.refresh(0.0, 0.0, 0.0, 16, 16, 16).unwrap();
        handle.clear();
        assert_eq!(handle.loaded_count(), 0);
        assert!(handle.refresh(0.0, 0.0, 0.0, 16, 16, 16).unwrap().valid());
    }
}
