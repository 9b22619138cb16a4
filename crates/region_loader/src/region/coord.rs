//! Chunk coordinate and chunk size types.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Vec3};

use crate::error::{RegionError, Result};

/// Chunk coordinate in world units.
///
/// Unlike a chunk index, a `ChunkCoord` is the minimum corner of the chunk
/// it names, so it is always a multiple of the chunk size it was computed
/// with. Two positions inside the same chunk map to the identical coordinate,
/// and the value can be used directly to place chunk geometry.
///
/// `#[repr(C)]` and [`Pod`] so a slice of coordinates can be viewed as a flat
/// `[i32]` buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Origin chunk at (0, 0, 0).
    pub const ZERO: ChunkCoord = ChunkCoord { x: 0, y: 0, z: 0 };

    /// Create a new chunk coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The coordinate as a glam vector.
    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// The coordinate as an `[x, y, z]` array.
    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Offset this coordinate by a whole number of chunks per axis.
    ///
    /// Wraps at the edge of the `i32` grid.
    ///
    /// # Example
    /// ```
    /// use region_loader::{ChunkCoord, ChunkSize};
    ///
    /// let size = ChunkSize::splat(16).unwrap();
    /// let coord = ChunkCoord::new(16, 0, -16).offset_chunks([1, -1, 0], size);
    /// assert_eq!(coord, ChunkCoord::new(32, -16, -16));
    /// ```
    pub fn offset_chunks(self, chunks: [i32; 3], size: ChunkSize) -> Self {
        let s = size.get();
        Self {
            x: chunks[0].wrapping_mul(s.x).wrapping_add(self.x),
            y: chunks[1].wrapping_mul(s.y).wrapping_add(self.y),
            z: chunks[2].wrapping_mul(s.z).wrapping_add(self.z),
        }
    }

    /// World-space origin (minimum corner) of this chunk.
    pub fn origin_world(self) -> Vec3 {
        self.as_ivec3().as_vec3()
    }

    /// World-space center of this chunk.
    pub fn center_world(self, size: ChunkSize) -> Vec3 {
        self.origin_world() + size.as_vec3() * 0.5
    }
}

impl From<IVec3> for ChunkCoord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<ChunkCoord> for IVec3 {
    fn from(c: ChunkCoord) -> Self {
        c.as_ivec3()
    }
}

impl From<[i32; 3]> for ChunkCoord {
    fn from(a: [i32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.x, self.y, self.z)
    }
}

/// Size of a chunk in world units, positive on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkSize(IVec3);

impl ChunkSize {
    /// 16 world units per axis.
    pub const DEFAULT: ChunkSize = ChunkSize(IVec3::splat(16));

    /// Create a chunk size, rejecting zero or negative components.
    pub fn new(size: IVec3) -> Result<Self> {
        if size.cmple(IVec3::ZERO).any() {
            return Err(RegionError::InvalidChunkSize { size });
        }
        Ok(Self(size))
    }

    /// Same size on every axis.
    pub fn splat(size: i32) -> Result<Self> {
        Self::new(IVec3::splat(size))
    }

    /// The size as a glam vector.
    pub fn get(self) -> IVec3 {
        self.0
    }

    /// The size as a real vector.
    pub fn as_vec3(self) -> Vec3 {
        self.0.as_vec3()
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<IVec3> for ChunkSize {
    type Error = RegionError;

    fn try_from(size: IVec3) -> Result<Self> {
        Self::new(size)
    }
}

impl TryFrom<[i32; 3]> for ChunkSize {
    type Error = RegionError;

    fn try_from(size: [i32; 3]) -> Result<Self> {
        Self::new(IVec3::from_array(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_constant() {
        assert_eq!(ChunkCoord::ZERO, ChunkCoord::new(0, 0, 0));
        assert_eq!(ChunkCoord::default(), ChunkCoord::ZERO);
    }

    #[test]
    fn ivec3_conversions() {
        let coord = ChunkCoord::from(IVec3::new(16, -32, 48));
        assert_eq!(coord, ChunkCoord::new(16, -32, 48));
        assert_eq!(IVec3::from(coord), IVec3::new(16, -32, 48));
        assert_eq!(ChunkCoord::from([1, 2, 3]).to_array(), [1, 2, 3]);
    }

    #[test]
    fn center_world() {
        let size = ChunkSize::DEFAULT;
        assert_eq!(ChunkCoord::ZERO.center_world(size), Vec3::splat(8.0));

        let coord = ChunkCoord::new(-16, 0, 32);
        assert_eq!(coord.center_world(size), Vec3::new(-8.0, 8.0, 40.0));
    }

    #[test]
    fn origin_world() {
        let coord = ChunkCoord::new(-16, 0, 32);
        assert_eq!(coord.origin_world(), Vec3::new(-16.0, 0.0, 32.0));
    }

    #[test]
    fn offset_wraps_at_grid_edge() {
        let size = ChunkSize::DEFAULT;
        let edge = ChunkCoord::new(i32::MAX - 15, 0, i32::MIN);

        let next = edge.offset_chunks([1, 0, -1], size);
        assert_eq!(next, ChunkCoord::new(i32::MIN, 0, i32::MAX - 15));

        assert_eq!(next.offset_chunks([-1, 0, 1], size), edge);
    }

    #[test]
    fn flat_i32_view() {
        let coords = [ChunkCoord::new(1, 2, 3), ChunkCoord::new(4, 5, 6)];
        let flat: &[i32] = bytemuck::cast_slice(&coords);
        assert_eq!(flat, &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn chunk_size_rejects_non_positive() {
        assert!(ChunkSize::splat(0).is_err());
        assert!(ChunkSize::new(IVec3::new(16, -1, 16)).is_err());
        assert!(matches!(
            ChunkSize::new(IVec3::new(16, 16, 0)),
            Err(RegionError::InvalidChunkSize { .. })
        ));
    }

    #[test]
    fn chunk_size_accepts_mixed_axes() {
        let size = ChunkSize::try_from([8, 32, 1]).unwrap();
        assert_eq!(size.get(), IVec3::new(8, 32, 1));
        assert_eq!(ChunkSize::default(), ChunkSize::DEFAULT);
    }

    #[test]
    fn display() {
        assert_eq!(ChunkCoord::new(0, -16, 16).to_string(), "<0, -16, 16>");
    }
}
