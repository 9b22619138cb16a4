//! World-space to chunk-space conversion functions.
//!
//! All functions are pure. Chunk sizes are validated by [`ChunkSize`], so the
//! divisions here never see a zero or negative divisor.

use glam::{IVec3, Vec3};

use crate::region::{ChunkCoord, ChunkSize};

/// Floor every component of a position to the containing lattice point.
///
/// # Example
/// ```
/// use glam::{IVec3, Vec3};
/// use region_loader::flatten;
///
/// assert_eq!(flatten(Vec3::new(1.7, -0.2, 3.0)), IVec3::new(1, -1, 3));
/// ```
pub fn flatten(position: Vec3) -> IVec3 {
    position.floor().as_ivec3()
}

/// Convert a world position to the coordinate of the chunk containing it.
///
/// The result is the chunk's minimum corner in world units
/// (`floor(p / size) * size` per axis), not a chunk index.
///
/// Computed on the floored position with Euclidean division, which is equal
/// to flooring the real quotient but avoids rounding a position just below a
/// chunk boundary up into the next chunk.
///
/// Positions beyond the `i32` range saturate when floored, and the final
/// multiply wraps, so chunks next to `i32::MIN` and `i32::MAX` alias around
/// the edge of the grid instead of panicking.
///
/// # Example
/// ```
/// use glam::Vec3;
/// use region_loader::{world_to_chunk, ChunkCoord, ChunkSize};
///
/// let coord = world_to_chunk(Vec3::new(5.0, -1.0, 20.0), ChunkSize::DEFAULT);
/// assert_eq!(coord, ChunkCoord::new(0, -16, 16));
/// ```
pub fn world_to_chunk(position: Vec3, size: ChunkSize) -> ChunkCoord {
    let p = flatten(position);
    let s = size.get();
    ChunkCoord::new(
        p.x.div_euclid(s.x).wrapping_mul(s.x),
        p.y.div_euclid(s.y).wrapping_mul(s.y),
        p.z.div_euclid(s.z).wrapping_mul(s.z),
    )
}

/// Convert a world position to its local voxel offset within its chunk.
///
/// Every component lies in `[0, size)`, including near the wrapping edge of
/// the grid.
///
/// # Example
/// ```
/// use glam::{IVec3, Vec3};
/// use region_loader::{world_to_voxel, ChunkSize};
///
/// let local = world_to_voxel(Vec3::new(5.0, -1.0, 20.0), ChunkSize::DEFAULT);
/// assert_eq!(local, IVec3::new(5, 15, 4));
/// ```
pub fn world_to_voxel(position: Vec3, size: ChunkSize) -> IVec3 {
    let p = flatten(position);
    let c = world_to_chunk(position, size);
    IVec3::new(
        p.x.wrapping_sub(c.x),
        p.y.wrapping_sub(c.y),
        p.z.wrapping_sub(c.z),
    )
}
