//! Chunk region loading around a moving reference point.
//!
//! Each tick the caller reports a world position. The loader maps it to a
//! center chunk and enumerates a sphere or cube of chunks around it. It then
//! reports which chunks entered and which left the covered region since the
//! last recomputation. Nothing is recomputed while the center chunk stays the same.
//!
//! # Example
//!
//! ```
//! use glam::{IVec3, Vec3};
//! use region_loader::{ChunkSize, RegionLoader, RegionShape};
//!
//! let shape = RegionShape::cube(IVec3::new(1, 0, 1), true, true).unwrap();
//! let mut loader = RegionLoader::new(shape).unwrap();
//!
//! let result = loader.refresh(Vec3::new(8.0, 8.0, 8.0), ChunkSize::DEFAULT);
//! assert!(result.valid);
//! assert_eq!(result.entered.len(), 9); // 3 x 1 x 3 layer
//! assert!(result.left.is_empty());
//! ```

pub mod convert;
pub mod debug;
pub mod error;
pub mod region;

// Re-export primary types
pub use crate::region::{
    ChunkCoord,
    ChunkSize,
    CoverageCache,
    CoverageDelta,
    Gather,
    LoaderConfig,
    LoaderStats,
    RegionLoader,
    RegionResult,
    RegionShape,
};

pub use crate::convert::{flatten, world_to_chunk, world_to_voxel};
pub use crate::debug::{generate_debug_region, DebugRegion};
pub use crate::error::{RegionError, Result};
