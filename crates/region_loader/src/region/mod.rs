//! Region coverage around a moving reference point.
//!
//! This module provides:
//! - [`ChunkCoord`]: Chunk origin in world units
//! - [`ChunkSize`]: Validated per-axis chunk dimensions
//! - [`RegionShape`]: Sphere or cube of chunks around a center
//! - [`Gather`]: Lazy enumeration of a shape's chunk origins
//! - [`CoverageCache`]: Last coverage set plus entered/left diffing
//! - [`RegionLoader`]: Debounced orchestrator tying the above together
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        RegionLoader                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  LoaderConfig                 - Shape and debug settings        │
//! │  Option<ChunkCoord>           - Last center (debounce key)      │
//! │  CoverageCache                - Chunks covered last time        │
//! │  LoaderStats                  - Activity counters               │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!   position ──▶ world_to_chunk ──▶ RegionShape::gather ──▶ diff
//!                                                            │
//!                                                            ▼
//!                                               RegionResult { entered, left }
//! ```
//!
//! # Usage
//!
//! ```
//! use glam::Vec3;
//! use region_loader::region::{ChunkSize, RegionLoader, RegionShape};
//!
//! let mut loader = RegionLoader::new(RegionShape::sphere(2).unwrap()).unwrap();
//!
//! let result = loader.refresh(Vec3::new(4.0, 0.0, 4.0), ChunkSize::DEFAULT);
//! for coord in &result.entered {
//!     // spawn chunk at coord
//!     let _ = coord;
//! }
//! for coord in &result.left {
//!     // despawn chunk at coord
//!     let _ = coord;
//! }
//! assert_eq!(loader.loaded_count(), 19);
//! ```

pub mod cache;
pub mod config;
pub mod coord;
pub mod gather;
pub mod loader;
pub mod result;
pub mod shape;
pub mod stats;

pub use cache::{CoverageCache, CoverageDelta};
pub use config::LoaderConfig;
pub use coord::{ChunkCoord, ChunkSize};
pub use gather::Gather;
pub use loader::RegionLoader;
pub use result::RegionResult;
pub use shape::RegionShape;
pub use stats::LoaderStats;
