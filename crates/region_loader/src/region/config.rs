//! Loader configuration.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use super::coord::ChunkSize;
use super::shape::RegionShape;
use crate::error::Result;

/// Configuration for a [`RegionLoader`](super::RegionLoader).
///
/// Missing fields take their defaults, so an empty document is a valid
/// config (a radius-1 sphere with debug drawing off).
///
/// ```toml
/// show_debug = true
/// debug_chunk_size = [16, 16, 16]
///
/// [shape]
/// kind = "cube"
/// size = [2, 1, 2]
/// per_axis = true
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Region shape evaluated on each refresh.
    pub shape: RegionShape,

    /// Whether [`debug_region`](super::RegionLoader::debug_region) produces
    /// geometry.
    pub show_debug: bool,

    /// Chunk size used only for debug geometry, independent of the size
    /// passed to refresh calls.
    pub debug_chunk_size: IVec3,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            shape: RegionShape::default(),
            show_debug: false,
            debug_chunk_size: ChunkSize::DEFAULT.get(),
        }
    }
}

impl LoaderConfig {
    /// Config with the given shape and default debug settings.
    pub fn with_shape(shape: RegionShape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LoaderConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the shape and debug chunk size.
    pub fn validate(&self) -> Result<()> {
        self.shape.validate()?;
        ChunkSize::new(self.debug_chunk_size)?;
        Ok(())
    }

    /// The debug chunk size, validated.
    pub fn debug_chunk_size(&self) -> Result<ChunkSize> {
        ChunkSize::new(self.debug_chunk_size)
    }
}
