//! Error type for region configuration.

use glam::IVec3;

use crate::region::RegionShape;

/// Errors raised when a shape, chunk size or configuration is malformed.
///
/// Every variant is surfaced at construction or update time. Refreshing a
/// loader never fails once its inputs have been validated.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// A chunk size component was zero or negative.
    #[error("chunk size must be positive on every axis (got {size})")]
    InvalidChunkSize { size: IVec3 },

    /// Sphere radius below zero.
    #[error("sphere radius must be >= 0 (got {0})")]
    NegativeRadius(i32),

    /// Cube size component below zero.
    #[error("cube size must be >= 0 on every axis (got {size})")]
    NegativeCubeSize { size: IVec3 },

    /// The bounding lattice of a shape cannot be indexed.
    #[error("region {shape:?} is too large to enumerate")]
    RegionTooLarge { shape: RegionShape },

    /// Configuration text failed to parse.
    #[error("invalid loader config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RegionError>;
