//! Region shape configuration.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::error::{RegionError, Result};

/// The rule deciding which chunks around a center are covered.
///
/// Deserializes from a table tagged with `kind`:
///
/// ```toml
/// kind = "cube"
/// size = [2, 1, 2]
/// per_axis = true
/// centered = true
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionShape {
    /// Chunks whose offset from the center satisfies `x² + y² + z² <= radius`.
    ///
    /// The offset's squared length is compared against the radius itself,
    /// not its square, so the covered volume grows much more slowly than a
    /// Euclidean ball of the same radius.
    Sphere { radius: i32 },

    /// A rectangular block of chunks.
    Cube {
        /// Number of chunks per axis, or per side when `per_axis` is set.
        size: IVec3,
        /// Mirror `size` on both sides of the center (`size * 2 + 1` per axis).
        #[serde(default)]
        per_axis: bool,
        /// Shift the block by half its extent so it surrounds the center.
        /// Otherwise the center is the block's minimum corner.
        #[serde(default = "default_centered")]
        centered: bool,
    },
}

fn default_centered() -> bool {
    true
}

impl Default for RegionShape {
    fn default() -> Self {
        RegionShape::Sphere { radius: 1 }
    }
}

impl RegionShape {
    /// Validated sphere shape.
    pub fn sphere(radius: i32) -> Result<Self> {
        let shape = RegionShape::Sphere { radius };
        shape.validate()?;
        Ok(shape)
    }

    /// Validated cube shape.
    ///
    /// # Example
    /// ```
    /// use glam::IVec3;
    /// use region_loader::RegionShape;
    ///
    /// let shape = RegionShape::cube(IVec3::new(2, 1, 2), true, true).unwrap();
    /// assert_eq!(shape.extent(), IVec3::new(5, 3, 5));
    ///
    /// assert!(RegionShape::cube(IVec3::new(1, -1, 1), false, true).is_err());
    /// ```
    pub fn cube(size: IVec3, per_axis: bool, centered: bool) -> Result<Self> {
        let shape = RegionShape::Cube {
            size,
            per_axis,
            centered,
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Check parameters are non-negative and the bounding lattice can be indexed.
    pub fn validate(&self) -> Result<()> {
        match *self {
            RegionShape::Sphere { radius } if radius < 0 => {
                return Err(RegionError::NegativeRadius(radius));
            }
            RegionShape::Cube { size, .. } if size.cmplt(IVec3::ZERO).any() => {
                return Err(RegionError::NegativeCubeSize { size });
            }
            _ => {}
        }

        self.checked_volume()
            .map(|_| ())
            .ok_or(RegionError::RegionTooLarge { shape: *self })
    }

    /// Per-axis size of the lattice enumerated for this shape.
    ///
    /// # Panics
    ///
    /// If the extent overflows `i32`. Shapes that pass
    /// [`validate`](Self::validate) never do.
    pub fn extent(&self) -> IVec3 {
        self.checked_extent()
            .unwrap_or_else(|| panic!("extent of {self:?} overflows"))
    }

    /// Offset subtracted from each lattice point before scaling.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`extent`](Self::extent).
    pub fn half_extent(&self) -> IVec3 {
        match *self {
            RegionShape::Sphere { .. } => self.extent() / 2,
            RegionShape::Cube { centered: true, .. } => self.extent() / 2,
            RegionShape::Cube { centered: false, .. } => IVec3::ZERO,
        }
    }

    /// Number of lattice points visited by one enumeration.
    ///
    /// This is the cost of a refresh, independent of how many points a
    /// sphere keeps. Zero for a shape that fails
    /// [`validate`](Self::validate).
    pub fn volume(&self) -> usize {
        match self.validate() {
            Ok(()) => self.checked_volume().unwrap_or(0),
            Err(_) => 0,
        }
    }

    fn checked_extent(&self) -> Option<IVec3> {
        let mirror = |v: i32| v.checked_mul(2)?.checked_add(1);
        match *self {
            RegionShape::Sphere { radius } => {
                let e = mirror(radius.checked_add(1)?)?;
                Some(IVec3::splat(e))
            }
            RegionShape::Cube { size, per_axis: true, .. } => {
                Some(IVec3::new(mirror(size.x)?, mirror(size.y)?, mirror(size.z)?))
            }
            RegionShape::Cube { size, per_axis: false, .. } => Some(size),
        }
    }

    fn checked_volume(&self) -> Option<usize> {
        let e = self.checked_extent()?;
        if e.cmplt(IVec3::ZERO).any() {
            return None;
        }
        (e.x as usize)
            .checked_mul(e.y as usize)?
            .checked_mul(e.z as usize)
    }
}
