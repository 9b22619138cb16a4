//! Enumeration of the chunks covered by a region shape.

use std::iter::FusedIterator;

use glam::IVec3;

use super::coord::{ChunkCoord, ChunkSize};
use super::shape::RegionShape;

impl RegionShape {
    /// Enumerate every chunk this shape covers around `center`.
    ///
    /// Walks the shape's bounding lattice by linear index, x fastest, then y,
    /// then z. Each lattice point is shifted by
    /// [`half_extent`](RegionShape::half_extent), filtered by the sphere test
    /// if any, and scaled by `size` onto `center`.
    ///
    /// The returned iterator is cheap to clone; calling `gather` again with
    /// the same inputs yields the same sequence. A shape that fails
    /// [`validate`](RegionShape::validate) yields nothing.
    ///
    /// # Example
    /// ```
    /// use region_loader::{ChunkCoord, ChunkSize, RegionShape};
    ///
    /// let shape = RegionShape::sphere(1).unwrap();
    /// let coords: Vec<_> = shape
    ///     .gather(ChunkCoord::ZERO, ChunkSize::DEFAULT)
    ///     .collect();
    ///
    /// // Center plus its six face neighbours.
    /// assert_eq!(coords.len(), 7);
    /// assert!(coords.contains(&ChunkCoord::new(0, -16, 0)));
    /// ```
    pub fn gather(&self, center: ChunkCoord, size: ChunkSize) -> Gather {
        if self.validate().is_err() {
            return Gather {
                extent: IVec3::ZERO,
                half: IVec3::ZERO,
                max_dist_sq: None,
                center,
                size,
                index: 0,
                len: 0,
            };
        }

        let extent = self.extent();
        let len = self.volume();
        let max_dist_sq = match *self {
            RegionShape::Sphere { radius } => Some(radius as i64),
            RegionShape::Cube { .. } => None,
        };

        Gather {
            extent,
            half: self.half_extent(),
            max_dist_sq,
            center,
            size,
            index: 0,
            len,
        }
    }
}

/// Iterator over the chunks covered by a [`RegionShape`].
#[derive(Clone, Debug)]
pub struct Gather {
    extent: IVec3,
    half: IVec3,
    /// Inclusive bound on the squared offset length, spheres only.
    max_dist_sq: Option<i64>,
    center: ChunkCoord,
    size: ChunkSize,
    index: usize,
    len: usize,
}

impl Gather {
    /// Lattice offset of linear index `i`, before halving.
    #[inline]
    fn lattice_point(&self, i: usize) -> IVec3 {
        let ex = self.extent.x as usize;
        let ey = self.extent.y as usize;
        IVec3::new(
            (i % ex) as i32,
            (i / ex % ey) as i32,
            (i / (ex * ey)) as i32,
        )
    }
}

impl Iterator for Gather {
    type Item = ChunkCoord;

    fn next(&mut self) -> Option<ChunkCoord> {
        while self.index < self.len {
            let offset = self.lattice_point(self.index) - self.half;
            self.index += 1;

            if let Some(max) = self.max_dist_sq {
                let (x, y, z) = (offset.x as i64, offset.y as i64, offset.z as i64);
                if x * x + y * y + z * z > max {
                    continue;
                }
            }

            return Some(self.center.offset_chunks(offset.to_array(), self.size));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        match self.max_dist_sq {
            Some(_) => (0, Some(remaining)),
            None => (remaining, Some(remaining)),
        }
    }
}

impl FusedIterator for Gather {}
