//! Debug geometry for region visualization.
//!
//! Generates one wireframe box per covered chunk, for a host that wants to
//! draw the configured region.

use glam::Vec3;

use crate::region::{ChunkCoord, ChunkSize};

/// Wireframe boxes outlining a set of chunks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DebugRegion {
    /// Line segment endpoints as flat xyz pairs.
    /// Length = box_count * 12 edges * 2 endpoints * 3 floats = box_count * 72.
    pub line_positions: Vec<f32>,

    /// World-space center of each box, flat xyz.
    pub centers: Vec<f32>,

    /// Extent of every box.
    pub box_size: [f32; 3],
}

impl DebugRegion {
    /// Number of boxes.
    pub fn box_count(&self) -> usize {
        self.centers.len() / 3
    }

    /// Number of line segments.
    pub fn line_count(&self) -> usize {
        self.line_positions.len() / 6
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

/// Corner indices of the 12 box edges, corner `i` having bit 0 = +x,
/// bit 1 = +y, bit 2 = +z.
const BOX_EDGES: [(usize, usize); 12] = [
    // Along X
    (0b000, 0b001),
    (0b010, 0b011),
    (0b100, 0b101),
    (0b110, 0b111),
    // Along Y
    (0b000, 0b010),
    (0b001, 0b011),
    (0b100, 0b110),
    (0b101, 0b111),
    // Along Z
    (0b000, 0b100),
    (0b001, 0b101),
    (0b010, 0b110),
    (0b011, 0b111),
];

fn box_corners(min: Vec3, size: Vec3) -> [Vec3; 8] {
    let mut corners = [min; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        if i & 0b001 != 0 {
            corner.x += size.x;
        }
        if i & 0b010 != 0 {
            corner.y += size.y;
        }
        if i & 0b100 != 0 {
            corner.z += size.z;
        }
    }
    corners
}

/// Build wireframe boxes for `coords`, each spanning one chunk of `size`.
///
/// # Example
/// ```
/// use region_loader::{generate_debug_region, ChunkCoord, ChunkSize};
///
/// let region = generate_debug_region([ChunkCoord::ZERO], ChunkSize::DEFAULT);
/// assert_eq!(region.box_count(), 1);
/// assert_eq!(region.line_count(), 12);
/// assert_eq!(region.centers, vec![8.0, 8.0, 8.0]);
/// ```
pub fn generate_debug_region<I>(coords: I, size: ChunkSize) -> DebugRegion
where
    I: IntoIterator<Item = ChunkCoord>,
{
    let extent = size.as_vec3();
    let coords = coords.into_iter();
    let hint = coords.size_hint().0;

    let mut region = DebugRegion {
        line_positions: Vec::with_capacity(hint * 72),
        centers: Vec::with_capacity(hint * 3),
        box_size: extent.to_array(),
    };

    for coord in coords {
        let min = coord.origin_world();
        region
            .centers
            .extend_from_slice(&coord.center_world(size).to_array());

        let corners = box_corners(min, extent);
        for (a, b) in BOX_EDGES {
            region.line_positions.extend_from_slice(&corners[a].to_array());
            region.line_positions.extend_from_slice(&corners[b].to_array());
        }
    }

    region
}
