//! Connected component analysis
//!
//! Breadth-first labeling of the foreground of a binary image. Components
//! are returned in the raster order of their first pixel, and each
//! component's points are themselves in raster order.

use crate::segment::ImageSegment;
use crate::RegionResult;
use rasterlab_core::{BinaryImage, Point, Raster};
use std::collections::VecDeque;
use tracing::debug;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    Four,
    /// 8-way connectivity (includes diagonals)
    Eight,
}

const FOUR: [(i64, i64); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];
const EIGHT: [(i64, i64); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Connectivity {
    /// Neighbor offsets `(dx, dy)`
    pub fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

/// Group foreground pixels into connected components
pub fn label_components(mask: &BinaryImage, connectivity: Connectivity) -> Vec<Vec<Point>> {
    let (w, h) = mask.size();
    let mut visited = match Raster::new_with_value(w, h, false) {
        Ok(r) => r,
        Err(_) => return Vec::new(),
    };
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for (x, y, set) in mask.pixels() {
        if !set || visited.get_unchecked(x, y) {
            continue;
        }
        visited.set_unchecked(x, y, true);
        queue.push_back(Point::new(x, y));
        let mut component = Vec::new();

        while let Some(p) = queue.pop_front() {
            component.push(p);
            for &(dx, dy) in connectivity.offsets() {
                let (nx, ny) = (p.x as i64 + dx, p.y as i64 + dy);
                if mask.get_signed(nx, ny) != Some(true) {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                if !visited.get_unchecked(nx, ny) {
                    visited.set_unchecked(nx, ny, true);
                    queue.push_back(Point::new(nx, ny));
                }
            }
        }

        component.sort_unstable_by_key(|p| p.raster_key());
        components.push(component);
    }

    debug!(components = components.len(), ?connectivity, "labeled components");
    components
}

/// Label `mask` and wrap each component as a segment of `raster`
///
/// # Errors
///
/// Returns `Core(ShapeMismatch)` when `mask` and `raster` differ in size.
pub fn find_segments<'a, T: Copy>(
    raster: &'a Raster<T>,
    mask: &BinaryImage,
    connectivity: Connectivity,
) -> RegionResult<Vec<ImageSegment<'a, T>>> {
    raster.ensure_same_size(mask)?;
    label_components(mask, connectivity)
        .into_iter()
        .map(|points| ImageSegment::new(raster, points))
        .collect()
}
