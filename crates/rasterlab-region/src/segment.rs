//! Pixel sets referencing a parent raster
//!
//! An [`ImageSegment`] is an immutable, sorted set of unique coordinates that
//! all lie inside the raster it borrows. Segments are usually produced by
//! [`find_segments`](crate::find_segments), but any caller may build one
//! from its own coordinate list.

use crate::{RegionError, RegionResult};
use rasterlab_core::{BinaryImage, Error, Point, Raster, Rect};

/// A set of pixel coordinates in a raster
#[derive(Debug, Clone)]
pub struct ImageSegment<'a, T> {
    raster: &'a Raster<T>,
    points: Vec<Point>,
    bounds: Option<Rect>,
}

impl<'a, T: Copy> ImageSegment<'a, T> {
    /// Create a segment from arbitrary coordinates
    ///
    /// Points are stored in raster order (row, then column).
    ///
    /// # Errors
    ///
    /// Returns `Core(OutOfRange)` for a point outside the raster and
    /// `InvalidParameters` for a repeated point.
    pub fn new<I>(raster: &'a Raster<T>, points: I) -> RegionResult<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points: Vec<Point> = points.into_iter().collect();
        for p in &points {
            if p.x >= raster.width() || p.y >= raster.height() {
                return Err(Error::OutOfRange {
                    x: p.x as i64,
                    y: p.y as i64,
                    width: raster.width(),
                    height: raster.height(),
                }
                .into());
            }
        }

        points.sort_unstable_by_key(|p| p.raster_key());
        if let Some(pair) = points.windows(2).find(|w| w[0] == w[1]) {
            return Err(RegionError::InvalidParameters(format!(
                "duplicate point ({}, {}) in segment",
                pair[0].x, pair[0].y
            )));
        }

        let bounds = Rect::bounding(points.iter().copied());
        Ok(Self {
            raster,
            points,
            bounds,
        })
    }

    /// Parent raster
    pub fn raster(&self) -> &'a Raster<T> {
        self.raster
    }

    /// Coordinates in raster order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Bounding rectangle, `None` for an empty segment
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Membership test (binary search)
    pub fn contains(&self, p: Point) -> bool {
        self.points
            .binary_search_by_key(&p.raster_key(), |q| q.raster_key())
            .is_ok()
    }

    /// Membership mask covering [`bounds`](Self::bounds), in local coordinates
    pub fn mask(&self) -> RegionResult<BinaryImage> {
        let bounds = self.require_bounds()?;
        let mut mask = Raster::new_with_value(bounds.width, bounds.height, false)?;
        for p in &self.points {
            mask.set_unchecked(p.x - bounds.x, p.y - bounds.y, true);
        }
        Ok(mask)
    }

    fn require_bounds(&self) -> RegionResult<Rect> {
        self.bounds
            .ok_or(RegionError::DegenerateRegion("segment has no pixels"))
    }

    /// Raster values at the segment's points, in raster order
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.points
            .iter()
            .map(|p| self.raster.get_unchecked(p.x, p.y))
    }

    /// Standalone copy of the bounding rectangle
    ///
    /// Members keep their values; every other pixel is `background`.
    pub fn crop(&self, background: T) -> RegionResult<Raster<T>> {
        let bounds = self.require_bounds()?;
        let mut out = Raster::new_with_value(bounds.width, bounds.height, background)?;
        for p in &self.points {
            out.set_unchecked(
                p.x - bounds.x,
                p.y - bounds.y,
                self.raster.get_unchecked(p.x, p.y),
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterlab_core::GrayImage;

    fn gradient() -> GrayImage {
        Raster::from_fn(6, 4, |x, y| (x + 10 * y) as f32).unwrap()
    }

    #[test]
    fn test_points_sorted_in_raster_order() {
        let img = gradient();
        let seg = ImageSegment::new(
            &img,
            [Point::new(3, 2), Point::new(5, 0), Point::new(1, 2)],
        )
        .unwrap();
        assert_eq!(
            seg.points(),
            &[Point::new(5, 0), Point::new(1, 2), Point::new(3, 2)]
        );
        assert_eq!(seg.values().collect::<Vec<_>>(), vec![5.0, 21.0, 23.0]);
        assert_eq!(seg.bounds(), Some(Rect::new(1, 0, 5, 3)));
        assert!(seg.contains(Point::new(1, 2)));
        assert!(!seg.contains(Point::new(2, 2)));
    }

    #[test]
    fn test_rejects_out_of_range_and_duplicates() {
        let img = gradient();
        assert!(matches!(
            ImageSegment::new(&img, [Point::new(6, 0)]),
            Err(RegionError::Core(Error::OutOfRange { .. }))
        ));
        assert!(matches!(
            ImageSegment::new(&img, [Point::new(1, 1), Point::new(1, 1)]),
            Err(RegionError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_crop_and_mask() {
        let img = gradient();
        let seg = ImageSegment::new(&img, [Point::new(2, 1), Point::new(3, 2)]).unwrap();
        let crop = seg.crop(-1.0).unwrap();
        assert_eq!(crop.size(), (2, 2));
        assert_eq!(crop.data(), &[12.0, -1.0, -1.0, 23.0]);
        let mask = seg.mask().unwrap();
        assert_eq!(mask.data(), &[true, false, false, true]);
    }

    #[test]
    fn test_empty_segment() {
        let img = gradient();
        let seg = ImageSegment::new(&img, std::iter::empty()).unwrap();
        assert!(seg.is_empty());
        assert_eq!(seg.bounds(), None);
        assert!(matches!(seg.crop(0.0), Err(RegionError::DegenerateRegion(_))));
    }
}
