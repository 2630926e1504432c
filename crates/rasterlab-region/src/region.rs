//! Shape descriptors of a segment
//!
//! [`ImageRegion`] wraps an [`ImageSegment`] and derives boundary, polygon
//! and shape measurements on first request. Nothing is recomputed once
//! cached; segments never change after construction.
//!
//! Conventions:
//!
//! - Pixel `(x, y)` is a unit square centered on `(x, y)`.
//! - The perimeter is the number of moves in the traced boundary loop.
//! - Statistics use population (divide by `n`) covariance of the member
//!   pixel coordinates.

use crate::boundary::{PolygonVertex, simplify, trace_boundary};
use crate::conncomp::{Connectivity, label_components};
use crate::moments;
use crate::segment::ImageSegment;
use crate::shape::{Covariance, OrientedRect, PointF, convex_hull, min_area_rect};
use crate::signature;
use crate::{RegionError, RegionResult};
use rasterlab_core::{BinaryImage, Complex, Point, Rect};
use std::collections::HashSet;
use std::f64::consts::PI;
use std::sync::OnceLock;
use tracing::trace;

/// A segment with lazily computed shape descriptors
#[derive(Debug)]
pub struct ImageRegion<'s, 'a, T> {
    segment: &'s ImageSegment<'a, T>,
    bounds: Rect,
    /// Membership over `bounds`, in local coordinates
    mask: BinaryImage,
    centroid: PointF,
    boundary: OnceLock<Vec<Point>>,
    polygon: OnceLock<Vec<PolygonVertex>>,
    covariance: OnceLock<Covariance>,
    hull: OnceLock<Vec<PointF>>,
    holes: OnceLock<usize>,
}

impl<'s, 'a, T: Copy> ImageRegion<'s, 'a, T> {
    /// Wrap a segment
    ///
    /// # Errors
    ///
    /// Returns `RegionError::DegenerateRegion` for an empty segment.
    pub fn new(segment: &'s ImageSegment<'a, T>) -> RegionResult<Self> {
        let bounds = segment
            .bounds()
            .ok_or(RegionError::DegenerateRegion("region has no pixels"))?;
        let mask = segment.mask()?;

        let n = segment.len() as f64;
        let (sx, sy) = segment
            .points()
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));

        Ok(Self {
            segment,
            bounds,
            mask,
            centroid: PointF::new(sx / n, sy / n),
            boundary: OnceLock::new(),
            polygon: OnceLock::new(),
            covariance: OnceLock::new(),
            hull: OnceLock::new(),
            holes: OnceLock::new(),
        })
    }

    pub fn segment(&self) -> &'s ImageSegment<'a, T> {
        self.segment
    }

    fn points(&self) -> &[Point] {
        self.segment.points()
    }

    fn is_member(&self, x: i64, y: i64) -> bool {
        self.mask
            .get_signed(x - self.bounds.x as i64, y - self.bounds.y as i64)
            .unwrap_or(false)
    }

    /// Closed outer boundary loop, counter-clockwise on screen
    ///
    /// Starts at the top-most, then left-most, member pixel. See
    /// [`trace_boundary`] for the tracing rules.
    pub fn boundary(&self) -> &[Point] {
        self.boundary.get_or_init(|| {
            let (ox, oy) = (self.bounds.x, self.bounds.y);
            let boundary: Vec<Point> = trace_boundary(&self.mask)
                .into_iter()
                .map(|p| Point::new(p.x + ox, p.y + oy))
                .collect();
            trace!(len = boundary.len(), area = self.area(), "traced region boundary");
            boundary
        })
    }

    /// Boundary reduced to its corners
    pub fn polygon(&self) -> &[PolygonVertex] {
        self.polygon.get_or_init(|| simplify(self.boundary()))
    }

    /// Mean member coordinate
    pub fn centroid(&self) -> PointF {
        self.centroid
    }

    /// Number of moves around the boundary loop
    pub fn perimeter(&self) -> usize {
        match self.boundary().len() {
            1 => 0,
            n => n,
        }
    }

    /// Pixel count
    pub fn area(&self) -> usize {
        self.segment.len()
    }

    /// Shoelace area of the polygon through boundary pixel centers
    pub fn polygon_area(&self) -> f64 {
        let poly = self.polygon();
        let n = poly.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let a = poly[i].point;
                let b = poly[(i + 1) % n].point;
                a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64
            })
            .sum();
        twice.abs() / 2.0
    }

    /// Pixel count recovered from the polygon with Pick's theorem
    ///
    /// `polygon_area + perimeter / 2 + 1`. Holes are counted as filled, so
    /// this matches [`area`](Self::area) only for hole-free regions.
    pub fn area_from_polygon(&self) -> f64 {
        self.polygon_area() + self.perimeter() as f64 / 2.0 + 1.0
    }

    /// `perimeter^2 / area`
    pub fn compactness(&self) -> f64 {
        let p = self.perimeter() as f64;
        p * p / self.area() as f64
    }

    /// Root-mean-square deviation of the boundary's centroid distance from
    /// the radius of a disk with the same area, relative to that radius
    ///
    /// 0 for a perfect disk; grows as the outline departs from a circle.
    pub fn circularity(&self) -> f64 {
        let r_eq = (self.area() as f64 / PI).sqrt();
        let distances = self.radial_distance_signature();
        let mse = distances.iter().map(|d| (d - r_eq).powi(2)).sum::<f64>()
            / distances.len() as f64;
        mse.sqrt() / r_eq
    }

    /// Coordinate covariance of the member pixels
    pub fn covariance(&self) -> Covariance {
        *self
            .covariance
            .get_or_init(|| Covariance::of_points(self.points(), self.centroid))
    }

    /// Major to minor principal axis length ratio
    ///
    /// Infinite for a straight line of pixels; 1 for a single pixel.
    pub fn eccentricity(&self) -> f64 {
        let (major, minor) = self.covariance().eigenvalues();
        if minor > 0.0 {
            (major / minor).sqrt()
        } else if major > 0.0 {
            f64::INFINITY
        } else {
            1.0
        }
    }

    /// Fraction of pixels that touch a non-member 4-neighbor without lying
    /// on the outer boundary
    ///
    /// Nonzero when the region has holes.
    pub fn porosity(&self) -> f64 {
        let outer: HashSet<Point> = self.boundary().iter().copied().collect();
        let inner_edge = self
            .points()
            .iter()
            .filter(|p| !outer.contains(p))
            .filter(|p| {
                let (x, y) = (p.x as i64, p.y as i64);
                [(1, 0), (-1, 0), (0, 1), (0, -1)]
                    .iter()
                    .any(|&(dx, dy)| !self.is_member(x + dx, y + dy))
            })
            .count();
        inner_edge as f64 / self.area() as f64
    }

    /// Number of enclosed non-member components
    ///
    /// Non-member pixels inside the bounding box are grouped with
    /// 8-connectivity; groups that do not reach the box edge are holes.
    pub fn hole_count(&self) -> usize {
        *self.holes.get_or_init(|| {
            let (w, h) = self.mask.size();
            let background = self.mask.invert();
            label_components(&background, Connectivity::Eight)
                .iter()
                .filter(|comp| {
                    !comp
                        .iter()
                        .any(|p| p.x == 0 || p.y == 0 || p.x + 1 == w || p.y + 1 == h)
                })
                .count()
        })
    }

    /// Axis-aligned bounding rectangle
    pub fn bounding_box(&self) -> Rect {
        self.bounds
    }

    /// Convex hull of the member pixel squares
    pub fn convex_hull(&self) -> &[PointF] {
        self.hull.get_or_init(|| {
            let corners: Vec<PointF> = self
                .points()
                .chunk_by(|a, b| a.y == b.y)
                .flat_map(|row| {
                    let (first, last) = (row[0], row[row.len() - 1]);
                    let y = first.y as f64;
                    let (x0, x1) = (first.x as f64 - 0.5, last.x as f64 + 0.5);
                    [
                        PointF::new(x0, y - 0.5),
                        PointF::new(x0, y + 0.5),
                        PointF::new(x1, y - 0.5),
                        PointF::new(x1, y + 0.5),
                    ]
                })
                .collect();
            convex_hull(&corners)
        })
    }

    /// Smallest-area rectangle containing every member pixel square
    pub fn min_area_rect(&self) -> OrientedRect {
        min_area_rect(self.convex_hull()).unwrap_or(OrientedRect {
            center: self.centroid,
            width: 1.0,
            height: 1.0,
            angle: 0.0,
        })
    }

    /// Major axis endpoints, `centroid ± 2 sqrt(lambda_major)` along the
    /// major eigenvector
    pub fn major_axis(&self) -> (PointF, PointF) {
        let cov = self.covariance();
        let (major, _) = cov.eigenvalues();
        self.axis(cov.orientation(), major)
    }

    /// Minor axis endpoints, perpendicular to the major axis
    pub fn minor_axis(&self) -> (PointF, PointF) {
        let cov = self.covariance();
        let (_, minor) = cov.eigenvalues();
        self.axis(cov.orientation() + PI / 2.0, minor)
    }

    fn axis(&self, angle: f64, lambda: f64) -> (PointF, PointF) {
        let half = 2.0 * lambda.sqrt();
        let (s, c) = angle.sin_cos();
        let PointF { x, y } = self.centroid;
        (
            PointF::new(x - half * c, y - half * s),
            PointF::new(x + half * c, y + half * s),
        )
    }

    pub fn raw_moment(&self, p: u32, q: u32) -> f64 {
        moments::raw_moment(self.points(), p, q)
    }

    pub fn central_moment(&self, p: u32, q: u32) -> f64 {
        moments::central_moment(self.points(), self.centroid, p, q)
    }

    pub fn normalized_moment(&self, p: u32, q: u32) -> f64 {
        moments::normalized_moment(self.points(), self.centroid, p, q)
    }

    pub fn hu_moments(&self) -> [f64; 7] {
        moments::hu_moments(self.points(), self.centroid)
    }

    /// Largest boundary distance from the centroid per angular sector
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvalidParameters` when `buckets` is 0.
    pub fn farthest_point_signature(&self, buckets: usize) -> RegionResult<Vec<f64>> {
        if buckets == 0 {
            return Err(RegionError::InvalidParameters(
                "farthest-point signature needs at least one bucket".into(),
            ));
        }
        Ok(signature::farthest_point(self.boundary(), self.centroid, buckets))
    }

    /// Centroid distance of each boundary point
    pub fn radial_distance_signature(&self) -> Vec<f64> {
        signature::radial_distance(self.boundary(), self.centroid)
    }

    /// Centroid-relative boundary points as complex numbers
    pub fn complex_coordinate_signature(&self) -> Vec<Complex<f64>> {
        signature::complex_coordinates(self.boundary(), self.centroid)
    }

    /// Turning angle at each polygon vertex
    pub fn slope_chain_code(&self) -> Vec<f64> {
        signature::slope_chain_code(self.polygon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Turn;
    use rasterlab_core::Raster;

    fn rect_segment(img: &Raster<u8>, r: Rect) -> ImageSegment<'_, u8> {
        let pts = (r.y..r.bottom()).flat_map(|y| (r.x..r.right()).map(move |x| Point::new(x, y)));
        ImageSegment::new(img, pts).unwrap()
    }

    #[test]
    fn test_empty_segment_is_degenerate() {
        let img: Raster<u8> = Raster::new(4, 4).unwrap();
        let seg = ImageSegment::new(&img, std::iter::empty()).unwrap();
        assert!(matches!(
            ImageRegion::new(&seg),
            Err(RegionError::DegenerateRegion(_))
        ));
    }

    #[test]
    fn test_rectangle_descriptors() {
        let img: Raster<u8> = Raster::new(12, 8).unwrap();
        let seg = rect_segment(&img, Rect::new(2, 2, 8, 2));
        let region = ImageRegion::new(&seg).unwrap();

        assert_eq!(region.area(), 16);
        assert_eq!(region.perimeter(), 2 * (8 + 2) - 4);
        assert_eq!(region.boundary()[0], Point::new(2, 2));
        assert_eq!(region.centroid(), PointF::new(5.5, 2.5));
        assert!((region.polygon_area() - 7.0).abs() < 1e-12);
        assert!((region.area_from_polygon() - 16.0).abs() < 1e-12);
        assert!((region.compactness() - 16.0 * 16.0 / 16.0).abs() < 1e-12);
        assert_eq!(region.hole_count(), 0);
        assert_eq!(region.porosity(), 0.0);
        assert_eq!(region.bounding_box(), Rect::new(2, 2, 8, 2));

        // variances (w^2 - 1) / 12 and (h^2 - 1) / 12
        assert!((region.eccentricity() - 21f64.sqrt()).abs() < 1e-9);
        let (a, b) = region.major_axis();
        assert!((a.distance(b) - 4.0 * 5.25f64.sqrt()).abs() < 1e-9);
        assert!((a.y - 2.5).abs() < 1e-9 && (b.y - 2.5).abs() < 1e-9);
        let (a, b) = region.minor_axis();
        assert!((a.distance(b) - 2.0).abs() < 1e-9);

        let rect = region.min_area_rect();
        assert!((rect.area() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_and_slope_chain() {
        let img: Raster<u8> = Raster::new(6, 6).unwrap();
        let seg = rect_segment(&img, Rect::new(1, 1, 3, 4));
        let region = ImageRegion::new(&seg).unwrap();
        assert_eq!(region.polygon().len(), 4);
        assert!(region.polygon().iter().all(|v| v.turn == Turn::Left));
        let total: f64 = region.slope_chain_code().iter().sum();
        assert!((total - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_single_pixel() {
        let img: Raster<u8> = Raster::new(3, 3).unwrap();
        let seg = ImageSegment::new(&img, [Point::new(1, 1)]).unwrap();
        let region = ImageRegion::new(&seg).unwrap();
        assert_eq!(region.perimeter(), 0);
        assert_eq!(region.area_from_polygon(), 1.0);
        assert_eq!(region.eccentricity(), 1.0);
        assert!(region.polygon().is_empty());
        assert!((region.min_area_rect().area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_farthest_point_rejects_zero_buckets() {
        let img: Raster<u8> = Raster::new(3, 3).unwrap();
        let seg = rect_segment(&img, Rect::new(0, 0, 2, 2));
        let region = ImageRegion::new(&seg).unwrap();
        assert!(region.farthest_point_signature(0).is_err());
        assert_eq!(region.farthest_point_signature(8).unwrap().len(), 8);
    }
}
