//! Boundary signatures
//!
//! One-dimensional descriptions of a traced boundary relative to the
//! region centroid.

use crate::boundary::PolygonVertex;
use crate::shape::PointF;
use rasterlab_core::{Complex, Point};
use std::f64::consts::TAU;

/// Distance from `center` to every boundary point, in loop order
pub fn radial_distance(boundary: &[Point], center: PointF) -> Vec<f64> {
    boundary
        .iter()
        .map(|&p| PointF::from(p).distance(center))
        .collect()
}

/// Boundary points as complex numbers `(x - cx) + i (y - cy)`
pub fn complex_coordinates(boundary: &[Point], center: PointF) -> Vec<Complex<f64>> {
    boundary
        .iter()
        .map(|&p| Complex::new(p.x as f64 - center.x, p.y as f64 - center.y))
        .collect()
}

/// Largest centroid distance inside each of `buckets` equal angular
/// sectors
///
/// Sector `k` covers angles `[k, k + 1) * 2pi / buckets`, measured with
/// `atan2(y - cy, x - cx)` and wrapped into `[0, 2pi)`. Every sector scans
/// the whole boundary, so the cost is `buckets * boundary.len()`. Empty
/// sectors read 0.
pub fn farthest_point(boundary: &[Point], center: PointF, buckets: usize) -> Vec<f64> {
    let width = TAU / buckets as f64;
    let polar: Vec<(f64, f64)> = boundary
        .iter()
        .map(|&p| {
            let (dx, dy) = (p.x as f64 - center.x, p.y as f64 - center.y);
            (dy.atan2(dx).rem_euclid(TAU), dx.hypot(dy))
        })
        .collect();

    (0..buckets)
        .map(|k| {
            let (lo, hi) = (k as f64 * width, (k + 1) as f64 * width);
            polar
                .iter()
                .filter(|(angle, _)| {
                    // the last sector also takes angles rounded up to 2pi
                    *angle >= lo && (*angle < hi || k + 1 == buckets)
                })
                .map(|&(_, r)| r)
                .fold(0.0, f64::max)
        })
        .collect()
}

/// Turning angle at each polygon vertex, counter-clockwise on screen
/// positive
///
/// A simple loop traced counter-clockwise sums to `2pi`.
pub fn slope_chain_code(polygon: &[PolygonVertex]) -> Vec<f64> {
    polygon.iter().map(|v| v.turn.angle()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radial_and_complex() {
        let boundary = [Point::new(3, 1), Point::new(1, 4)];
        let c = PointF::new(1.0, 1.0);
        assert_eq!(radial_distance(&boundary, c), vec![2.0, 3.0]);
        let z = complex_coordinates(&boundary, c);
        assert_eq!(z[0], Complex::new(2.0, 0.0));
        assert_eq!(z[1], Complex::new(0.0, 3.0));
    }

    #[test]
    fn test_farthest_point_buckets() {
        // east, south (screen), west
        let boundary = [Point::new(4, 2), Point::new(2, 5), Point::new(1, 2)];
        let sig = farthest_point(&boundary, PointF::new(2.0, 2.0), 4);
        assert_eq!(sig, vec![2.0, 3.0, 1.0, 0.0]);
    }
}
