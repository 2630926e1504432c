//! Continuous geometry used by shape descriptors
//!
//! Pixel `(x, y)` is treated as the unit square centered on `(x, y)`.

use rasterlab_core::Point;
use std::cmp::Ordering;

/// A point with real coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: PointF) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    fn sub(self, other: PointF) -> PointF {
        PointF::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    fn dot(self, other: PointF) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    fn cross(self, other: PointF) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        PointF::new(p.x as f64, p.y as f64)
    }
}

/// Population covariance of a point set
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Covariance {
    pub xx: f64,
    pub xy: f64,
    pub yy: f64,
}

impl Covariance {
    /// Covariance of `points` about `center`
    pub fn of_points(points: &[Point], center: PointF) -> Self {
        let n = points.len().max(1) as f64;
        let (mut xx, mut xy, mut yy) = (0.0, 0.0, 0.0);
        for &p in points {
            let dx = p.x as f64 - center.x;
            let dy = p.y as f64 - center.y;
            xx += dx * dx;
            xy += dx * dy;
            yy += dy * dy;
        }
        Self {
            xx: xx / n,
            xy: xy / n,
            yy: yy / n,
        }
    }

    /// Eigenvalues `(major, minor)` with `major >= minor >= 0`
    pub fn eigenvalues(&self) -> (f64, f64) {
        let mean = (self.xx + self.yy) / 2.0;
        let spread = ((self.xx - self.yy) / 2.0).hypot(self.xy);
        (mean + spread, (mean - spread).max(0.0))
    }

    /// Angle of the major eigenvector in radians, measured from the x axis
    /// toward the y axis
    pub fn orientation(&self) -> f64 {
        0.5 * (2.0 * self.xy).atan2(self.xx - self.yy)
    }
}

/// Rectangle with arbitrary orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub center: PointF,
    /// Side length along `angle`
    pub width: f64,
    /// Side length perpendicular to `angle`
    pub height: f64,
    /// Direction of the `width` side in radians
    pub angle: f64,
}

impl OrientedRect {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Corners in order around the rectangle
    pub fn corners(&self) -> [PointF; 4] {
        let (s, c) = self.angle.sin_cos();
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(u, v)| {
            PointF::new(
                self.center.x + u * c - v * s,
                self.center.y + u * s + v * c,
            )
        })
    }
}

/// Convex hull by Andrew's monotone chain
///
/// Collinear points are dropped. The result is in counter-clockwise order
/// for a y-up frame (clockwise on screen).
pub fn convex_hull(points: &[PointF]) -> Vec<PointF> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| match a.x.total_cmp(&b.x) {
        Ordering::Equal => a.y.total_cmp(&b.y),
        other => other,
    });
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut lower = half_hull(pts.iter());
    let mut upper = half_hull(pts.iter().rev());
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn half_hull<'a>(points: impl Iterator<Item = &'a PointF>) -> Vec<PointF> {
    let mut chain: Vec<PointF> = Vec::new();
    for &p in points {
        while let &[.., a, b] = chain.as_slice() {
            if b.sub(a).cross(p.sub(a)) > 0.0 {
                break;
            }
            chain.pop();
        }
        chain.push(p);
    }
    chain
}

/// Smallest-area enclosing rectangle of a convex polygon
///
/// Each hull edge is tried as one side of the rectangle; the first
/// minimum wins. Returns `None` for fewer than two distinct points.
pub fn min_area_rect(hull: &[PointF]) -> Option<OrientedRect> {
    if hull.len() < 2 {
        return None;
    }
    let mut best: Option<OrientedRect> = None;
    for (i, &a) in hull.iter().enumerate() {
        let b = hull[(i + 1) % hull.len()];
        let edge = b.sub(a);
        let len = edge.dot(edge).sqrt();
        if len == 0.0 {
            continue;
        }
        let u = PointF::new(edge.x / len, edge.y / len);
        let v = PointF::new(-u.y, u.x);

        let (mut u0, mut u1, mut v0, mut v1) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for &p in hull {
            let (pu, pv) = (p.dot(u), p.dot(v));
            u0 = u0.min(pu);
            u1 = u1.max(pu);
            v0 = v0.min(pv);
            v1 = v1.max(pv);
        }

        let candidate = OrientedRect {
            center: PointF::new(
                u.x * (u0 + u1) / 2.0 + v.x * (v0 + v1) / 2.0,
                u.y * (u0 + u1) / 2.0 + v.y * (v0 + v1) / 2.0,
            ),
            width: u1 - u0,
            height: v1 - v0,
            angle: u.y.atan2(u.x),
        };
        if best.is_none_or(|r| candidate.area() < r.area()) {
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hull_drops_interior_and_collinear() {
        let pts: Vec<PointF> = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (1.0, 1.0)]
            .iter()
            .map(|&(x, y)| PointF::new(x, y))
            .collect();
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&PointF::new(1.0, 1.0)));
        assert!(!hull.contains(&PointF::new(1.0, 0.0)));
    }

    #[test]
    fn test_min_area_rect_of_rotated_square() {
        let diamond = [
            PointF::new(0.0, -1.0),
            PointF::new(1.0, 0.0),
            PointF::new(0.0, 1.0),
            PointF::new(-1.0, 0.0),
        ];
        let hull = convex_hull(&diamond);
        let rect = min_area_rect(&hull).unwrap();
        assert!((rect.area() - 2.0).abs() < 1e-9);
        assert!(rect.center.distance(PointF::default()) < 1e-9);
        for corner in rect.corners() {
            assert!((corner.distance(PointF::default()) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_covariance_eigen() {
        let pts: Vec<Point> = (0..5).map(|i| Point::new(i, i)).collect();
        let cov = Covariance::of_points(&pts, PointF::new(2.0, 2.0));
        let (major, minor) = cov.eigenvalues();
        assert!((major - 4.0).abs() < 1e-12);
        assert!(minor.abs() < 1e-12);
        assert!((cov.orientation() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }
}
