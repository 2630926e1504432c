//! Image moments of a pixel set
//!
//! Every member pixel has unit mass at its integer coordinate.
//!
//! - raw: `m_pq = sum x^p y^q`
//! - central: `mu_pq = sum (x - cx)^p (y - cy)^q`
//! - normalized: `eta_pq = mu_pq / mu_00^(1 + (p + q) / 2)`
//! - Hu: seven combinations of `eta` invariant to translation, scale and
//!   rotation

use crate::shape::PointF;
use rasterlab_core::Point;

/// Raw moment `m_pq`
pub fn raw_moment(points: &[Point], p: u32, q: u32) -> f64 {
    points
        .iter()
        .map(|pt| pow(pt.x as f64, p) * pow(pt.y as f64, q))
        .sum()
}

/// Central moment `mu_pq` about `center`
pub fn central_moment(points: &[Point], center: PointF, p: u32, q: u32) -> f64 {
    points
        .iter()
        .map(|pt| pow(pt.x as f64 - center.x, p) * pow(pt.y as f64 - center.y, q))
        .sum()
}

/// Scale-normalized central moment `eta_pq`
///
/// Zero for an empty point set.
pub fn normalized_moment(points: &[Point], center: PointF, p: u32, q: u32) -> f64 {
    let mu00 = points.len() as f64;
    if mu00 == 0.0 {
        return 0.0;
    }
    let gamma = 1.0 + (p + q) as f64 / 2.0;
    central_moment(points, center, p, q) / mu00.powf(gamma)
}

/// Hu's seven moment invariants
pub fn hu_moments(points: &[Point], center: PointF) -> [f64; 7] {
    let eta = |p, q| normalized_moment(points, center, p, q);
    let (n20, n02, n11) = (eta(2, 0), eta(0, 2), eta(1, 1));
    let (n30, n03, n21, n12) = (eta(3, 0), eta(0, 3), eta(2, 1), eta(1, 2));

    let a = n30 + n12;
    let b = n21 + n03;
    let c = n30 - 3.0 * n12;
    let d = 3.0 * n21 - n03;

    [
        n20 + n02,
        (n20 - n02).powi(2) + 4.0 * n11 * n11,
        c * c + d * d,
        a * a + b * b,
        c * a * (a * a - 3.0 * b * b) + d * b * (3.0 * a * a - b * b),
        (n20 - n02) * (a * a - b * b) + 4.0 * n11 * a * b,
        d * a * (a * a - 3.0 * b * b) - c * b * (3.0 * a * a - b * b),
    ]
}

#[inline]
fn pow(base: f64, exp: u32) -> f64 {
    base.powi(exp as i32)
}
