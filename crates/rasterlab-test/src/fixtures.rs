//! Deterministic synthetic rasters for regression tests
//!
//! Every fixture is a pure function of its arguments so tests are
//! reproducible without any image files.

use crate::error::TestResult;
use rasterlab_core::{BinaryImage, GrayImage, Raster, Rect};

/// Vertical step: columns `< width / 2` are 0.0, the rest 1.0
pub fn step_edge(width: u32, height: u32) -> TestResult<GrayImage> {
    let split = width / 2;
    Ok(Raster::from_fn(width, height, |x, _| {
        if x < split { 0.0 } else { 1.0 }
    })?)
}

/// Binary raster with one filled rectangle
pub fn filled_rect(width: u32, height: u32, rect: Rect) -> TestResult<BinaryImage> {
    Ok(Raster::from_fn(width, height, |x, y| {
        rect.contains((x, y).into())
    })?)
}

/// Binary annulus centered in a square raster
///
/// Pixels whose distance from the center lies in `[inner, outer]` are set.
pub fn ring(size: u32, outer: f32, inner: f32) -> TestResult<BinaryImage> {
    let c = (size as f32 - 1.0) / 2.0;
    Ok(Raster::from_fn(size, size, |x, y| {
        let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2)).sqrt();
        d <= outer && d >= inner
    })?)
}

/// Filled disk centered in a square raster
pub fn disk(size: u32, radius: f32) -> TestResult<BinaryImage> {
    ring(size, radius, -1.0)
}

/// Two-cluster grayscale image
///
/// The left half takes values spread around `low`, the right half around
/// `high`, each spread by at most `spread` following a fixed pattern.
pub fn bimodal(width: u32, height: u32, low: f32, high: f32, spread: f32) -> TestResult<GrayImage> {
    let split = width / 2;
    Ok(Raster::from_fn(width, height, |x, y| {
        let wobble = (((x * 7 + y * 13) % 11) as f32 / 10.0 - 0.5) * 2.0 * spread;
        let base = if x < split { low } else { high };
        (base + wobble).clamp(0.0, 1.0)
    })?)
}

/// Horizontal ramp from 0.0 at the left column to 1.0 at the right column
pub fn ramp(width: u32, height: u32) -> TestResult<GrayImage> {
    let denom = (width.max(2) - 1) as f32;
    Ok(Raster::from_fn(width, height, |x, _| x as f32 / denom)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_edge() {
        let img = step_edge(8, 3).unwrap();
        assert_eq!(img.get(3, 0).unwrap(), 0.0);
        assert_eq!(img.get(4, 2).unwrap(), 1.0);
    }

    #[test]
    fn test_filled_rect() {
        let img = filled_rect(10, 10, Rect::new(2, 3, 4, 5)).unwrap();
        assert_eq!(img.count_foreground(), 20);
    }

    #[test]
    fn test_bimodal_range() {
        let img = bimodal(20, 10, 0.2, 0.8, 0.05).unwrap();
        let (lo, hi) = img.min_max();
        assert!(lo >= 0.15 - 1e-6 && hi <= 0.85 + 1e-6);
    }
}
