//! Edge detection
//!
//! - [`gradient_magnitude`] / [`threshold_gradient`] - forward differences
//! - [`sobel_magnitude`] / [`threshold_sobel`] - 3x3 Sobel operator
//! - [`canny`] - smoothing, non-maximum suppression and hysteresis
//!
//! Magnitudes are scaled so that inputs in `[0, 1]` give magnitudes in
//! `[0, 1]`, which lets edge thresholds share the grayscale scale.

use crate::kernel::{Axis, GradientOperator, Kernel};
use crate::spatial::SpatialFilter;
use crate::{FilterError, FilterResult};
use rasterlab_core::{BinaryImage, GrayImage, Histogram, Raster};
use rasterlab_segment::{ThresholdMethod, measure_threshold};
use std::collections::VecDeque;
use std::f32::consts::SQRT_2;
use tracing::debug;

/// How the magnitude threshold is chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeThreshold {
    /// Edge where the magnitude exceeds this value
    Fixed(f32),
    /// Measure the threshold on the magnitude histogram
    Auto(ThresholdMethod),
}

impl Default for EdgeThreshold {
    fn default() -> Self {
        EdgeThreshold::Auto(ThresholdMethod::Otsu)
    }
}

/// Options for [`canny`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyOptions {
    /// Side of the Gaussian smoothing kernel (odd)
    pub kernel_size: u32,
    /// Standard deviation of the smoothing kernel
    pub sigma: f32,
    /// Hysteresis lower threshold; defaults to half the upper threshold
    pub lower: Option<f32>,
    /// Hysteresis upper threshold; measured with Otsu when absent
    pub upper: Option<f32>,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            kernel_size: 5,
            sigma: 1.0,
            lower: None,
            upper: None,
        }
    }
}

/// Magnitude of forward differences, divided by `sqrt(2)`
///
/// The last column and row use a zero difference in the direction that
/// leaves the image.
pub fn gradient_magnitude(image: &GrayImage) -> FilterResult<GrayImage> {
    let (w, h) = image.size();
    Ok(Raster::from_fn(w, h, |x, y| {
        let v = image.get_unchecked(x, y);
        let dx = if x + 1 < w { image.get_unchecked(x + 1, y) - v } else { 0.0 };
        let dy = if y + 1 < h { image.get_unchecked(x, y + 1) - v } else { 0.0 };
        dx.hypot(dy) / SQRT_2
    })?)
}

/// Horizontal and vertical Sobel responses
pub fn sobel_components(image: &GrayImage) -> FilterResult<(GrayImage, GrayImage)> {
    let gx = SpatialFilter::convolution(Kernel::gradient(GradientOperator::Sobel, Axis::X))
        .apply(image)?;
    let gy = SpatialFilter::convolution(Kernel::gradient(GradientOperator::Sobel, Axis::Y))
        .apply(image)?;
    Ok((gx, gy))
}

/// Sobel magnitude, divided by `4 * sqrt(2)`
pub fn sobel_magnitude(image: &GrayImage) -> FilterResult<GrayImage> {
    let (gx, gy) = sobel_components(image)?;
    Ok(gx.zip_map(&gy, |a, b| a.hypot(b) / (4.0 * SQRT_2))?)
}

/// Binary edge map from forward-difference magnitudes
pub fn threshold_gradient(image: &GrayImage, threshold: EdgeThreshold) -> FilterResult<BinaryImage> {
    let magnitude = gradient_magnitude(image)?;
    apply_threshold(&magnitude, threshold)
}

/// Binary edge map from Sobel magnitudes
pub fn threshold_sobel(image: &GrayImage, threshold: EdgeThreshold) -> FilterResult<BinaryImage> {
    let magnitude = sobel_magnitude(image)?;
    apply_threshold(&magnitude, threshold)
}

/// Normalized threshold for a magnitude raster
pub fn measure_edge_threshold(magnitude: &GrayImage, method: &ThresholdMethod) -> FilterResult<f32> {
    let histogram = Histogram::from_raster(magnitude);
    Ok(measure_threshold(&histogram, method)? as f32)
}

fn apply_threshold(magnitude: &GrayImage, threshold: EdgeThreshold) -> FilterResult<BinaryImage> {
    let t = match threshold {
        EdgeThreshold::Fixed(t) => t,
        EdgeThreshold::Auto(method) => measure_edge_threshold(magnitude, &method)?,
    };
    Ok(magnitude.to_binary(t))
}

/// Gradient direction quantized to the four neighbor axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sector {
    Deg0,
    Deg45,
    Deg90,
    Deg135,
}

impl Sector {
    fn from_gradient(gx: f32, gy: f32) -> Self {
        let mut angle = gy.atan2(gx).to_degrees();
        if angle < 0.0 {
            angle += 180.0;
        }
        if !(22.5..157.5).contains(&angle) {
            Sector::Deg0
        } else if angle < 67.5 {
            Sector::Deg45
        } else if angle < 112.5 {
            Sector::Deg90
        } else {
            Sector::Deg135
        }
    }

    /// Step toward increasing gradient (y grows downward)
    fn forward(self) -> (i64, i64) {
        match self {
            Sector::Deg0 => (1, 0),
            Sector::Deg45 => (1, 1),
            Sector::Deg90 => (0, 1),
            Sector::Deg135 => (-1, 1),
        }
    }
}

/// Canny edge detector
///
/// 1. Gaussian smoothing (`kernel_size`, `sigma`)
/// 2. Sobel magnitude and direction, direction quantized to 0/45/90/135
/// 3. Non-maximum suppression: a pixel survives when it is strictly greater
///    than its backward neighbor and not less than its forward neighbor
///    along the gradient, so a plateau two pixels wide keeps one pixel
/// 4. Pixels at or above `upper` seed edges; pixels at or above `lower`
///    join an edge when 8-connected to one
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` when `lower > upper` and
/// `FilterError::InvalidKernel` for an unusable smoothing kernel.
pub fn canny(image: &GrayImage, options: &CannyOptions) -> FilterResult<BinaryImage> {
    let smoothing = SpatialFilter::convolution(Kernel::gaussian(options.kernel_size, options.sigma)?);
    let smoothed = smoothing.apply(image)?;
    let (gx, gy) = sobel_components(&smoothed)?;
    let magnitude = gx.zip_map(&gy, |a, b| a.hypot(b) / (4.0 * SQRT_2))?;

    let upper = match options.upper {
        Some(u) => u,
        None => measure_edge_threshold(&magnitude, &ThresholdMethod::Otsu)?,
    };
    let lower = options.lower.unwrap_or(0.5 * upper);
    if lower > upper {
        return Err(FilterError::InvalidParameters(format!(
            "canny lower threshold {lower} exceeds upper threshold {upper}"
        )));
    }
    debug!(lower, upper, auto = options.upper.is_none(), "canny thresholds");

    let (w, h) = magnitude.size();
    let suppressed = Raster::from_fn(w, h, |x, y| {
        let m = magnitude.get_unchecked(x, y);
        let (dx, dy) = Sector::from_gradient(gx.get_unchecked(x, y), gy.get_unchecked(x, y)).forward();
        let (xi, yi) = (x as i64, y as i64);
        let ahead = magnitude.get_signed(xi + dx, yi + dy).unwrap_or(0.0);
        let behind = magnitude.get_signed(xi - dx, yi - dy).unwrap_or(0.0);
        if m > behind && m >= ahead { m } else { 0.0 }
    })?;

    hysteresis(&suppressed, lower, upper)
}

/// Keep weak pixels 8-connected to a strong pixel
fn hysteresis(magnitude: &GrayImage, lower: f32, upper: f32) -> FilterResult<BinaryImage> {
    let (w, h) = magnitude.size();
    let mut edges = Raster::new_with_value(w, h, false)?;
    let mut queue = VecDeque::new();

    for (x, y, m) in magnitude.pixels() {
        if m > 0.0 && m >= upper {
            edges.set_unchecked(x, y, true);
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                let Some(m) = magnitude.get_signed(nx, ny) else {
                    continue;
                };
                let (nx, ny) = (nx as u32, ny as u32);
                if m > 0.0 && m >= lower && !edges.get_unchecked(nx, ny) {
                    edges.set_unchecked(nx, ny, true);
                    queue.push_back((nx, ny));
                }
            }
        }
    }

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(w: u32, h: u32) -> GrayImage {
        Raster::from_fn(w, h, |x, _| if x < w / 2 { 0.0 } else { 1.0 }).unwrap()
    }

    #[test]
    fn test_gradient_magnitude_range() {
        let img = Raster::from_fn(4, 4, |x, y| ((x + y) % 2) as f32).unwrap();
        let m = gradient_magnitude(&img).unwrap();
        assert!(m.iter().all(|&v| (0.0..=1.0 + 1e-6).contains(&v)));
        assert!((m.get(0, 0).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sobel_magnitude_step() {
        let m = sobel_magnitude(&step(8, 4)).unwrap();
        // |gx| = 4 on both sides of the step
        assert!((m.get(3, 1).unwrap() - 1.0 / SQRT_2).abs() < 1e-6);
        assert_eq!(m.get(0, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_threshold_sobel_fixed() {
        let e = threshold_sobel(&step(8, 4), EdgeThreshold::Fixed(0.5)).unwrap();
        assert_eq!(e.count_foreground(), 8);
        assert!(e.get(3, 0).unwrap() && e.get(4, 3).unwrap());
    }

    #[test]
    fn test_sector() {
        assert_eq!(Sector::from_gradient(1.0, 0.0), Sector::Deg0);
        assert_eq!(Sector::from_gradient(-1.0, 0.0), Sector::Deg0);
        assert_eq!(Sector::from_gradient(1.0, 1.0), Sector::Deg45);
        assert_eq!(Sector::from_gradient(0.0, -1.0), Sector::Deg90);
        assert_eq!(Sector::from_gradient(-1.0, 1.0), Sector::Deg135);
    }

    #[test]
    fn test_canny_rejects_inverted_thresholds() {
        let options = CannyOptions {
            lower: Some(0.4),
            upper: Some(0.2),
            ..Default::default()
        };
        assert!(matches!(
            canny(&step(8, 8), &options),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_canny_flat_image_has_no_edges() {
        let img = Raster::new_with_value(8, 8, 0.3f32).unwrap();
        let e = canny(&img, &CannyOptions::default()).unwrap();
        assert_eq!(e.count_foreground(), 0);
    }
}
