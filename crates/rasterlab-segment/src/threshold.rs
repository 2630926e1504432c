//! Global and adaptive thresholding
//!
//! Converts a grayscale image into a binary mask. Each algorithm consumes
//! the image together with a [`Histogram`] built from it:
//!
//! - [`basic_threshold`] - iterative intermeans selection
//! - [`otsu_threshold`] - maximum between-class variance
//! - [`variable_threshold`] - running local mean along a fixed traversal
//! - [`threshold_to_binary`] - fixed threshold
//!
//! Foreground convention: a pixel is set when its level is strictly greater
//! than the selected threshold. Thresholds are expressed in histogram
//! levels (0..=255 for normalized floats) unless noted otherwise.

use crate::{SegmentError, SegmentResult};
use rasterlab_core::{BinaryImage, GrayImage, Histogram, Intensity, Point, Raster};
use std::collections::VecDeque;
use tracing::debug;

/// Default iteration cap for [`basic_threshold`]
pub const DEFAULT_MAX_ITERATIONS: u32 = 256;

/// Options for the iterative intermeans threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicThresholdOptions {
    /// Stop when successive thresholds differ by at most this many levels
    pub tolerance: f64,
    /// Give up with `NonConvergence` after this many updates
    pub max_iterations: u32,
}

impl Default for BasicThresholdOptions {
    fn default() -> Self {
        Self {
            // one level = 1/255 of the normalized range
            tolerance: 1.0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Pixel visiting order for [`variable_threshold`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Clockwise spiral from the top-left corner inward
    #[default]
    Spiral,
    /// Row by row, alternating direction on each row
    Boustrophedon,
}

/// Options for the running-mean threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableThresholdOptions {
    /// Window length as a fraction of the pixel count, in `(0, 1]`
    pub tail_fraction: f64,
    /// Traversal order
    pub order: TraversalOrder,
}

impl Default for VariableThresholdOptions {
    fn default() -> Self {
        Self {
            tail_fraction: 0.2,
            order: TraversalOrder::Spiral,
        }
    }
}

/// Global threshold selection method
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ThresholdMethod {
    Basic(BasicThresholdOptions),
    #[default]
    Otsu,
}

/// Binarize with a fixed normalized threshold
pub fn threshold_to_binary(image: &GrayImage, threshold: f32) -> BinaryImage {
    image.to_binary(threshold)
}

/// Iterative intermeans threshold level.
///
/// Starts at the histogram median and repeatedly moves the threshold to the
/// midpoint of the count-weighted means of the levels at or below it and
/// the levels above it.
///
/// When one side is empty (a single distinct level) the current threshold
/// is returned unchanged, which classifies every pixel as background.
///
/// # Errors
///
/// - `SegmentError::NonConvergence` when `max_iterations` updates do not
///   bring successive thresholds within `tolerance`.
/// - `SegmentError::InvalidParameters` for a negative tolerance or a zero
///   iteration cap.
pub fn compute_basic_level(
    histogram: &Histogram,
    options: &BasicThresholdOptions,
) -> SegmentResult<f64> {
    if !(options.tolerance >= 0.0) {
        return Err(SegmentError::InvalidParameters(format!(
            "tolerance must be non-negative, got {}",
            options.tolerance
        )));
    }
    if options.max_iterations == 0 {
        return Err(SegmentError::InvalidParameters(
            "max_iterations must be at least 1".into(),
        ));
    }

    let mut threshold = histogram.median() as f64;
    for iteration in 1..=options.max_iterations {
        let (low, high) = class_means(histogram, threshold);
        let (Some(low), Some(high)) = (low, high) else {
            debug!(threshold, "single intensity class, keeping threshold");
            return Ok(threshold);
        };

        let next = low + 0.5 * (high - low).abs();
        debug!(iteration, threshold = next, low, high, "basic threshold update");
        if (next - threshold).abs() <= options.tolerance {
            return Ok(next);
        }
        threshold = next;
    }

    debug!(threshold, "basic threshold reached iteration cap");
    Err(SegmentError::NonConvergence {
        iterations: options.max_iterations,
        threshold,
    })
}

/// Binarize with the iterative intermeans threshold
pub fn basic_threshold(
    image: &GrayImage,
    histogram: &Histogram,
    options: &BasicThresholdOptions,
) -> SegmentResult<BinaryImage> {
    check_histogram(image, histogram)?;
    let level = compute_basic_level(histogram, options)?;
    Ok(classify(image, level))
}

/// Otsu threshold level.
///
/// Evaluates every candidate level `k` between the lowest and highest
/// observed level, computing the cumulative class probability `w(k)` and
/// cumulative mean `mu(k)`; the between-class variance is
/// `(mu_T * w - mu)^2 / (w * (1 - w))`. When several consecutive levels
/// share the maximum, the midpoint of that plateau is returned.
///
/// A histogram with a single distinct level returns that level.
pub fn compute_otsu_level(histogram: &Histogram) -> f64 {
    let total = histogram.total() as f64;
    let mean_total = histogram.mean();

    let mut omega = 0.0f64;
    let mut mu = 0.0f64;
    let mut best = f64::NEG_INFINITY;
    let mut first = histogram.min_level();
    let mut last = histogram.min_level();

    for k in histogram.min_level()..histogram.max_level() {
        let p = histogram.count(k) as f64 / total;
        omega += p;
        mu += k as f64 * p;
        if omega <= 0.0 || omega >= 1.0 {
            continue;
        }
        let diff = mean_total * omega - mu;
        let variance = diff * diff / (omega * (1.0 - omega));
        if variance > best {
            best = variance;
            first = k;
            last = k;
        } else if variance == best {
            last = k;
        }
    }

    (first as f64 + last as f64) / 2.0
}

/// Binarize with Otsu's method
pub fn otsu_threshold(image: &GrayImage, histogram: &Histogram) -> SegmentResult<BinaryImage> {
    check_histogram(image, histogram)?;
    let level = compute_otsu_level(histogram);
    debug!(level, "otsu threshold");
    Ok(classify(image, level))
}

/// Measure a global threshold on the normalized `[0, 1]` scale
pub fn measure_threshold(histogram: &Histogram, method: &ThresholdMethod) -> SegmentResult<f64> {
    let level = match method {
        ThresholdMethod::Basic(options) => compute_basic_level(histogram, options)?,
        ThresholdMethod::Otsu => compute_otsu_level(histogram),
    };
    Ok(histogram.normalized(level))
}

/// Spatially adaptive threshold using a running mean.
///
/// Pixels are visited in a fixed order. Each pixel is compared against the
/// mean of the most recent `ceil(tail_fraction * N)` visited values before
/// its own value enters the window. Until the first value has been seen,
/// the comparison uses the histogram mean.
pub fn variable_threshold(
    image: &GrayImage,
    histogram: &Histogram,
    options: &VariableThresholdOptions,
) -> SegmentResult<BinaryImage> {
    check_histogram(image, histogram)?;
    if !(options.tail_fraction > 0.0 && options.tail_fraction <= 1.0) {
        return Err(SegmentError::InvalidParameters(format!(
            "tail_fraction must lie in (0, 1], got {}",
            options.tail_fraction
        )));
    }

    let n = image.len();
    let window_len = ((options.tail_fraction * n as f64).ceil() as usize).clamp(1, n);
    let initial_mean = histogram.normalized(histogram.mean());

    let mut out = Raster::new_with_value(image.width(), image.height(), false)?;
    let mut window: VecDeque<f64> = VecDeque::with_capacity(window_len);
    let mut sum = 0.0f64;

    for p in traversal(image.width(), image.height(), options.order) {
        let v = image.get_unchecked(p.x, p.y) as f64;
        let mean = if window.is_empty() {
            initial_mean
        } else {
            sum / window.len() as f64
        };
        out.set_unchecked(p.x, p.y, v > mean);

        window.push_back(v);
        sum += v;
        if window.len() > window_len {
            sum -= window.pop_front().unwrap_or(0.0);
        }
    }

    Ok(out)
}

/// Visiting order of every pixel for the given traversal
pub fn traversal(width: u32, height: u32, order: TraversalOrder) -> Vec<Point> {
    let mut points = Vec::with_capacity(width as usize * height as usize);
    match order {
        TraversalOrder::Boustrophedon => {
            for y in 0..height {
                if y % 2 == 0 {
                    points.extend((0..width).map(|x| Point::new(x, y)));
                } else {
                    points.extend((0..width).rev().map(|x| Point::new(x, y)));
                }
            }
        }
        TraversalOrder::Spiral => {
            if width == 0 || height == 0 {
                return points;
            }
            let (mut left, mut top) = (0i64, 0i64);
            let (mut right, mut bottom) = (width as i64 - 1, height as i64 - 1);
            while left <= right && top <= bottom {
                for x in left..=right {
                    points.push(Point::new(x as u32, top as u32));
                }
                for y in top + 1..=bottom {
                    points.push(Point::new(right as u32, y as u32));
                }
                if top < bottom {
                    for x in (left..right).rev() {
                        points.push(Point::new(x as u32, bottom as u32));
                    }
                }
                if left < right {
                    for y in (top + 1..bottom).rev() {
                        points.push(Point::new(left as u32, y as u32));
                    }
                }
                left += 1;
                top += 1;
                right -= 1;
                bottom -= 1;
            }
        }
    }
    points
}

fn classify(image: &GrayImage, level: f64) -> BinaryImage {
    image.map(|v| v.level() as f64 > level)
}

/// Count-weighted means of the levels at/below and above `threshold`
fn class_means(histogram: &Histogram, threshold: f64) -> (Option<f64>, Option<f64>) {
    let (mut low_sum, mut low_count) = (0.0f64, 0u64);
    let (mut high_sum, mut high_count) = (0.0f64, 0u64);
    for (level, count) in histogram.iter() {
        if level as f64 <= threshold {
            low_sum += level as f64 * count as f64;
            low_count += count;
        } else {
            high_sum += level as f64 * count as f64;
            high_count += count;
        }
    }
    let mean = |sum: f64, count: u64| (count > 0).then(|| sum / count as f64);
    (mean(low_sum, low_count), mean(high_sum, high_count))
}

fn check_histogram(image: &GrayImage, histogram: &Histogram) -> SegmentResult<()> {
    if histogram.total() != image.len() as u64 {
        return Err(SegmentError::InvalidParameters(format!(
            "histogram counts {} pixels but image has {}",
            histogram.total(),
            image.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_method_is_otsu() {
        assert_eq!(ThresholdMethod::default(), ThresholdMethod::Otsu);
    }

    #[test]
    fn test_spiral_visits_every_pixel_once() {
        for (w, h) in [(1, 1), (1, 5), (5, 1), (4, 4), (7, 3), (3, 8)] {
            let pts = traversal(w, h, TraversalOrder::Spiral);
            let unique: HashSet<_> = pts.iter().copied().collect();
            assert_eq!(pts.len(), (w * h) as usize);
            assert_eq!(unique.len(), (w * h) as usize);
        }
        let pts = traversal(3, 3, TraversalOrder::Spiral);
        assert_eq!(pts[0], Point::new(0, 0));
        assert_eq!(pts[3], Point::new(2, 1));
        assert_eq!(pts[8], Point::new(1, 1));
    }

    #[test]
    fn test_boustrophedon_order() {
        let pts = traversal(3, 2, TraversalOrder::Boustrophedon);
        assert_eq!(pts[2], Point::new(2, 0));
        assert_eq!(pts[3], Point::new(2, 1));
        assert_eq!(pts[5], Point::new(0, 1));
    }

    #[test]
    fn test_basic_threshold_constant_image() {
        let img = Raster::new_with_value(6, 6, 0.5f32).unwrap();
        let hist = Histogram::from_raster(&img);
        let mask = basic_threshold(&img, &hist, &BasicThresholdOptions::default()).unwrap();
        assert_eq!(mask.count_foreground(), 0);
    }

    #[test]
    fn test_basic_threshold_iteration_cap() {
        let img = Raster::from_vec(2, 2, vec![0.0f32, 0.0, 0.0, 1.0]).unwrap();
        let hist = Histogram::from_raster(&img);
        let options = BasicThresholdOptions {
            tolerance: 1.0,
            max_iterations: 1,
        };
        let err = basic_threshold(&img, &hist, &options).unwrap_err();
        assert!(matches!(err, SegmentError::NonConvergence { iterations: 1, .. }));

        // With the default cap the same image converges
        let mask = basic_threshold(&img, &hist, &BasicThresholdOptions::default()).unwrap();
        assert_eq!(mask.count_foreground(), 1);
    }

    #[test]
    fn test_otsu_plateau_midpoint() {
        let hist = Histogram::from_counts(255, [(50, 100), (200, 100)]).unwrap();
        let level = compute_otsu_level(&hist);
        assert!((level - 124.5).abs() < 1e-9);
    }

    #[test]
    fn test_otsu_single_level() {
        let hist = Histogram::from_counts(255, [(77, 10)]).unwrap();
        assert_eq!(compute_otsu_level(&hist), 77.0);
    }

    #[test]
    fn test_histogram_must_match_image() {
        let img = Raster::new_with_value(3, 3, 0.5f32).unwrap();
        let other = Raster::new_with_value(2, 2, 0.5f32).unwrap();
        let hist = Histogram::from_raster(&other);
        assert!(otsu_threshold(&img, &hist).is_err());
    }

    #[test]
    fn test_variable_threshold_rejects_bad_fraction() {
        let img = Raster::new_with_value(3, 3, 0.5f32).unwrap();
        let hist = Histogram::from_raster(&img);
        let options = VariableThresholdOptions {
            tail_fraction: 0.0,
            ..Default::default()
        };
        assert!(variable_threshold(&img, &hist, &options).is_err());
    }
}
