//! Grayscale raster helpers

use super::{BinaryImage, GrayImage, Raster};

impl Raster<f32> {
    /// Photometric inverse: `1 - v` for every pixel
    pub fn invert(&self) -> GrayImage {
        self.map(|v| 1.0 - v)
    }

    /// Minimum and maximum pixel values
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Linearly rescale values so the minimum maps to 0 and the maximum to 1.
    ///
    /// A constant raster maps to all zeros.
    pub fn normalize(&self) -> GrayImage {
        let (lo, hi) = self.min_max();
        let range = hi - lo;
        if range <= f32::EPSILON {
            return self.map(|_| 0.0);
        }
        self.map(|v| (v - lo) / range)
    }

    /// Clamp every value into `[0, 1]`
    pub fn clamp_unit(&self) -> GrayImage {
        self.map(|v| v.clamp(0.0, 1.0))
    }

    /// Foreground where the value is strictly greater than `threshold`
    pub fn to_binary(&self, threshold: f32) -> BinaryImage {
        self.map(|v| v > threshold)
    }

    /// Arithmetic mean of all pixels
    pub fn mean(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum::<f64>() / self.data.len() as f64
    }
}
