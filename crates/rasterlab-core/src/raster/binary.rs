//! Logical operations on binary rasters
//!
//! All two-operand operations require both rasters to have identical
//! dimensions and fail with `Error::ShapeMismatch` otherwise.

use super::{BinaryImage, Raster};
use crate::error::Result;

impl Raster<bool> {
    /// Logical NOT of every pixel
    pub fn invert(&self) -> BinaryImage {
        self.map(|v| !v)
    }

    /// Pixel-wise AND
    pub fn and(&self, other: &BinaryImage) -> Result<BinaryImage> {
        self.zip_map(other, |a, b| a && b)
    }

    /// Pixel-wise OR
    pub fn or(&self, other: &BinaryImage) -> Result<BinaryImage> {
        self.zip_map(other, |a, b| a || b)
    }

    /// Pixel-wise XOR
    pub fn xor(&self, other: &BinaryImage) -> Result<BinaryImage> {
        self.zip_map(other, |a, b| a ^ b)
    }

    /// Pixel-wise AND-NOT (`self & !other`)
    pub fn subtract(&self, other: &BinaryImage) -> Result<BinaryImage> {
        self.zip_map(other, |a, b| a && !b)
    }

    /// In-place AND
    pub fn and_assign(&mut self, other: &BinaryImage) -> Result<()> {
        self.combine_assign(other, |a, b| a && b)
    }

    /// In-place OR
    pub fn or_assign(&mut self, other: &BinaryImage) -> Result<()> {
        self.combine_assign(other, |a, b| a || b)
    }

    /// In-place XOR
    pub fn xor_assign(&mut self, other: &BinaryImage) -> Result<()> {
        self.combine_assign(other, |a, b| a ^ b)
    }

    /// In-place NOT
    pub fn invert_in_place(&mut self) {
        for v in self.data.iter_mut() {
            *v = !*v;
        }
    }

    /// Number of foreground pixels
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Whether every foreground pixel of `self` is also foreground in `other`
    pub fn is_subset_of(&self, other: &BinaryImage) -> Result<bool> {
        self.ensure_same_size(other)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| !a || b))
    }

    /// Convert to a grayscale raster (foreground = 1.0)
    pub fn to_gray(&self) -> Raster<f32> {
        self.map(|v| if v { 1.0 } else { 0.0 })
    }

    fn combine_assign(&mut self, other: &BinaryImage, f: impl Fn(bool, bool) -> bool) -> Result<()> {
        self.ensure_same_size(other)?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a = f(*a, b);
        }
        Ok(())
    }
}

impl std::ops::Not for &Raster<bool> {
    type Output = BinaryImage;

    fn not(self) -> BinaryImage {
        self.invert()
    }
}
