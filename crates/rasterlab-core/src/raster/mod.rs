//! Raster - Dense 2D grid of values
//!
//! `Raster<T>` is the container every other component operates on. It is a
//! width x height grid of `T`, stored row-major without padding: the value
//! at `(x, y)` lives at index `y * width + x`.
//!
//! Three specializations are used throughout the workspace:
//!
//! - [`BinaryImage`] = `Raster<bool>`
//! - [`GrayImage`] = `Raster<f32>` with values normalized to `[0, 1]`
//! - [`ColorImage`] = `Raster<Rgba>` with four normalized channels
//!
//! # Examples
//!
//! ```
//! use rasterlab_core::Raster;
//!
//! let mut raster = Raster::new_with_value(4, 3, 0.5f32).unwrap();
//! raster.set(1, 2, 1.0).unwrap();
//! assert_eq!(raster.get(1, 2).unwrap(), 1.0);
//! assert!(raster.get(4, 0).is_err());
//! ```

mod binary;
mod color;
mod gray;

pub use color::{Channel, Rgba};

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Binary raster (`true` = foreground)
pub type BinaryImage = Raster<bool>;

/// Grayscale raster with values in `[0, 1]`
pub type GrayImage = Raster<f32>;

/// Four-channel color raster
pub type ColorImage = Raster<Rgba>;

/// Dense 2D grid of values
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Copy + Default> Raster<T> {
    /// Create a raster filled with `T::default()`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, T::default())
    }
}

impl<T: Copy> Raster<T> {
    /// Create a raster with every cell set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: T) -> Result<Self> {
        check_dimensions(width, height)?;
        let size = (width as usize) * (height as usize);
        Ok(Raster {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a raster from row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are zero or the data length doesn't
    /// match `width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Create a raster by evaluating `f(x, y)` for every cell
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Result<Self> {
        check_dimensions(width, height)?;
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as `(width, height)`
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed raster; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Whether the signed coordinate lies inside the raster
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Get the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if the coordinate is outside the raster.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Result<T> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_range(x as i64, y as i64));
        }
        Ok(self.data[self.index(x, y)])
    }

    /// Get the value at (x, y) without a range check
    ///
    /// The caller guarantees `x < width` and `y < height`. Out-of-range
    /// coordinates read an unrelated cell or panic.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.data[self.index(x, y)]
    }

    /// Get the value at a signed coordinate, or `None` outside the raster
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<T> {
        if self.contains(x, y) {
            Some(self.data[self.index(x as u32, y as u32)])
        } else {
            None
        }
    }

    /// Get the value at a signed coordinate clamped to the nearest edge cell
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> T {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.data[self.index(cx, cy)]
    }

    /// Set the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if the coordinate is outside the raster.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: T) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_range(x as i64, y as i64));
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Set the value at (x, y) without a range check
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: T) {
        debug_assert!(x < self.width && y < self.height);
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Raw row-major data
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the raster and return its data
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over all cells in raster order.
    ///
    /// The iterator is double-ended, so `.rev()` walks backward from the
    /// last cell.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Mutable iteration in raster order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Iterate over `(x, y, value)` in raster order
    pub fn pixels(&self) -> impl DoubleEndedIterator<Item = (u32, u32, T)> + '_ {
        let w = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i % w) as u32, (i / w) as u32, v))
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.width as usize)
    }

    /// A single row
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if `y >= height`.
    pub fn row(&self, y: u32) -> Result<&[T]> {
        if y >= self.height {
            return Err(self.out_of_range(0, y as i64));
        }
        let start = self.index(0, y);
        Ok(&self.data[start..start + self.width as usize])
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Apply `f` to every cell, producing a raster of the same size
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Raster<U> {
        Raster {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Combine two equally-sized rasters cell by cell
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if the sizes differ.
    pub fn zip_map<U: Copy, V: Copy>(
        &self,
        other: &Raster<U>,
        mut f: impl FnMut(T, U) -> V,
    ) -> Result<Raster<V>> {
        self.ensure_same_size(other)?;
        Ok(Raster {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Whether both rasters have the same dimensions
    #[inline]
    pub fn same_size<U>(&self, other: &Raster<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fail with `Error::ShapeMismatch` unless both rasters have the same size
    pub fn ensure_same_size<U>(&self, other: &Raster<U>) -> Result<()> {
        if self.same_size(other) {
            Ok(())
        } else {
            Err(Error::ShapeMismatch {
                expected: (self.width, self.height),
                actual: (other.width, other.height),
            })
        }
    }

    /// Copy a rectangular window into a new raster
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if the rectangle does not lie inside the
    /// raster, or `Error::InvalidDimension` if it is empty.
    pub fn crop(&self, rect: Rect) -> Result<Raster<T>> {
        check_dimensions(rect.width, rect.height)?;
        let right = rect.x as u64 + rect.width as u64;
        let bottom = rect.y as u64 + rect.height as u64;
        if right > self.width as u64 || bottom > self.height as u64 {
            return Err(self.out_of_range(right as i64 - 1, bottom as i64 - 1));
        }
        Raster::from_fn(rect.width, rect.height, |x, y| {
            self.get_unchecked(rect.x + x, rect.y + y)
        })
    }

    fn out_of_range(&self, x: i64, y: i64) -> Error {
        Error::OutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

impl<'a, T> IntoIterator for &'a Raster<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(Raster::<f32>::new(0, 5).is_err());
        assert!(Raster::<bool>::new(5, 0).is_err());
    }

    #[test]
    fn test_checked_access() {
        let mut r = Raster::new_with_value(3, 2, 7u8).unwrap();
        r.set(2, 1, 9).unwrap();
        assert_eq!(r.get(2, 1).unwrap(), 9);
        assert_eq!(r.get_unchecked(0, 0), 7);
        assert!(matches!(r.get(3, 0), Err(Error::OutOfRange { x: 3, .. })));
        assert!(r.set(0, 2, 1).is_err());
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        assert!(Raster::from_vec(2, 2, vec![1u8, 2, 3]).is_err());
        let r = Raster::from_vec(2, 2, vec![1u8, 2, 3, 4]).unwrap();
        assert_eq!(r.get(1, 1).unwrap(), 4);
    }

    #[test]
    fn test_iteration_order() {
        let r = Raster::from_fn(3, 2, |x, y| y * 3 + x).unwrap();
        let fwd: Vec<u32> = r.iter().copied().collect();
        assert_eq!(fwd, vec![0, 1, 2, 3, 4, 5]);
        let back: Vec<u32> = r.iter().rev().copied().collect();
        assert_eq!(back, vec![5, 4, 3, 2, 1, 0]);
        let (x, y, v) = r.pixels().last().unwrap();
        assert_eq!((x, y, v), (2, 1, 5));
    }

    #[test]
    fn test_clamped_and_signed() {
        let r = Raster::from_fn(3, 3, |x, y| (x + 10 * y) as i32).unwrap();
        assert_eq!(r.get_clamped(-5, 1), 10);
        assert_eq!(r.get_clamped(9, 9), 22);
        assert_eq!(r.get_signed(-1, 0), None);
        assert_eq!(r.get_signed(1, 2), Some(21));
    }

    #[test]
    fn test_crop() {
        let r = Raster::from_fn(5, 4, |x, y| x + 5 * y).unwrap();
        let c = r.crop(Rect::new(1, 1, 2, 3)).unwrap();
        assert_eq!(c.size(), (2, 3));
        assert_eq!(c.get(0, 0).unwrap(), 6);
        assert_eq!(c.get(1, 2).unwrap(), 17);
        assert!(r.crop(Rect::new(4, 0, 2, 1)).is_err());
    }

    #[test]
    fn test_crop_far_offset() {
        let r = Raster::new_with_value(5, 4, 1u8).unwrap();
        for rect in [Rect::new(u32::MAX, 0, 2, 1), Rect::new(0, u32::MAX - 1, 1, 3)] {
            assert!(matches!(r.crop(rect), Err(Error::OutOfRange { .. })));
        }
    }

    #[test]
    fn test_zip_map_shape_mismatch() {
        let a = Raster::new_with_value(2, 2, 1.0f32).unwrap();
        let b = Raster::new_with_value(3, 2, 1.0f32).unwrap();
        assert!(matches!(
            a.zip_map(&b, |p, q| p + q),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
