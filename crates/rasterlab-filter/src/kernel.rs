//! Filter kernels
//!
//! A [`Kernel`] is an odd-sized square grid of weights whose origin is the
//! central cell. Kernels are applied in correlation order: the weight at
//! kernel cell `(i, j)` multiplies the source pixel at
//! `(x + i - r, y + j - r)` where `r` is the kernel radius.
//!
//! Predefined kernels:
//!
//! | constructor | kernel |
//! |-------------|--------|
//! | [`Kernel::identity`] | 1 at the center |
//! | [`Kernel::zero`] / [`Kernel::one`] / [`Kernel::constant`] | uniform |
//! | [`Kernel::box_normalized`] | uniform, summing to 1 |
//! | [`Kernel::gaussian`] | sampled Gaussian, summing to 1 |
//! | [`Kernel::laplacian`] | 4- or 8-neighbor Laplacian |
//! | [`Kernel::line`] | line detectors at 0, 45, 90, 135 degrees |
//! | [`Kernel::gradient`] | simple, Roberts, Prewitt, Sobel |
//! | [`Kernel::kirsch`] | compass kernels |
//! | [`Kernel::laplacian_of_gaussian`] | zero-sum LoG |

use crate::{FilterError, FilterResult};
use rasterlab_core::Raster;
use std::f32::consts::PI;

/// Square filter kernel with odd side length
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Raster<f32>,
}

/// Neighborhood used by the Laplacian kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighbors {
    /// Horizontal and vertical neighbors
    #[default]
    Four,
    /// All eight neighbors
    Eight,
}

/// Sign of the Laplacian center weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CenterSign {
    #[default]
    Negative,
    Positive,
}

/// Orientation of a line-detection kernel, in degrees counter-clockwise
/// from the horizontal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrientation {
    Deg0,
    Deg45,
    Deg90,
    Deg135,
}

/// Derivative operator family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientOperator {
    /// Forward difference
    Simple,
    Roberts,
    Prewitt,
    Sobel,
}

/// Derivative direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal derivative (responds to vertical edges)
    X,
    /// Vertical derivative (responds to horizontal edges)
    Y,
}

/// Kirsch compass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
    East,
    NorthEast,
}

impl Compass {
    /// All directions, counter-clockwise from north
    pub const ALL: [Compass; 8] = [
        Compass::North,
        Compass::NorthWest,
        Compass::West,
        Compass::SouthWest,
        Compass::South,
        Compass::SouthEast,
        Compass::East,
        Compass::NorthEast,
    ];

    fn steps(self) -> usize {
        self as usize
    }
}

/// Outer ring of a 3x3 kernel, clockwise from the top-left corner
const RING: [(u32, u32); 8] = [
    (0, 0),
    (1, 0),
    (2, 0),
    (2, 1),
    (2, 2),
    (1, 2),
    (0, 2),
    (0, 1),
];

impl Kernel {
    /// Create a kernel of zeros
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` if `size` is zero or even.
    pub fn new(size: u32) -> FilterResult<Self> {
        check_size(size)?;
        Ok(Self {
            weights: Raster::new_with_value(size, size, 0.0)?,
        })
    }

    /// Create a kernel from row-major weights
    pub fn from_slice(size: u32, data: &[f32]) -> FilterResult<Self> {
        check_size(size)?;
        if data.len() != (size * size) as usize {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} weights for a {size}x{size} kernel, got {}",
                size * size,
                data.len()
            )));
        }
        Ok(Self {
            weights: Raster::from_vec(size, size, data.to_vec())?,
        })
    }

    /// Use a square, odd-sized raster as kernel weights
    pub fn from_raster(weights: Raster<f32>) -> FilterResult<Self> {
        if weights.width() != weights.height() {
            return Err(FilterError::InvalidKernel(format!(
                "kernel must be square, got {}x{}",
                weights.width(),
                weights.height()
            )));
        }
        check_size(weights.width())?;
        Ok(Self { weights })
    }

    fn from_fn(size: u32, f: impl FnMut(u32, u32) -> f32) -> FilterResult<Self> {
        check_size(size)?;
        Ok(Self {
            weights: Raster::from_fn(size, size, f)?,
        })
    }

    fn fixed3(data: [f32; 9]) -> Self {
        Self {
            weights: Raster::from_fn(3, 3, |x, y| data[(y * 3 + x) as usize])
                .unwrap_or_else(|_| unreachable!("3x3 is a valid size")),
        }
    }

    /// 1 at the center, 0 elsewhere
    pub fn identity(size: u32) -> FilterResult<Self> {
        let r = size / 2;
        Self::from_fn(size, |x, y| if x == r && y == r { 1.0 } else { 0.0 })
    }

    /// All weights 0
    pub fn zero(size: u32) -> FilterResult<Self> {
        Self::constant(size, 0.0)
    }

    /// All weights 1
    pub fn one(size: u32) -> FilterResult<Self> {
        Self::constant(size, 1.0)
    }

    /// All weights `value`
    pub fn constant(size: u32, value: f32) -> FilterResult<Self> {
        Self::from_fn(size, |_, _| value)
    }

    /// Box kernel with weights `1 / (size * size)`
    pub fn box_normalized(size: u32) -> FilterResult<Self> {
        Self::constant(size, 1.0 / (size as f32 * size as f32))
    }

    /// Sampled Gaussian normalized to unit sum
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        if !(sigma > 0.0) {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian sigma must be positive, got {sigma}"
            )));
        }
        let r = (size / 2) as f32;
        let mut kernel = Self::from_fn(size, |x, y| {
            let dx = x as f32 - r;
            let dy = y as f32 - r;
            (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp()
        })?;
        kernel.normalize();
        Ok(kernel)
    }

    /// 3x3 discrete Laplacian
    pub fn laplacian(neighbors: Neighbors, sign: CenterSign) -> Self {
        let base = match neighbors {
            Neighbors::Four => [0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0],
            Neighbors::Eight => [1.0, 1.0, 1.0, 1.0, -8.0, 1.0, 1.0, 1.0, 1.0],
        };
        let kernel = Self::fixed3(base);
        match sign {
            CenterSign::Negative => kernel,
            CenterSign::Positive => kernel.scaled(-1.0),
        }
    }

    /// 3x3 line detector responding to one-pixel lines of the given slope
    pub fn line(orientation: LineOrientation) -> Self {
        Self::fixed3(match orientation {
            LineOrientation::Deg0 => [-1.0, -1.0, -1.0, 2.0, 2.0, 2.0, -1.0, -1.0, -1.0],
            LineOrientation::Deg45 => [-1.0, -1.0, 2.0, -1.0, 2.0, -1.0, 2.0, -1.0, -1.0],
            LineOrientation::Deg90 => [-1.0, 2.0, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0, -1.0],
            LineOrientation::Deg135 => [2.0, -1.0, -1.0, -1.0, 2.0, -1.0, -1.0, -1.0, 2.0],
        })
    }

    /// 3x3 derivative kernel
    ///
    /// Two-cell operators (simple, Roberts) are embedded with their
    /// reference cell at the center.
    pub fn gradient(operator: GradientOperator, axis: Axis) -> Self {
        let x = match operator {
            GradientOperator::Simple => [0.0, 0.0, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0, 0.0],
            GradientOperator::Roberts => [0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0],
            GradientOperator::Prewitt => [-1.0, 0.0, 1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0],
            GradientOperator::Sobel => [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        };
        match (operator, axis) {
            (_, Axis::X) => Self::fixed3(x),
            (GradientOperator::Roberts, Axis::Y) => {
                Self::fixed3([0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0])
            }
            (_, Axis::Y) => Self::fixed3(x).transposed(),
        }
    }

    /// Kirsch compass kernel
    ///
    /// The north kernel has weight 5 along the top row; the other seven are
    /// obtained by rotating the outer ring in 45 degree steps.
    pub fn kirsch(direction: Compass) -> Self {
        let north = [5.0, 5.0, 5.0, -3.0, -3.0, -3.0, -3.0, -3.0];
        let mut data = [0.0f32; 9];
        for (i, &(x, y)) in RING.iter().enumerate() {
            data[(y * 3 + x) as usize] = north[(i + direction.steps()) % 8];
        }
        Self::fixed3(data)
    }

    /// Laplacian of Gaussian, shifted to sum to zero
    pub fn laplacian_of_gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        if !(sigma > 0.0) {
            return Err(FilterError::InvalidKernel(format!(
                "LoG sigma must be positive, got {sigma}"
            )));
        }
        let r = (size / 2) as f32;
        let s2 = sigma * sigma;
        let mut kernel = Self::from_fn(size, |x, y| {
            let dx = x as f32 - r;
            let dy = y as f32 - r;
            let q = (dx * dx + dy * dy) / (2.0 * s2);
            -(1.0 / (PI * s2 * s2)) * (1.0 - q) * (-q).exp()
        })?;
        let mean = kernel.sum() / kernel.len() as f32;
        kernel.weights.iter_mut().for_each(|w| *w -= mean);
        Ok(kernel)
    }

    /// Side length
    #[inline]
    pub fn size(&self) -> u32 {
        self.weights.width()
    }

    /// Distance from the center to an edge
    #[inline]
    pub fn radius(&self) -> u32 {
        self.size() / 2
    }

    /// Number of weights
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false; kernels have at least one cell
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Weight at kernel cell `(x, y)`
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        self.weights.get(x, y).ok()
    }

    /// Set the weight at kernel cell `(x, y)`
    pub fn set(&mut self, x: u32, y: u32, value: f32) -> FilterResult<()> {
        Ok(self.weights.set(x, y, value)?)
    }

    /// Row-major weights
    #[inline]
    pub fn data(&self) -> &[f32] {
        self.weights.data()
    }

    /// Weights as a raster
    pub fn as_raster(&self) -> &Raster<f32> {
        &self.weights
    }

    /// Sum of all weights
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Smallest and largest response to inputs in `[0, 1]`
    ///
    /// The minimum takes every negative weight at full input; the maximum
    /// takes every positive weight at full input.
    pub fn response_range(&self) -> (f32, f32) {
        self.weights.iter().fold((0.0, 0.0), |(lo, hi), &w| {
            if w < 0.0 { (lo + w, hi) } else { (lo, hi + w) }
        })
    }

    /// Scale weights so they sum to 1; zero-sum kernels are left unchanged
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() > f32::EPSILON {
            self.weights.iter_mut().for_each(|w| *w /= sum);
        }
    }

    /// Copy with every weight multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            weights: self.weights.map(|w| w * factor),
        }
    }

    /// Copy with rows and columns exchanged
    pub fn transposed(&self) -> Self {
        let s = self.size();
        Self {
            weights: Raster::from_fn(s, s, |x, y| self.weights.get_unchecked(y, x))
                .unwrap_or_else(|_| unreachable!("same size as a valid kernel")),
        }
    }

    /// Rotate by `quarter_turns` x 90 degrees clockwise on screen
    ///
    /// Negative values rotate counter-clockwise.
    pub fn rotate(&self, quarter_turns: i32) -> Self {
        let s = self.size();
        let last = s - 1;
        let w = &self.weights;
        let rotated = match quarter_turns.rem_euclid(4) {
            0 => return self.clone(),
            1 => Raster::from_fn(s, s, |x, y| w.get_unchecked(y, last - x)),
            2 => Raster::from_fn(s, s, |x, y| w.get_unchecked(last - x, last - y)),
            _ => Raster::from_fn(s, s, |x, y| w.get_unchecked(last - y, x)),
        };
        Self {
            weights: rotated.unwrap_or_else(|_| unreachable!("same size as a valid kernel")),
        }
    }
}

fn check_size(size: u32) -> FilterResult<()> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel size must be odd and positive, got {size}"
        )));
    }
    Ok(())
}
