//! Neighborhood evaluation strategies
//!
//! An [`Evaluation`] reduces the values under a kernel window to one output
//! value. The window is passed row-major with the same layout as the
//! kernel weights.
//!
//! Convolution variants use every weight. Order statistics (mean, median,
//! min, max, quantile) use the kernel as a mask: only cells with a non-zero
//! weight take part, and an all-zero kernel selects the whole window.

use crate::kernel::Kernel;
use crate::{FilterError, FilterResult};
use std::fmt;

/// Signature of a user supplied evaluation function
pub type EvaluationFn = fn(&[f32], &Kernel) -> f32;

/// Reduction applied to each kernel window
#[derive(Clone, Copy, Default)]
pub enum Evaluation {
    /// Weighted sum, divided by the weight sum when it is non-zero
    #[default]
    Convolution,
    /// Weighted sum rescaled from the kernel's response range for inputs in
    /// `[0, 1]` into `[min, max]`
    RangedConvolution { min: f32, max: f32 },
    Mean,
    Median,
    Min,
    Max,
    /// The `n`-th `k`-quantile; `n <= 0` is the minimum, `n >= k` the
    /// maximum
    Quantile { n: i32, k: i32 },
    Custom(EvaluationFn),
}

impl fmt::Debug for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Convolution => write!(f, "Convolution"),
            Self::RangedConvolution { min, max } => f
                .debug_struct("RangedConvolution")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Mean => write!(f, "Mean"),
            Self::Median => write!(f, "Median"),
            Self::Min => write!(f, "Min"),
            Self::Max => write!(f, "Max"),
            Self::Quantile { n, k } => f
                .debug_struct("Quantile")
                .field("n", n)
                .field("k", k)
                .finish(),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl Evaluation {
    /// Reject parameter combinations that can never be evaluated
    pub fn validate(&self) -> FilterResult<()> {
        match *self {
            Self::Quantile { k: 0, .. } => Err(FilterError::InvalidParameters(
                "quantile count k must be non-zero".into(),
            )),
            Self::RangedConvolution { min, max } if !(min <= max) => {
                Err(FilterError::InvalidParameters(format!(
                    "ranged convolution needs min <= max, got [{min}, {max}]"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Reduce one window.
    ///
    /// `scratch` is reused between calls to avoid allocating per pixel.
    pub fn evaluate(&self, window: &[f32], kernel: &Kernel, scratch: &mut Vec<f32>) -> f32 {
        match *self {
            Self::Convolution => {
                let sum = weighted_sum(window, kernel);
                let weight = kernel.sum();
                if weight.abs() > f32::EPSILON {
                    sum / weight
                } else {
                    sum
                }
            }
            Self::RangedConvolution { min, max } => {
                let (lo, hi) = kernel.response_range();
                if hi - lo <= f32::EPSILON {
                    return min;
                }
                let sum = weighted_sum(window, kernel);
                min + (sum - lo) / (hi - lo) * (max - min)
            }
            Self::Mean => {
                let values = masked(window, kernel, scratch);
                values.iter().sum::<f32>() / values.len() as f32
            }
            Self::Median => {
                let values = masked_sorted(window, kernel, scratch);
                let mid = values.len() / 2;
                if values.len() % 2 == 1 {
                    values[mid]
                } else {
                    0.5 * (values[mid - 1] + values[mid])
                }
            }
            Self::Min => masked(window, kernel, scratch)
                .iter()
                .copied()
                .fold(f32::INFINITY, f32::min),
            Self::Max => masked(window, kernel, scratch)
                .iter()
                .copied()
                .fold(f32::NEG_INFINITY, f32::max),
            Self::Quantile { n, k } => {
                let values = masked_sorted(window, kernel, scratch);
                let last = values.len() - 1;
                let index = if n <= 0 || k == 0 {
                    0
                } else if n >= k {
                    last
                } else {
                    ((n as f64 / k as f64) * last as f64).round() as usize
                };
                values[index]
            }
            Self::Custom(f) => f(window, kernel),
        }
    }
}

fn weighted_sum(window: &[f32], kernel: &Kernel) -> f32 {
    window.iter().zip(kernel.data()).map(|(v, w)| v * w).sum()
}

/// Values under non-zero weights; never empty for a non-empty window
fn masked<'s>(window: &[f32], kernel: &Kernel, scratch: &'s mut Vec<f32>) -> &'s mut [f32] {
    scratch.clear();
    scratch.extend(
        window
            .iter()
            .zip(kernel.data())
            .filter(|&(_, &w)| w != 0.0)
            .map(|(&v, _)| v),
    );
    if scratch.is_empty() {
        scratch.extend_from_slice(window);
    }
    scratch.as_mut_slice()
}

fn masked_sorted<'s>(window: &[f32], kernel: &Kernel, scratch: &'s mut Vec<f32>) -> &'s [f32] {
    let values = masked(window, kernel, scratch);
    values.sort_by(f32::total_cmp);
    values
}
