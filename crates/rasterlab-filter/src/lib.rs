//! rasterlab-filter - Image filtering operations
//!
//! This crate provides:
//!
//! - Filter kernels ([`Kernel`]) and window reductions ([`Evaluation`])
//! - Spatial filtering with replicate borders ([`SpatialFilter`])
//! - Fourier transform and frequency-domain filtering
//!   ([`FourierTransform`], [`FrequencyDomainFilter`])
//! - Edge detection (gradient, Sobel, Canny)

pub mod edge;
mod error;
pub mod evaluation;
pub mod fourier;
pub mod kernel;
pub mod spatial;

pub use error::{FilterError, FilterResult};
pub use evaluation::{Evaluation, EvaluationFn};
pub use fourier::{FourierTransform, FrequencyDomainFilter, Precision, Weighting};
pub use kernel::{Axis, CenterSign, Compass, GradientOperator, Kernel, LineOrientation, Neighbors};
pub use spatial::SpatialFilter;

// Re-export commonly used functions
pub use edge::{
    CannyOptions, EdgeThreshold, canny, gradient_magnitude, measure_edge_threshold,
    sobel_components, sobel_magnitude, threshold_gradient, threshold_sobel,
};
