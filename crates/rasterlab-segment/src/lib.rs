//! rasterlab-segment - Intensity thresholding
//!
//! Turns grayscale images into binary foreground masks:
//!
//! - Iterative intermeans threshold ([`basic_threshold`])
//! - Otsu's between-class variance threshold ([`otsu_threshold`])
//! - Running-mean adaptive threshold ([`variable_threshold`])
//!
//! Every algorithm takes a [`Histogram`](rasterlab_core::Histogram) of the
//! image it binarizes; the histogram must count exactly the image's pixels.

mod error;
pub mod threshold;

pub use error::{SegmentError, SegmentResult};
pub use threshold::{
    BasicThresholdOptions, ThresholdMethod, TraversalOrder, VariableThresholdOptions,
    basic_threshold, compute_basic_level, compute_otsu_level, measure_threshold, otsu_threshold,
    threshold_to_binary, traversal, variable_threshold,
};
