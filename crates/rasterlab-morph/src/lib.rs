//! rasterlab-morph - Morphological operations for image processing
//!
//! This crate provides morphological operations including:
//!
//! - Tri-state structuring elements with optional non-flat offsets
//! - Binary morphology: erosion, dilation, opening, closing
//! - Grayscale morphology: erosion, dilation, opening, closing
//! - Hit-or-miss transform for pattern detection
//! - Morphological gradient, top-hat, and bottom-hat transforms
//! - Boundary extraction

pub mod binary;
mod error;
pub mod grayscale;
pub mod sel;
pub mod transform;

pub use error::{MorphError, MorphResult};
pub use sel::{SeCell, StructuringElement};
pub use transform::MorphologicalTransform;

// Re-export commonly used binary morphology functions
pub use binary::{
    BoundaryType, bottom_hat, close, dilate, erode, extract_boundary, gradient, hit_or_miss,
    hit_or_miss_pair, open, top_hat,
};

// Re-export commonly used grayscale morphology functions
pub use grayscale::{
    bottom_hat_gray, close_gray, dilate_gray, erode_gray, gradient_gray, open_gray, top_hat_gray,
};
