//! rasterlab - 2D raster image processing for Rust
//!
//! # Overview
//!
//! rasterlab operates on dense in-memory grids and composes into
//! pipelines (filter → threshold → connected components → shape
//! descriptors):
//!
//! - Spatial filtering with pluggable window evaluations
//! - Frequency-domain filtering
//! - Binary and grayscale morphology
//! - Global and adaptive thresholding
//! - Gradient, Sobel and Canny edge detection
//! - Connected components, boundary tracing and shape descriptors
//!
//! Decoding, encoding and display are left to the caller.
//!
//! # Example
//!
//! ```
//! use rasterlab::{Histogram, Raster};
//! use rasterlab::morph::{StructuringElement, open};
//! use rasterlab::region::{Connectivity, ImageRegion, find_segments};
//! use rasterlab::segment::otsu_threshold;
//!
//! // a bright 6x4 block on a dark background
//! let image = Raster::from_fn(16, 12, |x, y| {
//!     if (5..11).contains(&x) && (4..8).contains(&y) { 0.9f32 } else { 0.1 }
//! })
//! .unwrap();
//!
//! let histogram = Histogram::from_raster(&image);
//! let mask = otsu_threshold(&image, &histogram).unwrap();
//! let mask = open(&mask, &StructuringElement::square(3).unwrap()).unwrap();
//!
//! let segments = find_segments(&image, &mask, Connectivity::Four).unwrap();
//! assert_eq!(segments.len(), 1);
//! let region = ImageRegion::new(&segments[0]).unwrap();
//! assert_eq!(region.area(), 24);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rasterlab_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rasterlab_filter as filter;
pub use rasterlab_morph as morph;
pub use rasterlab_region as region;
pub use rasterlab_segment as segment;
