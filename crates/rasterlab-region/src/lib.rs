//! rasterlab-region - Region processing for rasterlab
//!
//! This crate provides region processing functionality including:
//!
//! - **Connected component analysis** - Labeling a binary mask into
//!   [`ImageSegment`]s
//! - **Boundary tracing** - Closed 4-connected outer boundary loops and
//!   their corner polygons
//! - **Shape descriptors** - [`ImageRegion`] measurements: area, perimeter,
//!   compactness, circularity, eccentricity, porosity, holes, oriented
//!   bounding box, principal axes, moments and boundary signatures
//!
//! # Examples
//!
//! ```
//! use rasterlab_core::{Raster, Rect};
//! use rasterlab_region::{Connectivity, ImageRegion, find_segments};
//!
//! let mask = Raster::from_fn(10, 10, |x, y| Rect::new(2, 3, 4, 5).contains((x, y).into())).unwrap();
//! let segments = find_segments(&mask, &mask, Connectivity::Four).unwrap();
//! assert_eq!(segments.len(), 1);
//!
//! let region = ImageRegion::new(&segments[0]).unwrap();
//! assert_eq!(region.area(), 20);
//! assert_eq!(region.perimeter(), 2 * (4 + 5) - 4);
//! ```

pub mod boundary;
pub mod conncomp;
mod error;
pub mod moments;
pub mod region;
pub mod segment;
pub mod shape;
pub mod signature;

pub use boundary::{Direction4, PolygonVertex, Turn, simplify, trace_boundary};
pub use conncomp::{Connectivity, find_segments, label_components};
pub use error::{RegionError, RegionResult};
pub use region::ImageRegion;
pub use segment::ImageSegment;
pub use shape::{Covariance, OrientedRect, PointF, convex_hull, min_area_rect};
