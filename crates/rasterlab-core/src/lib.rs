//! rasterlab core - Basic data structures for raster image processing
//!
//! This crate provides the fundamental data structures used throughout
//! the rasterlab workspace:
//!
//! - [`Raster`] - Generic dense 2D grid, with the [`BinaryImage`],
//!   [`GrayImage`] and [`ColorImage`] specializations
//! - [`Rgba`] - Four-channel normalized color
//! - [`Histogram`] - Immutable intensity-count summary of a raster
//! - [`Point`] / [`Rect`] - Pixel coordinates and rectangles
//! - [`Complex`] - Complex numbers for spectral work
//!
//! Row/column convention: coordinates are `(x, y)` with `x` the column and
//! `y` the row; storage is row-major. Every crate in the workspace follows
//! this convention.

pub mod complex;
pub mod error;
pub mod geometry;
pub mod histogram;
pub mod raster;

pub use complex::Complex;
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use histogram::{Histogram, Intensity};
pub use raster::{BinaryImage, Channel, ColorImage, GrayImage, Raster, Rgba};
