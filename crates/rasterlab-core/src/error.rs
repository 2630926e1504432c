//! Error types for rasterlab-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details. Domain crates wrap this type in their
//! own error enums.

use thiserror::Error;

/// rasterlab core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Checked pixel access outside the raster
    #[error("pixel ({x}, {y}) out of range for {width}x{height} raster")]
    OutOfRange {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// Operands with different dimensions were combined
    #[error("shape mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
