//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building fixtures or checking results
#[derive(Debug, Error)]
pub enum TestError {
    /// Core library error while constructing a fixture
    #[error("core error: {0}")]
    Core(#[from] rasterlab_core::Error),

    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Raster comparison failed
    #[error("raster comparison failed at index {index}")]
    RasterMismatch { index: usize },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
