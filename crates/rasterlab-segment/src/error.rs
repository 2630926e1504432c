//! Error types for rasterlab-segment

use thiserror::Error;

/// Errors that can occur during thresholding
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rasterlab_core::Error),

    /// Iterative threshold selection hit its iteration cap
    #[error("threshold did not converge after {iterations} iterations (last threshold {threshold})")]
    NonConvergence { iterations: u32, threshold: f64 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for segmentation operations
pub type SegmentResult<T> = Result<T, SegmentError>;
