//! Error types for grid processing.

use thiserror::Error;

/// Errors that can occur during grid processing.
#[derive(Error, Debug)]
pub enum GridProcessorError {
    /// The data slice does not match the declared grid shape.
    #[error("grid data has {actual} values, expected {expected} ({width}x{height})")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        width: usize,
        height: usize,
    },

    /// Projection error.
    #[error("projection error: {0}")]
    ProjectionError(String),

    /// Interpolation error.
    #[error("interpolation error: {0}")]
    InterpolationError(String),
}

impl GridProcessorError {
    /// Create a ShapeMismatch error for a `width` × `height` grid.
    pub fn shape_mismatch(actual: usize, width: usize, height: usize) -> Self {
        Self::ShapeMismatch {
            expected: width * height,
            actual,
            width,
            height,
        }
    }

    /// Create an InterpolationError.
    pub fn interpolation(msg: impl Into<String>) -> Self {
        Self::InterpolationError(msg.into())
    }
}

impl From<projection::ProjectionError> for GridProcessorError {
    fn from(err: projection::ProjectionError) -> Self {
        Self::ProjectionError(err.to_string())
    }
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
