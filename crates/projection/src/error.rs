//! Error types for projection operations.

use thiserror::Error;

pub type ProjectionResult<T> = Result<T, ProjectionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The projdef string could not be tokenized
    #[error("Invalid projection definition '{0}'")]
    InvalidProjdef(String),

    #[error("Unsupported projection '{0}'")]
    UnsupportedProjection(String),

    #[error("Invalid value for projection parameter +{param}: '{value}'")]
    InvalidParameter { param: String, value: String },

    /// The point has no image under the projection (antipode, pole in Mercator)
    #[error("Point ({lon}, {lat}) cannot be projected")]
    OutOfDomain { lon: f64, lat: f64 },

    #[error("Invalid area: {0}")]
    InvalidArea(String),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}
