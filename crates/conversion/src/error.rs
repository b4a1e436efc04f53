//! Error types for the conversion crate.

use chrono::{DateTime, Utc};
use odim_parser::{NodePath, OdimError};
use projection::ProjectionError;
use radar_common::TimeParseError;
use thiserror::Error;

/// Errors that can occur while converting an ODIM file.
///
/// Every variant is fatal for the file being converted.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Input does not look like OPERA ODIM_H5 data: {0}")]
    Schema(String),

    #[error("Attribute '{name}' not found in group '{group}' (searched from {path})")]
    AttributeNotFound {
        path: NodePath,
        group: String,
        name: String,
    },

    #[error("Attribute '{path}/{name}' is stored as {actual}, expected {expected}")]
    TypeMismatch {
        path: NodePath,
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("This program cannot handle {0}")]
    UnsupportedObject(String),

    #[error("Unknown product '{0}': not listed in the OPERA ODIM specification")]
    UnsupportedProduct(String),

    #[error("Unable to handle parameters of type {product} with quantity {quantity}{detail}")]
    UnsupportedParameter {
        product: String,
        quantity: String,
        detail: String,
    },

    #[error("Inconsistent level structure: {0}")]
    InconsistentLevelModel(String),

    #[error("Could not allocate {cells} cells for the output artifact")]
    AllocationFailure { cells: usize },

    #[error("Internal error when projecting volume data to cartesian coordinates: {0}")]
    InternalProjection(String),

    #[error("Invalid time in {path}: {source}")]
    InvalidTime {
        path: NodePath,
        #[source]
        source: TimeParseError,
    },

    #[error("Valid time {time} of {path} is not on the time axis")]
    TimeNotOnAxis { path: NodePath, time: DateTime<Utc> },

    #[error("Artifact of shape {shape:?} needs {expected} values, got {actual}")]
    ValueCountMismatch {
        shape: [usize; 4],
        expected: usize,
        actual: usize,
    },

    #[error("Payload {path} has {actual} values, expected {expected}")]
    ShapeMismatch {
        path: NodePath,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to read source: {0}")]
    Source(#[from] OdimError),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Resampling failed: {0}")]
    Resample(#[from] grid_processor::GridProcessorError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ConversionError {
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn unsupported_object(msg: impl Into<String>) -> Self {
        Self::UnsupportedObject(msg.into())
    }

    pub fn unsupported_parameter(product: &str, quantity: &str) -> Self {
        Self::UnsupportedParameter {
            product: product.to_string(),
            quantity: quantity.to_string(),
            detail: String::new(),
        }
    }

    pub fn inconsistent_levels(msg: impl Into<String>) -> Self {
        Self::InconsistentLevelModel(msg.into())
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;
