//! Error types for ODIM source access.

use thiserror::Error;

/// Result type for ODIM source operations.
pub type OdimResult<T> = Result<T, OdimError>;

/// Error types for reading ODIM sources.
#[derive(Error, Debug)]
pub enum OdimError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file could not be opened as an ODIM source
    #[error("Failed to open '{path}': {reason}")]
    OpenFailed { path: String, reason: String },

    /// A group that was addressed directly does not exist
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// Missing numeric array
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Malformed JSON dump
    #[error("Invalid JSON source: {0}")]
    Json(#[from] serde_json::Error),

    /// The file needs a backend that was not compiled in
    #[error("Reading '{0}' requires the native HDF5 backend (build with the `native` feature)")]
    BackendUnavailable(String),
}
