//! Grid resampling for projected radar products.
//!
//! This crate provides the interpolation kernels and the grid-to-grid
//! resampler used when a finished artifact is moved onto a user requested
//! projection:
//!
//! ```text
//! destination grid point (i, j)
//!      │
//!      ├─► geographic coordinates (destination projection, inverse)
//!      │
//!      ├─► fractional source grid coordinates (source projection, forward)
//!      │
//!      └─► nearest / bilinear / cubic kernel over the source slice
//! ```

pub mod error;
pub mod projection;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{GridProcessorError, Result};
pub use projection::interpolation::interpolate;
pub use projection::{
    bilinear_interpolate, cubic_interpolate, nearest_interpolate, resample_between_grids,
};
pub use types::InterpolationMethod;
