//! Interpolation and reprojection between grids.

pub mod interpolation;
pub mod reproject;

pub use interpolation::{bilinear_interpolate, cubic_interpolate, nearest_interpolate};
pub use reproject::resample_between_grids;
