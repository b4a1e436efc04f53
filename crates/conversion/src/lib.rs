//! OPERA ODIM_H5 radar data conversion.
//!
//! Converts an ODIM file (composite, cartesian image or volume, or polar
//! volume) into a dense 4-D [`Artifact`] addressed by time, parameter,
//! level and grid location.
//!
//! # Architecture
//!
//! ```text
//! OdimSource ─► validate ─► enumerate ─┬─► time axis ──────┐
//!                                      ├─► parameter axis ─┤
//!                                      ├─► level axis ─────┼─► allocate ─► copy / polar ─► reproject
//!                                      └─► grid ───────────┘
//! ```
//!
//! - [`resolver`]: typed attribute lookup with `what`/`where`/`how` fallback
//! - [`copy`]: cartesian payloads, flipped north-up to south-up
//! - [`polar`]: nearest-cell resampling of polar volume sweeps
//! - [`reproject`]: optional move onto a user supplied grid

pub mod artifact;
pub mod config;
pub mod converter;
pub mod copy;
pub mod enumerate;
pub mod error;
pub mod grid_model;
pub mod inspect;
pub mod level_model;
pub mod object;
pub mod param_model;
pub mod polar;
pub mod reproject;
pub mod resolver;
pub mod time_model;
pub mod validate;
pub mod writer;

// Re-exports
pub use artifact::{Artifact, ArtifactDescriptor, ArtifactDocument};
pub use config::ConversionOptions;
pub use converter::Converter;
pub use copy::ValueTransform;
pub use enumerate::{Enumerator, Layout};
pub use error::{ConversionError, Result};
pub use level_model::LevelAxis;
pub use object::{ObjectKind, ProductKind};
pub use param_model::{ParamAxis, ParamEntry};
pub use resolver::Resolver;
pub use time_model::TimeAxis;
pub use writer::write_artifact;
