//! Coordinate reference system transformations.
//!
//! Implements the spherical map projections used by radar composites from
//! scratch, without external dependencies: stereographic, azimuthal
//! equidistant, Mercator, Lambert conformal conic and plain lat/lon.
//!
//! A [`Projection`] is built from a PROJ.4 style `projdef` string, an
//! [`Area`] binds a projection to a rectangle of world coordinates, and a
//! [`ProjectedGrid`] lays a regular grid of points over an area.

pub mod area;
pub mod equidistant;
pub mod error;
pub mod grid;
pub mod lambert;
pub mod mercator;
pub mod projdef;
pub mod stereographic;
pub mod transform;

pub use area::{Area, AreaSpec};
pub use equidistant::AzimuthalEquidistant;
pub use error::{ProjectionError, ProjectionResult};
pub use grid::{GridDescription, ProjectedGrid};
pub use lambert::LambertConformal;
pub use mercator::Mercator;
pub use projdef::ProjDef;
pub use stereographic::Stereographic;
pub use transform::{Projection, ProjectionKind};

/// Earth radius used when the projdef does not specify one (meters).
pub const DEFAULT_EARTH_RADIUS: f64 = 6_371_220.0;

/// Normalize a longitude difference (radians) to [-π, π].
pub(crate) fn normalize_dlon(mut dlon: f64) -> f64 {
    use std::f64::consts::PI;
    while dlon > PI {
        dlon -= 2.0 * PI;
    }
    while dlon < -PI {
        dlon += 2.0 * PI;
    }
    dlon
}
