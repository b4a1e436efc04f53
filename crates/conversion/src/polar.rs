//! Polar volume resampling.
//!
//! Each sweep of a polar volume is a `nrays` × `nbins` array of samples
//! along rays starting at north and turning clockwise. Every sample is
//! placed at its ground position on the radar-centred grid and written to
//! the nearest grid point; later samples overwrite earlier ones and grid
//! points no sample reaches stay missing.

use odim_parser::NodePath;
use radar_common::GeoPoint;
use tracing::debug;

use crate::artifact::Artifact;
use crate::copy::{param_index, ValueTransform};
use crate::enumerate::{Enumerator, Layout};
use crate::error::{ConversionError, Result};
use crate::param_model::unit_parameter;
use crate::resolver::Resolver;

/// Geometry of one sweep, from `/{dataset}/where`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Elevation angle in degrees
    pub elangle: f64,
    pub nbins: usize,
    pub nrays: usize,
    /// Bin length in metres
    pub rscale: f64,
    /// Range of the start of the first bin in kilometres
    pub rstart: f64,
}

impl Sweep {
    pub fn read(resolver: &Resolver<'_>, dataset: &NodePath) -> Result<Self> {
        let where_ = dataset.join("where");
        Ok(Self {
            elangle: resolver.read_f64(&where_, "elangle")?,
            nbins: read_count(resolver, &where_, "nbins")?,
            nrays: read_count(resolver, &where_, "nrays")?,
            rscale: resolver.read_f64(&where_, "rscale")?,
            rstart: resolver.read_f64(&where_, "rstart")?,
        })
    }

    /// Azimuth of the centre of `ray` in degrees clockwise from north.
    pub fn azimuth(&self, ray: usize) -> f64 {
        360.0 * (ray as f64 + 0.5) / self.nrays as f64
    }

    /// Ground range in metres of the centre of `bin`.
    pub fn ground_range(&self, bin: usize) -> f64 {
        (1000.0 * self.rstart + (bin as f64 + 0.5) * self.rscale) * self.elangle.to_radians().cos()
    }
}

/// Offset `(dx, dy)` of a point `range` metres away at `azimuth` degrees.
/// Azimuth 0 points to +y (north) and 90 to +x (east).
pub fn polar_offset(range: f64, azimuth: f64) -> (f64, f64) {
    let (sin, cos) = azimuth.to_radians().sin_cos();
    (range * sin, range * cos)
}

fn read_count(resolver: &Resolver<'_>, path: &NodePath, name: &str) -> Result<usize> {
    let n = resolver.read_i64(path, name)?;
    usize::try_from(n).map_err(|_| ConversionError::schema(format!("{}.{} must not be negative, got {}", path, name, n)))
}

/// Resample every sweep of a polar volume into the artifact.
///
/// All sweeps are written at time index 0, the nominal time of the volume,
/// and at the level matching their elevation angle.
pub fn resample_volume(
    resolver: &Resolver<'_>,
    layout: &Layout,
    datasets: usize,
    artifact: &mut Artifact,
) -> Result<()> {
    let enumerator = Enumerator::new(resolver.source(), layout);
    let where_ = NodePath::parse("/where");
    let radar = GeoPoint::new(resolver.read_f64(&where_, "lon")?, resolver.read_f64(&where_, "lat")?);

    let grid = artifact.descriptor().grid.clone();
    let (cx, cy) = grid.area().latlon_to_world(radar)?;

    for i in 1..=datasets {
        let sweep = Sweep::read(resolver, &layout.dataset(i))?;
        let level = artifact
            .descriptor()
            .levels
            .index_of(sweep.elangle)
            .ok_or_else(|| {
                ConversionError::inconsistent_levels(format!(
                    "elevation angle {} of {} is not on the level axis",
                    sweep.elangle,
                    layout.dataset(i)
                ))
            })?;

        // Sample positions are shared by all quantities of the sweep
        let mut locations = Vec::new();
        locations
            .try_reserve_exact(sweep.nrays * sweep.nbins)
            .map_err(|_| ConversionError::AllocationFailure {
                cells: sweep.nrays * sweep.nbins,
            })?;
        for ray in 0..sweep.nrays {
            let azimuth = sweep.azimuth(ray);
            for bin in 0..sweep.nbins {
                let (dx, dy) = polar_offset(sweep.ground_range(bin), azimuth);
                let point = grid.area().world_to_latlon(cx + dx, cy + dy);
                let location = grid.nearest_index(point).ok_or_else(|| {
                    ConversionError::InternalProjection(format!(
                        "ray {} bin {} of {} maps to {} outside the grid",
                        ray,
                        bin,
                        layout.dataset(i),
                        point
                    ))
                })?;
                locations.push(location);
            }
        }

        for unit in enumerator.units(i)? {
            let up = unit_parameter(resolver, &unit)?;
            let param = param_index(artifact, &unit, &up)?;
            let transform = ValueTransform::read(resolver, &unit)?;

            let payload = Layout::payload(&unit);
            debug!(
                path = %payload,
                elangle = sweep.elangle,
                nrays = sweep.nrays,
                nbins = sweep.nbins,
                "Resampling sweep"
            );
            let values = resolver.source().read_array(&payload)?;
            if values.len() != locations.len() {
                return Err(ConversionError::ShapeMismatch {
                    path: payload,
                    expected: locations.len(),
                    actual: values.len(),
                });
            }

            let slice = artifact.slice_mut(0, param, level);
            for (&location, &raw) in locations.iter().zip(&values) {
                slice[location] = transform.apply(raw);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep(nrays: usize) -> Sweep {
        Sweep {
            elangle: 0.0,
            nbins: 10,
            nrays,
            rscale: 1000.0,
            rstart: 0.0,
        }
    }

    #[test]
    fn test_azimuth_is_ray_centre() {
        let s = sweep(4);
        assert_eq!(s.azimuth(0), 45.0);
        assert_eq!(s.azimuth(3), 315.0);
        assert_eq!(sweep(360).azimuth(0), 0.5);
    }

    #[test]
    fn test_azimuth_zero_points_north() {
        let (dx, dy) = polar_offset(1000.0, 0.0);
        assert!(dx.abs() < 1e-9);
        assert!((dy - 1000.0).abs() < 1e-9);

        let (dx, dy) = polar_offset(1000.0, 90.0);
        assert!((dx - 1000.0).abs() < 1e-9);
        assert!(dy.abs() < 1e-9);
    }

    #[test]
    fn test_ground_range() {
        let mut s = sweep(4);
        assert_eq!(s.ground_range(0), 500.0);

        s.rstart = 2.0;
        s.elangle = 60.0;
        assert!((s.ground_range(1) - 1750.0).abs() < 1e-9);
    }
}
