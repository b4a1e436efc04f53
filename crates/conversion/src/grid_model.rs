//! Horizontal grid construction.

use odim_parser::NodePath;
use projection::{Area, ProjectedGrid, Projection};
use radar_common::GeoPoint;
use tracing::info;

use crate::enumerate::Layout;
use crate::error::{ConversionError, Result};
use crate::object::ObjectKind;
use crate::resolver::Resolver;

/// Build the output grid for the given object kind.
pub fn build_grid(
    resolver: &Resolver<'_>,
    layout: &Layout,
    datasets: usize,
    object: ObjectKind,
) -> Result<ProjectedGrid> {
    let grid = match object {
        ObjectKind::Comp | ObjectKind::Image | ObjectKind::Cvol => cartesian_grid(resolver)?,
        ObjectKind::Pvol => volume_grid(resolver, layout, datasets)?,
        ObjectKind::Scan
        | ObjectKind::Ray
        | ObjectKind::Azim
        | ObjectKind::Xsec
        | ObjectKind::Vp
        | ObjectKind::Pic => return Err(object.unsupported()),
    };

    let area = grid.area();
    info!(
        projection = %area.projection().to_projdef(),
        bottom_left = %area.bottom_left(),
        top_right = %area.top_right(),
        nx = grid.nx(),
        ny = grid.ny(),
        "Built grid"
    );

    Ok(grid)
}

/// Grid of a cartesian product, described by `/where`.
///
/// Corners are given either as `LL_*`/`UR_*` or as `UL_*`/`LR_*`.
fn cartesian_grid(resolver: &Resolver<'_>) -> Result<ProjectedGrid> {
    let where_ = NodePath::parse("/where");

    let projdef = resolver.read_string(&where_, "projdef")?;
    let xsize = grid_size(resolver, &where_, "xsize")?;
    let ysize = grid_size(resolver, &where_, "ysize")?;

    let projection = Projection::from_projdef(&projdef)?;
    let point = |lon: &str, lat: &str| -> Result<GeoPoint> {
        Ok(GeoPoint::new(
            resolver.read_f64(&where_, lon)?,
            resolver.read_f64(&where_, lat)?,
        ))
    };

    let area = if resolver.has_attribute(&where_, "LL_lon")? {
        Area::from_corners(projection, point("LL_lon", "LL_lat")?, point("UR_lon", "UR_lat")?)?
    } else {
        Area::from_alternate_corners(
            projection,
            point("UL_lon", "UL_lat")?,
            point("LR_lon", "LR_lat")?,
        )?
    };

    Ok(ProjectedGrid::new(area, xsize, ysize)?)
}

fn grid_size(resolver: &Resolver<'_>, path: &NodePath, name: &str) -> Result<usize> {
    let n = resolver.read_i64(path, name)?;
    usize::try_from(n)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| ConversionError::schema(format!("{}.{} must be positive, got {}", path, name, n)))
}

/// Square azimuthal equidistant grid centred on the radar.
///
/// The half-width is the longest ground range of any sweep rounded up to
/// whole kilometres; the grid has twice the largest bin count per side.
fn volume_grid(resolver: &Resolver<'_>, layout: &Layout, datasets: usize) -> Result<ProjectedGrid> {
    let where_ = NodePath::parse("/where");
    let lon = resolver.read_f64(&where_, "lon")?;
    let lat = resolver.read_f64(&where_, "lat")?;

    let range_km = (volume_range(resolver, layout, datasets)? / 1000.0).ceil();
    let nbins = volume_nbins(resolver, layout, datasets)?;
    let size = 2 * nbins;

    let area = Area::centered(Projection::equidistant(lon, lat), 1000.0 * range_km)?;
    Ok(ProjectedGrid::new(area, size, size)?)
}

/// Longest ground range in metres over all sweeps.
pub fn volume_range(resolver: &Resolver<'_>, layout: &Layout, datasets: usize) -> Result<f64> {
    let mut max_range = -1.0_f64;
    for i in 1..=datasets {
        let where_ = layout.dataset(i).join("where");
        let elangle = resolver.read_f64(&where_, "elangle")?;
        let nbins = resolver.read_f64(&where_, "nbins")?;
        let rstart = resolver.read_f64(&where_, "rstart")?;
        let rscale = resolver.read_f64(&where_, "rscale")?;

        let range = 1000.0 * rstart + nbins * rscale * elangle.to_radians().cos();
        max_range = max_range.max(range);
    }
    Ok(max_range)
}

/// Largest bin count over all sweeps.
pub fn volume_nbins(resolver: &Resolver<'_>, layout: &Layout, datasets: usize) -> Result<usize> {
    let mut max_nbins = 0;
    for i in 1..=datasets {
        let where_ = layout.dataset(i).join("where");
        max_nbins = max_nbins.max(grid_size(resolver, &where_, "nbins")?);
    }
    Ok(max_nbins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use odim_parser::MemoryFile;

    const STERE: &str = "+proj=stere +lat_0=90 +lon_0=25 +lat_ts=60 +a=6371288";

    fn composite() -> MemoryFile {
        MemoryFile::new()
            .with_attribute("/where", "projdef", STERE)
            .with_attribute("/where", "xsize", 76)
            .with_attribute("/where", "ysize", 120)
            .with_attribute("/where", "LL_lon", 18.6)
            .with_attribute("/where", "LL_lat", 57.93)
            .with_attribute("/where", "UR_lon", 34.903)
            .with_attribute("/where", "UR_lat", 69.005)
    }

    fn build(f: &MemoryFile, n: usize, object: ObjectKind) -> Result<ProjectedGrid> {
        build_grid(&Resolver::new(f), &Layout::new("dataset"), n, object)
    }

    #[test]
    fn test_direct_corners() {
        let grid = build(&composite(), 1, ObjectKind::Comp).unwrap();
        assert_eq!(grid.nx(), 76);
        assert_eq!(grid.ny(), 120);
        assert!((grid.area().bottom_left().lon - 18.6).abs() < 1e-9);
        assert!((grid.area().top_right().lat - 69.005).abs() < 1e-9);
    }

    #[test]
    fn test_alternate_corners_match_direct() {
        let direct = build(&composite(), 1, ObjectKind::Comp).unwrap();

        // Express the same rectangle through its upper-left and lower-right corners
        let projection = Projection::from_projdef(STERE).unwrap();
        let world = direct.area().world();
        let (ul_lon, ul_lat) = projection.unproject(world.min_x, world.max_y);
        let (lr_lon, lr_lat) = projection.unproject(world.max_x, world.min_y);

        let mut f = composite();
        for name in ["LL_lon", "LL_lat", "UR_lon", "UR_lat"] {
            f.remove_attribute("/where", name);
        }
        let f = f
            .with_attribute("/where", "UL_lon", ul_lon)
            .with_attribute("/where", "UL_lat", ul_lat)
            .with_attribute("/where", "LR_lon", lr_lon)
            .with_attribute("/where", "LR_lat", lr_lat);

        let alternate = build(&f, 1, ObjectKind::Image).unwrap();
        assert!(alternate.area().approx_eq(direct.area(), 1e-3));
        assert_eq!(alternate.nx(), direct.nx());
    }

    #[test]
    fn test_bad_sizes() {
        let f = composite().with_attribute("/where", "xsize", 0);
        assert!(matches!(
            build(&f, 1, ObjectKind::Cvol),
            Err(ConversionError::Schema(_))
        ));
    }

    #[test]
    fn test_volume_grid() {
        let f = MemoryFile::new()
            .with_attribute("/where", "lon", 24.87)
            .with_attribute("/where", "lat", 60.13)
            .with_attribute("/dataset1/where", "elangle", 0.5)
            .with_attribute("/dataset1/where", "nbins", 500)
            .with_attribute("/dataset1/where", "rstart", 0.0)
            .with_attribute("/dataset1/where", "rscale", 500.0)
            .with_attribute("/dataset2/where", "elangle", 60.0)
            .with_attribute("/dataset2/where", "nbins", 600)
            .with_attribute("/dataset2/where", "rstart", 0.0)
            .with_attribute("/dataset2/where", "rscale", 500.0);

        let layout = Layout::new("dataset");
        let r = Resolver::new(&f);

        // 500 * 500 * cos(0.5 deg) = 249990.48; 600 * 500 * cos(60 deg) = 150000
        let range = volume_range(&r, &layout, 2).unwrap();
        assert!((range - 249_990.48).abs() < 0.01);
        assert_eq!(volume_nbins(&r, &layout, 2).unwrap(), 600);

        let grid = build(&f, 2, ObjectKind::Pvol).unwrap();
        assert_eq!(grid.nx(), 1200);
        assert_eq!(grid.ny(), 1200);
        let world = grid.area().world();
        assert!((world.max_x - 250_000.0).abs() < 1e-6);
        assert!((world.min_y + 250_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_unsupported_objects() {
        let f = composite();
        assert!(matches!(
            build(&f, 1, ObjectKind::Scan),
            Err(ConversionError::UnsupportedObject(_))
        ));
        assert!(matches!(
            build(&f, 1, ObjectKind::Vp),
            Err(ConversionError::UnsupportedObject(_))
        ));
    }
}
