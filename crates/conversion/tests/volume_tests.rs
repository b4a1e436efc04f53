//! End-to-end conversion of polar volumes.

use conversion::{Artifact, ConversionError, ConversionOptions, Converter};
use radar_common::{CanonicalParameter, GeoPoint, LevelKind};
use test_utils::{radar, scaling, OdimFileBuilder};

const NRAYS: usize = 4;
const NBINS: usize = 10;
const RSCALE: f64 = 1000.0;

fn vantaa_volume() -> OdimFileBuilder {
    let (lon, lat, _) = radar::VANTAA;
    OdimFileBuilder::volume(lon, lat)
        .sweep(0.5, NRAYS, NBINS, RSCALE, &["DBZH"])
        .sweep(1.5, NRAYS, NBINS, RSCALE, &["DBZH", "TH"])
}

fn convert(builder: OdimFileBuilder) -> conversion::Result<Artifact> {
    Converter::new(ConversionOptions::default()).convert(&builder.build())
}

/// Location index nearest to a point `range` metres from the radar.
fn location_at(artifact: &Artifact, range: f64, azimuth: f64) -> usize {
    let (lon, lat, _) = radar::VANTAA;
    let grid = &artifact.descriptor().grid;
    let (cx, cy) = grid.area().latlon_to_world(GeoPoint::new(lon, lat)).unwrap();
    let az = azimuth.to_radians();
    grid.nearest_index_xy(cx + range * az.sin(), cy + range * az.cos())
        .unwrap()
}

#[test]
fn test_volume_axes() {
    let artifact = convert(vantaa_volume()).unwrap();
    let d = artifact.descriptor();

    // Two sweeps of 10 km: 20 x 20 grid with a 10 km half-width
    assert_eq!(d.grid.nx(), 2 * NBINS);
    assert_eq!(d.grid.ny(), 2 * NBINS);
    let world = d.grid.area().world();
    assert!((world.width() - 20_000.0).abs() < 1e-6);

    let levels: Vec<_> = d.levels.levels.iter().map(|l| l.value).collect();
    assert_eq!(levels, vec![0.5, 1.5]);
    assert!(d.levels.levels.iter().all(|l| l.kind == LevelKind::NoLevel));
    assert_eq!(d.levels.levels[1].name, "Elevation angle 1.5");

    let params: Vec<_> = d.params.params.iter().map(|p| p.parameter).collect();
    assert_eq!(
        params,
        vec![
            CanonicalParameter::Reflectivity,
            CanonicalParameter::CorrectedReflectivity
        ]
    );

    assert_eq!(artifact.shape(), [2, 2, 2, 400]);
}

#[test]
fn test_sweeps_written_at_first_time() {
    let artifact = convert(vantaa_volume()).unwrap();

    assert!(artifact.slice(0, 1, 0).iter().any(|v| !Artifact::is_missing(*v)));
    assert!(artifact.slice(0, 1, 1).iter().any(|v| !Artifact::is_missing(*v)));
    assert!(artifact.slice(0, 0, 1).iter().any(|v| !Artifact::is_missing(*v)));
    for p in 0..2 {
        for l in 0..2 {
            assert!(artifact.slice(1, p, l).iter().all(|v| Artifact::is_missing(*v)));
        }
    }

    // TH only exists in the 1.5 degree sweep
    assert!(artifact.slice(0, 0, 0).iter().all(|v| Artifact::is_missing(*v)));
}

#[test]
fn test_rays_land_in_their_quadrant() {
    let artifact = convert(vantaa_volume()).unwrap();
    let dbzh = 1;

    // Ray r carries raw value r + 1 and points at 45 + 90 r degrees
    for ray in 0..NRAYS {
        let azimuth = 45.0 + 90.0 * ray as f64;
        let location = location_at(&artifact, 5_500.0, azimuth);
        let expected = scaling::physical((ray + 1) as f64);
        assert_eq!(artifact.get(0, dbzh, 0, location), Some(expected));
        assert_eq!(artifact.get(0, dbzh, 1, location), Some(expected));
    }

    // Due north is between rays and stays empty
    let north = location_at(&artifact, 9_000.0, 0.0);
    assert!(Artifact::is_missing(artifact.get(0, dbzh, 0, north).unwrap()));
}

#[test]
fn test_missing_elevation_rejected() {
    let builder = vantaa_volume().without_attribute("/dataset2/where", "elangle");

    let err = convert(builder).unwrap_err();
    assert!(matches!(err, ConversionError::AttributeNotFound { .. }));
}

#[test]
fn test_sweep_shape_mismatch() {
    let builder = vantaa_volume().with_payload("/dataset1/data1", vec![1.0; NRAYS]);

    let err = convert(builder).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::ShapeMismatch { expected, actual, .. }
            if expected == NRAYS * NBINS && actual == NRAYS
    ));
}
