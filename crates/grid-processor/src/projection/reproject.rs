//! Reprojection of grids between projected coordinate systems.

use projection::ProjectedGrid;
use tracing::debug;

use super::interpolation::interpolate;
use crate::error::{GridProcessorError, Result};
use crate::types::InterpolationMethod;

/// Resample one grid slice onto another grid.
///
/// Both slices are row-major from the south-west corner, i.e. value
/// `(i, j)` lives at `j * nx + i`, matching [`ProjectedGrid::location_index`].
///
/// For every destination point the geographic location is mapped into the
/// source grid and the value is interpolated there. Points that fall
/// outside the source grid, or that the source projection cannot represent,
/// are set to NaN.
///
/// # Example
/// ```
/// use grid_processor::{resample_between_grids, InterpolationMethod};
/// use projection::{Area, ProjectedGrid, Projection};
/// use radar_common::BoundingBox;
///
/// let area = Area::from_world(Projection::latlon(), BoundingBox::new(0.0, 0.0, 1.0, 1.0)).unwrap();
/// let src = ProjectedGrid::new(area.clone(), 2, 2).unwrap();
/// let dst = ProjectedGrid::new(area, 3, 3).unwrap();
///
/// let data = vec![1.0, 2.0, 3.0, 4.0];
/// let out = resample_between_grids(&data, &src, &dst, InterpolationMethod::Bilinear).unwrap();
/// assert_eq!(out.len(), 9);
/// assert!((out[4] - 2.5).abs() < 1e-6);
/// ```
pub fn resample_between_grids(
    data: &[f32],
    src: &ProjectedGrid,
    dst: &ProjectedGrid,
    method: InterpolationMethod,
) -> Result<Vec<f32>> {
    if data.len() != src.len() {
        return Err(GridProcessorError::shape_mismatch(
            data.len(),
            src.nx(),
            src.ny(),
        ));
    }

    let mut output = Vec::new();
    output
        .try_reserve_exact(dst.len())
        .map_err(|e| GridProcessorError::interpolation(e.to_string()))?;

    let mut outside = 0usize;
    for j in 0..dst.ny() {
        for i in 0..dst.nx() {
            let point = dst.latlon(i, j);
            let value = match src.latlon_to_grid(point) {
                Ok((x, y)) => interpolate(method, data, src.nx(), src.ny(), x, y),
                Err(_) => f32::NAN,
            };
            if value.is_nan() {
                outside += 1;
            }
            output.push(value);
        }
    }

    debug!(
        src_nx = src.nx(),
        src_ny = src.ny(),
        dst_nx = dst.nx(),
        dst_ny = dst.ny(),
        method = %method,
        missing = outside,
        "Resampled grid"
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use projection::{Area, Projection};
    use radar_common::{BoundingBox, GeoPoint};

    fn latlon_grid(bbox: BoundingBox, nx: usize, ny: usize) -> ProjectedGrid {
        let area = Area::from_world(Projection::latlon(), bbox).unwrap();
        ProjectedGrid::new(area, nx, ny).unwrap()
    }

    #[test]
    fn test_identity_resample() {
        let grid = latlon_grid(BoundingBox::new(0.0, 50.0, 2.0, 52.0), 3, 3);
        let data: Vec<f32> = (0..9).map(|v| v as f32).collect();

        let out = resample_between_grids(&data, &grid, &grid, InterpolationMethod::Nearest)
            .unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_points_outside_source_are_missing() {
        let src = latlon_grid(BoundingBox::new(0.0, 50.0, 2.0, 52.0), 3, 3);
        let dst = latlon_grid(BoundingBox::new(1.0, 51.0, 5.0, 55.0), 5, 5);
        let data = vec![1.0f32; 9];

        let out = resample_between_grids(&data, &src, &dst, InterpolationMethod::Bilinear)
            .unwrap();
        assert_eq!(out[0], 1.0);
        assert!(out[24].is_nan());
    }

    #[test]
    fn test_shape_mismatch() {
        let grid = latlon_grid(BoundingBox::new(0.0, 50.0, 2.0, 52.0), 3, 3);
        let result = resample_between_grids(&[1.0; 4], &grid, &grid, InterpolationMethod::Nearest);
        assert!(matches!(
            result,
            Err(GridProcessorError::ShapeMismatch { expected: 9, actual: 4, .. })
        ));
    }

    #[test]
    fn test_stereographic_to_latlon() {
        let stere = Projection::from_projdef("+proj=stere +lat_0=90 +lon_0=25 +lat_ts=60").unwrap();
        let area = Area::from_corners(stere, GeoPoint::new(15.0, 58.0), GeoPoint::new(35.0, 66.0))
            .unwrap();
        let src = ProjectedGrid::new(area, 20, 20).unwrap();
        let data = vec![7.0f32; src.len()];

        let dst = latlon_grid(BoundingBox::new(22.0, 61.0, 28.0, 63.0), 4, 4);
        let out = resample_between_grids(&data, &src, &dst, InterpolationMethod::Bilinear)
            .unwrap();
        assert!(out.iter().all(|v| (*v - 7.0).abs() < 1e-6));
    }
}
