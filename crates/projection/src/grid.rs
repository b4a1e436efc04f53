//! Regular grids laid over a projected area.

use num_traits::ToPrimitive;
use radar_common::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::error::{ProjectionError, ProjectionResult};

/// A regular `nx` × `ny` grid of points over an [`Area`].
///
/// Grid points sit on the area corners: column 0 lies on the west edge and
/// column `nx - 1` on the east edge, row 0 on the south edge and row `ny - 1`
/// on the north edge. Locations are numbered row-major from the south-west
/// corner: `index = j * nx + i`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedGrid {
    area: Area,
    nx: usize,
    ny: usize,
}

/// Serializable summary of a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDescription {
    pub projection: String,
    pub bottom_left: GeoPoint,
    pub top_right: GeoPoint,
    pub nx: usize,
    pub ny: usize,
}

impl ProjectedGrid {
    pub fn new(area: Area, nx: usize, ny: usize) -> ProjectionResult<Self> {
        if nx == 0 || ny == 0 {
            return Err(ProjectionError::InvalidGrid(format!(
                "grid must have at least one point in each direction, got {}x{}",
                nx, ny
            )));
        }
        Ok(Self { area, nx, ny })
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spacing between columns in world units.
    pub fn dx(&self) -> f64 {
        step(self.area.world().width(), self.nx)
    }

    /// Spacing between rows in world units.
    pub fn dy(&self) -> f64 {
        step(self.area.world().height(), self.ny)
    }

    pub fn location_index(&self, i: usize, j: usize) -> usize {
        j * self.nx + i
    }

    /// World coordinates of grid point (i, j).
    pub fn world_xy(&self, i: usize, j: usize) -> (f64, f64) {
        let world = self.area.world();
        (
            world.min_x + i as f64 * self.dx(),
            world.min_y + j as f64 * self.dy(),
        )
    }

    /// Geographic coordinates of grid point (i, j).
    pub fn latlon(&self, i: usize, j: usize) -> GeoPoint {
        let (x, y) = self.world_xy(i, j);
        self.area.world_to_latlon(x, y)
    }

    /// Fractional grid coordinates of a world point.
    pub fn world_to_grid(&self, x: f64, y: f64) -> (f64, f64) {
        let world = self.area.world();
        let fi = fraction(x - world.min_x, self.dx());
        let fj = fraction(y - world.min_y, self.dy());
        (fi, fj)
    }

    /// Fractional grid coordinates of a geographic point.
    pub fn latlon_to_grid(&self, point: GeoPoint) -> ProjectionResult<(f64, f64)> {
        let (x, y) = self.area.latlon_to_world(point)?;
        Ok(self.world_to_grid(x, y))
    }

    /// Location index of the grid point nearest to a world point, or `None`
    /// when the point lies outside the grid.
    pub fn nearest_index_xy(&self, x: f64, y: f64) -> Option<usize> {
        let (fi, fj) = self.world_to_grid(x, y);
        let i = fi.round().to_usize()?;
        let j = fj.round().to_usize()?;
        if i >= self.nx || j >= self.ny {
            return None;
        }
        Some(self.location_index(i, j))
    }

    /// Location index of the grid point nearest to a geographic point.
    pub fn nearest_index(&self, point: GeoPoint) -> Option<usize> {
        let (x, y) = self.area.latlon_to_world(point).ok()?;
        self.nearest_index_xy(x, y)
    }

    pub fn describe(&self) -> GridDescription {
        GridDescription {
            projection: self.area.projection().to_projdef(),
            bottom_left: self.area.bottom_left(),
            top_right: self.area.top_right(),
            nx: self.nx,
            ny: self.ny,
        }
    }
}

fn step(extent: f64, n: usize) -> f64 {
    if n > 1 {
        extent / (n - 1) as f64
    } else {
        0.0
    }
}

fn fraction(offset: f64, step: f64) -> f64 {
    if step > 0.0 {
        offset / step
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Projection;
    use radar_common::BoundingBox;

    fn latlon_grid(nx: usize, ny: usize) -> ProjectedGrid {
        let area = Area::from_world(Projection::latlon(), BoundingBox::new(0.0, 50.0, 10.0, 60.0))
            .unwrap();
        ProjectedGrid::new(area, nx, ny).unwrap()
    }

    #[test]
    fn test_points_sit_on_corners() {
        let grid = latlon_grid(11, 6);
        assert_eq!(grid.world_xy(0, 0), (0.0, 50.0));
        assert_eq!(grid.world_xy(10, 5), (10.0, 60.0));
        assert_eq!(grid.dx(), 1.0);
        assert_eq!(grid.dy(), 2.0);
    }

    #[test]
    fn test_location_index_is_row_major_from_south() {
        let grid = latlon_grid(11, 6);
        assert_eq!(grid.location_index(0, 0), 0);
        assert_eq!(grid.location_index(10, 0), 10);
        assert_eq!(grid.location_index(0, 1), 11);
        assert_eq!(grid.len(), 66);
    }

    #[test]
    fn test_nearest_index() {
        let grid = latlon_grid(11, 6);
        assert_eq!(grid.nearest_index(GeoPoint::new(3.4, 50.9)), Some(3));
        assert_eq!(grid.nearest_index(GeoPoint::new(3.6, 51.1)), Some(11 + 4));
        assert_eq!(grid.nearest_index(GeoPoint::new(10.4, 60.0)), Some(65));
        assert_eq!(grid.nearest_index(GeoPoint::new(-1.0, 55.0)), None);
        assert_eq!(grid.nearest_index(GeoPoint::new(5.0, 61.5)), None);
    }

    #[test]
    fn test_empty_grid_rejected() {
        let area = Area::from_world(Projection::latlon(), BoundingBox::new(0.0, 0.0, 1.0, 1.0))
            .unwrap();
        assert!(ProjectedGrid::new(area, 0, 5).is_err());
    }

    #[test]
    fn test_describe() {
        let grid = latlon_grid(11, 6);
        let d = grid.describe();
        assert_eq!(d.projection, "+proj=longlat");
        assert_eq!((d.nx, d.ny), (11, 6));
        assert_eq!(d.bottom_left, GeoPoint::new(0.0, 50.0));
    }
}
