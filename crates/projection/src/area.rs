//! Projected areas: a projection plus a world-coordinate rectangle.

use std::str::FromStr;

use radar_common::{BoundingBox, GeoPoint};

use crate::error::{ProjectionError, ProjectionResult};
use crate::transform::Projection;

/// A rectangle in the world coordinates of a projection.
///
/// The geographic corners are kept alongside the world rectangle so that the
/// area can be described without re-running the inverse projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    projection: Projection,
    bottom_left: GeoPoint,
    top_right: GeoPoint,
    world: BoundingBox,
}

impl Area {
    /// Area spanned by geographic bottom-left and top-right corners.
    pub fn from_corners(
        projection: Projection,
        bottom_left: GeoPoint,
        top_right: GeoPoint,
    ) -> ProjectionResult<Self> {
        let (x1, y1) = projection.project(bottom_left.lon, bottom_left.lat)?;
        let (x2, y2) = projection.project(top_right.lon, top_right.lat)?;

        if x2 <= x1 || y2 <= y1 {
            return Err(ProjectionError::InvalidArea(format!(
                "corners {} and {} do not span a rectangle in {} coordinates",
                bottom_left,
                top_right,
                projection.name()
            )));
        }

        Ok(Self {
            projection,
            bottom_left,
            top_right,
            world: BoundingBox::new(x1, y1, x2, y2),
        })
    }

    /// Area given by its upper-left and lower-right geographic corners.
    ///
    /// The corners are projected to world coordinates, recombined into the
    /// bottom-left `(UL.x, LR.y)` and top-right `(LR.x, UL.y)` world corners,
    /// and converted back to geographic coordinates.
    pub fn from_alternate_corners(
        projection: Projection,
        upper_left: GeoPoint,
        lower_right: GeoPoint,
    ) -> ProjectionResult<Self> {
        let (ul_x, ul_y) = projection.project(upper_left.lon, upper_left.lat)?;
        let (lr_x, lr_y) = projection.project(lower_right.lon, lower_right.lat)?;

        let (ll_lon, ll_lat) = projection.unproject(ul_x, lr_y);
        let (ur_lon, ur_lat) = projection.unproject(lr_x, ul_y);

        Self::from_corners(
            projection,
            GeoPoint::new(ll_lon, ll_lat),
            GeoPoint::new(ur_lon, ur_lat),
        )
    }

    /// Square area of half-width `radius` (world units) around the
    /// projection's world origin.
    pub fn centered(projection: Projection, radius: f64) -> ProjectionResult<Self> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(ProjectionError::InvalidArea(format!(
                "radius must be positive, got {}",
                radius
            )));
        }
        let cx = projection.false_easting;
        let cy = projection.false_northing;
        Self::from_world(
            projection,
            BoundingBox::new(cx - radius, cy - radius, cx + radius, cy + radius),
        )
    }

    /// Area from a world rectangle.
    pub fn from_world(projection: Projection, world: BoundingBox) -> ProjectionResult<Self> {
        if world.width().is_nan() || world.width() <= 0.0 || world.height() <= 0.0 {
            return Err(ProjectionError::InvalidArea(format!(
                "empty world rectangle {:?}",
                world
            )));
        }
        let (ll_lon, ll_lat) = projection.unproject(world.min_x, world.min_y);
        let (ur_lon, ur_lat) = projection.unproject(world.max_x, world.max_y);

        Ok(Self {
            projection,
            bottom_left: GeoPoint::new(ll_lon, ll_lat),
            top_right: GeoPoint::new(ur_lon, ur_lat),
            world,
        })
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn world(&self) -> &BoundingBox {
        &self.world
    }

    pub fn bottom_left(&self) -> GeoPoint {
        self.bottom_left
    }

    pub fn top_right(&self) -> GeoPoint {
        self.top_right
    }

    pub fn latlon_to_world(&self, point: GeoPoint) -> ProjectionResult<(f64, f64)> {
        self.projection.project(point.lon, point.lat)
    }

    pub fn world_to_latlon(&self, x: f64, y: f64) -> GeoPoint {
        let (lon, lat) = self.projection.unproject(x, y);
        GeoPoint::new(lon, lat)
    }

    /// Compare the world rectangles of two areas on the same projection.
    pub fn approx_eq(&self, other: &Area, tolerance: f64) -> bool {
        self.projection == other.projection && self.world.approx_eq(&other.world, tolerance)
    }
}

/// A user supplied target area, optionally with a grid size.
///
/// Syntax: `<projdef>:<LL_lon>,<LL_lat>,<UR_lon>,<UR_lat>[:<width>,<height>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSpec {
    pub area: Area,
    pub size: Option<(usize, usize)>,
}

impl FromStr for AreaSpec {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(ProjectionError::InvalidArea(format!(
                "expected '<projdef>:<LL_lon>,<LL_lat>,<UR_lon>,<UR_lat>[:<width>,<height>]', got '{}'",
                s
            )));
        }

        let projection = Projection::from_projdef(parts[0])?;

        let corners = BoundingBox::from_csv_string(parts[1])
            .map_err(|e| ProjectionError::InvalidArea(e.to_string()))?;
        let area = Area::from_corners(
            projection,
            GeoPoint::new(corners.min_x, corners.min_y),
            GeoPoint::new(corners.max_x, corners.max_y),
        )?;

        let size = match parts.get(2) {
            None => None,
            Some(dims) => Some(parse_size(dims)?),
        };

        Ok(Self { area, size })
    }
}

fn parse_size(s: &str) -> ProjectionResult<(usize, usize)> {
    let invalid = || ProjectionError::InvalidGrid(format!("invalid grid size '{}'", s));

    let (w, h) = s.split_once(',').ok_or_else(invalid)?;
    let w: usize = w.trim().parse().map_err(|_| invalid())?;
    let h: usize = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}
