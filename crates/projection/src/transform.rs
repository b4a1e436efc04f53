//! Projection dispatch and construction from projdef strings.

use crate::equidistant::AzimuthalEquidistant;
use crate::error::{ProjectionError, ProjectionResult};
use crate::lambert::LambertConformal;
use crate::mercator::Mercator;
use crate::projdef::ProjDef;
use crate::stereographic::Stereographic;
use crate::DEFAULT_EARTH_RADIUS;

/// The supported map projection families.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionKind {
    /// Plain longitude/latitude, world coordinates in degrees
    LatLon,
    Stereographic(Stereographic),
    AzimuthalEquidistant(AzimuthalEquidistant),
    Mercator(Mercator),
    LambertConformal(LambertConformal),
}

/// A map projection with false easting/northing applied on top of the
/// projection family's world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub kind: ProjectionKind,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl Projection {
    pub fn new(kind: ProjectionKind) -> Self {
        Self {
            kind,
            false_easting: 0.0,
            false_northing: 0.0,
        }
    }

    pub fn latlon() -> Self {
        Self::new(ProjectionKind::LatLon)
    }

    /// Azimuthal equidistant projection centred on a point, as used for
    /// single radar volumes.
    pub fn equidistant(lon: f64, lat: f64) -> Self {
        Self::new(ProjectionKind::AzimuthalEquidistant(AzimuthalEquidistant::new(
            lon,
            lat,
            DEFAULT_EARTH_RADIUS,
        )))
    }

    /// Build a projection from a PROJ.4 style string.
    ///
    /// Spherical formulas are used throughout. The sphere radius comes from
    /// `+R`, else `+a`, else [`DEFAULT_EARTH_RADIUS`]. Ellipsoid names and
    /// datum shifts are accepted and ignored.
    pub fn from_projdef(s: &str) -> ProjectionResult<Self> {
        let def = ProjDef::parse(s)?;
        Self::from_def(&def)
    }

    pub fn from_def(def: &ProjDef) -> ProjectionResult<Self> {
        let radius = match def.get_f64("R")? {
            Some(r) => r,
            None => def.f64_or("a", DEFAULT_EARTH_RADIUS)?,
        };
        if radius <= 0.0 {
            return Err(ProjectionError::InvalidParameter {
                param: "R".to_string(),
                value: radius.to_string(),
            });
        }

        let lon0 = def.f64_or("lon_0", 0.0)?;
        let lat0 = def.f64_or("lat_0", 0.0)?;

        let kind = match def.proj_name()? {
            "stere" | "sterea" => {
                let k0 = match def.get_f64("k_0")? {
                    Some(k) => k,
                    None => def.f64_or("k", 1.0)?,
                };
                let polar = (lat0.abs() - 90.0).abs() < 1e-9;
                match def.get_f64("lat_ts")? {
                    Some(lat_ts) if polar => ProjectionKind::Stereographic(Stereographic::polar(
                        lon0,
                        lat0 > 0.0,
                        lat_ts,
                        radius,
                    )),
                    _ => ProjectionKind::Stereographic(Stereographic::new(lon0, lat0, k0, radius)),
                }
            }
            "aeqd" => {
                ProjectionKind::AzimuthalEquidistant(AzimuthalEquidistant::new(lon0, lat0, radius))
            }
            "merc" => match def.get_f64("lat_ts")? {
                Some(lat_ts) => {
                    ProjectionKind::Mercator(Mercator::with_true_scale(lon0, lat_ts, radius))
                }
                None => ProjectionKind::Mercator(Mercator::new(lon0, def.f64_or("k", 1.0)?, radius)),
            },
            "lcc" => {
                let lat1 = def.f64_or("lat_1", lat0)?;
                let lat2 = def.f64_or("lat_2", lat1)?;
                ProjectionKind::LambertConformal(LambertConformal::new(
                    lon0, lat0, lat1, lat2, radius,
                ))
            }
            "longlat" | "latlong" | "lonlat" | "latlon" => ProjectionKind::LatLon,
            other => return Err(ProjectionError::UnsupportedProjection(other.to_string())),
        };

        Ok(Self {
            kind,
            false_easting: def.f64_or("x_0", 0.0)?,
            false_northing: def.f64_or("y_0", 0.0)?,
        })
    }

    /// Project geographic degrees to world coordinates.
    pub fn project(&self, lon: f64, lat: f64) -> ProjectionResult<(f64, f64)> {
        let xy = match &self.kind {
            ProjectionKind::LatLon => Some((lon, lat)),
            ProjectionKind::Stereographic(p) => p.project(lon, lat),
            ProjectionKind::AzimuthalEquidistant(p) => p.project(lon, lat),
            ProjectionKind::Mercator(p) => p.project(lon, lat),
            ProjectionKind::LambertConformal(p) => p.project(lon, lat),
        };

        xy.map(|(x, y)| (x + self.false_easting, y + self.false_northing))
            .ok_or(ProjectionError::OutOfDomain { lon, lat })
    }

    /// World coordinates back to geographic degrees.
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let x = x - self.false_easting;
        let y = y - self.false_northing;
        match &self.kind {
            ProjectionKind::LatLon => (x, y),
            ProjectionKind::Stereographic(p) => p.unproject(x, y),
            ProjectionKind::AzimuthalEquidistant(p) => p.unproject(x, y),
            ProjectionKind::Mercator(p) => p.unproject(x, y),
            ProjectionKind::LambertConformal(p) => p.unproject(x, y),
        }
    }

    /// Canonical projdef string that rebuilds this projection.
    pub fn to_projdef(&self) -> String {
        let mut s = match &self.kind {
            ProjectionKind::LatLon => "+proj=longlat".to_string(),
            ProjectionKind::Stereographic(p) => format!(
                "+proj=stere +lat_0={} +lon_0={} +k_0={} +R={}",
                p.lat0.to_degrees(),
                p.lon0.to_degrees(),
                p.k0,
                p.radius
            ),
            ProjectionKind::AzimuthalEquidistant(p) => format!(
                "+proj=aeqd +lat_0={} +lon_0={} +R={}",
                p.lat0.to_degrees(),
                p.lon0.to_degrees(),
                p.radius
            ),
            ProjectionKind::Mercator(p) => format!(
                "+proj=merc +lon_0={} +k={} +R={}",
                p.lon0.to_degrees(),
                p.k0,
                p.radius
            ),
            ProjectionKind::LambertConformal(p) => format!(
                "+proj=lcc +lat_0={} +lon_0={} +lat_1={} +lat_2={} +R={}",
                p.lat0.to_degrees(),
                p.lon0.to_degrees(),
                p.latin1.to_degrees(),
                p.latin2.to_degrees(),
                p.earth_radius
            ),
        };
        if self.false_easting != 0.0 || self.false_northing != 0.0 {
            s.push_str(&format!(
                " +x_0={} +y_0={}",
                self.false_easting, self.false_northing
            ));
        }
        s
    }

    /// Short name of the projection family.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            ProjectionKind::LatLon => "latlon",
            ProjectionKind::Stereographic(_) => "stereographic",
            ProjectionKind::AzimuthalEquidistant(_) => "azimuthal-equidistant",
            ProjectionKind::Mercator(_) => "mercator",
            ProjectionKind::LambertConformal(_) => "lambert-conformal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_stereographic_from_projdef() {
        let p = Projection::from_projdef("+proj=stere +lat_0=90 +lon_0=25 +lat_ts=60 +ellps=intl")
            .unwrap();
        match &p.kind {
            ProjectionKind::Stereographic(s) => {
                let expected_k0 = (1.0 + 60f64.to_radians().sin()) / 2.0;
                assert!((s.k0 - expected_k0).abs() < 1e-12);
                assert_eq!(s.radius, DEFAULT_EARTH_RADIUS);
            }
            other => panic!("expected stereographic, got {:?}", other),
        }
    }

    #[test]
    fn test_radius_precedence() {
        let p = Projection::from_projdef("+proj=aeqd +a=6378137 +R=6370000").unwrap();
        match p.kind {
            ProjectionKind::AzimuthalEquidistant(a) => assert_eq!(a.radius, 6_370_000.0),
            other => panic!("unexpected {:?}", other),
        }

        let p = Projection::from_projdef("+proj=aeqd +a=6378137").unwrap();
        match p.kind {
            ProjectionKind::AzimuthalEquidistant(a) => assert_eq!(a.radius, 6_378_137.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_false_easting_roundtrip() {
        let p = Projection::from_projdef("+proj=lcc +lat_1=35 +lat_2=65 +lat_0=52 +lon_0=10 +x_0=4000000 +y_0=2800000")
            .unwrap();
        let (x, y) = p.project(10.0, 52.0).unwrap();
        assert!((x - 4_000_000.0).abs() < 1e-6);
        assert!((y - 2_800_000.0).abs() < 1e-6);

        let (lon, lat) = p.unproject(x + 50_000.0, y - 20_000.0);
        let (x2, y2) = p.project(lon, lat).unwrap();
        assert!((x2 - x - 50_000.0).abs() < 1e-4);
        assert!((y2 - y + 20_000.0).abs() < 1e-4);
    }

    #[test]
    fn test_to_projdef_rebuilds_projection() {
        let p = Projection::from_projdef("+proj=stere +lat_0=90 +lon_0=25 +lat_ts=60").unwrap();
        let rebuilt = Projection::from_projdef(&p.to_projdef()).unwrap();
        let a = p.project(20.0, 62.0).unwrap();
        let b = rebuilt.project(20.0, 62.0).unwrap();
        assert!((a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6);
    }

    #[test]
    fn test_latlon_is_identity() {
        let p = Projection::from_projdef("+proj=longlat +datum=WGS84").unwrap();
        assert_eq!(p.project(24.5, 60.25).unwrap(), (24.5, 60.25));
        assert_eq!(p.unproject(24.5, 60.25), (24.5, 60.25));
    }

    #[test]
    fn test_unsupported_projection() {
        assert_eq!(
            Projection::from_projdef("+proj=geos +h=35786023"),
            Err(ProjectionError::UnsupportedProjection("geos".to_string()))
        );
    }

    #[test]
    fn test_out_of_domain() {
        let p = Projection::from_projdef("+proj=merc").unwrap();
        assert!(matches!(
            p.project(0.0, 90.0),
            Err(ProjectionError::OutOfDomain { .. })
        ));
    }
}
