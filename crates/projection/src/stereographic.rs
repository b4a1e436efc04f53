//! Stereographic projection on a sphere.
//!
//! The usual projection of Nordic radar composites. Handles both the polar
//! aspect (`lat_0 = ±90`, scale set through `lat_ts`) and the general
//! oblique aspect.
//!
//! Reference: Snyder, Map Projections - A Working Manual, §21.

use std::f64::consts::FRAC_PI_2;

use crate::normalize_dlon;

/// Stereographic projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Stereographic {
    /// Central meridian in radians
    pub lon0: f64,
    /// Latitude of the projection centre in radians
    pub lat0: f64,
    /// Scale factor at the projection centre
    pub k0: f64,
    /// Sphere radius (meters)
    pub radius: f64,
}

impl Stereographic {
    pub fn new(lon0_deg: f64, lat0_deg: f64, k0: f64, radius: f64) -> Self {
        Self {
            lon0: lon0_deg.to_radians(),
            lat0: lat0_deg.to_radians(),
            k0,
            radius,
        }
    }

    /// Polar stereographic with true scale at `lat_ts_deg`.
    pub fn polar(lon0_deg: f64, north: bool, lat_ts_deg: f64, radius: f64) -> Self {
        let k0 = (1.0 + lat_ts_deg.to_radians().abs().sin()) / 2.0;
        let lat0 = if north { 90.0 } else { -90.0 };
        Self::new(lon0_deg, lat0, k0, radius)
    }

    /// Project geographic degrees to world meters.
    ///
    /// Returns `None` for the antipode of the projection centre.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        let lat = lat_deg.to_radians();
        let dlon = normalize_dlon(lon_deg.to_radians() - self.lon0);

        let denom = 1.0 + self.lat0.sin() * lat.sin() + self.lat0.cos() * lat.cos() * dlon.cos();
        if denom <= 1e-12 {
            return None;
        }

        let k = 2.0 * self.k0 / denom;
        let x = self.radius * k * lat.cos() * dlon.sin();
        let y = self.radius
            * k
            * (self.lat0.cos() * lat.sin() - self.lat0.sin() * lat.cos() * dlon.cos());

        Some((x, y))
    }

    /// Inverse projection from world meters to geographic degrees.
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let rho = (x * x + y * y).sqrt();
        if rho < 1e-9 {
            return (self.lon0.to_degrees(), self.lat0.to_degrees());
        }

        let c = 2.0 * (rho / (2.0 * self.radius * self.k0)).atan();
        let (sin_c, cos_c) = c.sin_cos();

        let lat = (cos_c * self.lat0.sin() + y * sin_c * self.lat0.cos() / rho)
            .clamp(-1.0, 1.0)
            .asin();

        let lon = if (self.lat0 - FRAC_PI_2).abs() < 1e-12 {
            self.lon0 + x.atan2(-y)
        } else if (self.lat0 + FRAC_PI_2).abs() < 1e-12 {
            self.lon0 + x.atan2(y)
        } else {
            self.lon0
                + (x * sin_c).atan2(rho * self.lat0.cos() * cos_c - y * self.lat0.sin() * sin_c)
        };

        (normalize_dlon(lon).to_degrees(), lat.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_EARTH_RADIUS;

    #[test]
    fn test_centre_maps_to_origin() {
        let proj = Stereographic::polar(25.0, true, 60.0, DEFAULT_EARTH_RADIUS);
        let (x, y) = proj.project(25.0, 90.0).unwrap();
        assert!(x.abs() < 1e-6 && y.abs() < 1e-6);
    }

    #[test]
    fn test_polar_central_meridian_points_south() {
        // Along the central meridian the north polar aspect has x = 0, y < 0
        let proj = Stereographic::polar(25.0, true, 60.0, DEFAULT_EARTH_RADIUS);
        let (x, y) = proj.project(25.0, 60.0).unwrap();
        assert!(x.abs() < 1e-6, "x should be 0, got {}", x);
        assert!(y < 0.0);
    }

    #[test]
    fn test_true_scale_at_lat_ts() {
        // A one degree latitude step at lat_ts spans ~111 km on a true scale map
        let proj = Stereographic::polar(0.0, true, 60.0, DEFAULT_EARTH_RADIUS);
        let (_, y1) = proj.project(0.0, 59.5).unwrap();
        let (_, y2) = proj.project(0.0, 60.5).unwrap();
        let expected = DEFAULT_EARTH_RADIUS * 1f64.to_radians();
        assert!(((y2 - y1).abs() - expected).abs() / expected < 1e-3);
    }

    #[test]
    fn test_polar_roundtrip() {
        let proj = Stereographic::polar(25.0, true, 60.0, DEFAULT_EARTH_RADIUS);
        for &(lon, lat) in &[(6.0, 51.3), (49.0, 70.2), (24.9, 60.2), (-10.0, 45.0)] {
            let (x, y) = proj.project(lon, lat).unwrap();
            let (lon2, lat2) = proj.unproject(x, y);
            assert!((lon - lon2).abs() < 1e-9, "lon {} vs {}", lon, lon2);
            assert!((lat - lat2).abs() < 1e-9, "lat {} vs {}", lat, lat2);
        }
    }

    #[test]
    fn test_oblique_roundtrip() {
        let proj = Stereographic::new(15.0, 55.0, 1.0, DEFAULT_EARTH_RADIUS);
        for &(lon, lat) in &[(15.0, 55.0), (0.0, 40.0), (30.0, 70.0)] {
            let (x, y) = proj.project(lon, lat).unwrap();
            let (lon2, lat2) = proj.unproject(x, y);
            assert!((lon - lon2).abs() < 1e-9);
            assert!((lat - lat2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_antipode_is_rejected() {
        let proj = Stereographic::polar(0.0, true, 90.0, DEFAULT_EARTH_RADIUS);
        assert!(proj.project(0.0, -90.0).is_none());
    }
}
