//! Azimuthal equidistant projection on a sphere.
//!
//! Distances and azimuths measured from the projection centre are true,
//! which makes it the natural Cartesian frame around a single radar.

use crate::normalize_dlon;

#[derive(Debug, Clone, PartialEq)]
pub struct AzimuthalEquidistant {
    /// Longitude of the centre in radians
    pub lon0: f64,
    /// Latitude of the centre in radians
    pub lat0: f64,
    /// Sphere radius (meters)
    pub radius: f64,
}

impl AzimuthalEquidistant {
    pub fn new(lon0_deg: f64, lat0_deg: f64, radius: f64) -> Self {
        Self {
            lon0: lon0_deg.to_radians(),
            lat0: lat0_deg.to_radians(),
            radius,
        }
    }

    /// Project geographic degrees to world meters.
    ///
    /// Returns `None` for the antipode, whose azimuth is undefined.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        let lat = lat_deg.to_radians();
        let dlon = normalize_dlon(lon_deg.to_radians() - self.lon0);

        let cos_c = (self.lat0.sin() * lat.sin() + self.lat0.cos() * lat.cos() * dlon.cos())
            .clamp(-1.0, 1.0);
        let c = cos_c.acos();

        if (c - std::f64::consts::PI).abs() < 1e-12 {
            return None;
        }

        let k = if c.abs() < 1e-12 { 1.0 } else { c / c.sin() };
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

        let c = rho / self.radius;
        let (sin_c, cos_c) = c.sin_cos();

        let lat = (cos_c * self.lat0.sin() + y * sin_c * self.lat0.cos() / rho)
            .clamp(-1.0, 1.0)
            .asin();
        let lon = self.lon0
            + (x * sin_c).atan2(rho * self.lat0.cos() * cos_c - y * self.lat0.sin() * sin_c);

        (normalize_dlon(lon).to_degrees(), lat.to_degrees())
    }
}
