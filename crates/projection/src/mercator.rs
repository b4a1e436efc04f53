//! Normal aspect Mercator projection on a sphere.

use std::f64::consts::FRAC_PI_4;

use crate::normalize_dlon;

#[derive(Debug, Clone, PartialEq)]
pub struct Mercator {
    /// Central meridian in radians
    pub lon0: f64,
    /// Scale factor on the equator, cos(lat_ts) when a true scale latitude is given
    pub k0: f64,
    /// Sphere radius (meters)
    pub radius: f64,
}

impl Mercator {
    pub fn new(lon0_deg: f64, k0: f64, radius: f64) -> Self {
        Self {
            lon0: lon0_deg.to_radians(),
            k0,
            radius,
        }
    }

    /// Mercator with true scale along the parallel `lat_ts_deg`.
    pub fn with_true_scale(lon0_deg: f64, lat_ts_deg: f64, radius: f64) -> Self {
        Self::new(lon0_deg, lat_ts_deg.to_radians().cos(), radius)
    }

    /// Returns `None` at the poles.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        if lat_deg.abs() >= 90.0 {
            return None;
        }
        let lat = lat_deg.to_radians();
        let dlon = normalize_dlon(lon_deg.to_radians() - self.lon0);

        let x = self.radius * self.k0 * dlon;
        let y = self.radius * self.k0 * (FRAC_PI_4 + lat / 2.0).tan().ln();
        Some((x, y))
    }

    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let scale = self.radius * self.k0;
        let lat = 2.0 * (y / scale).exp().atan() - std::f64::consts::FRAC_PI_2;
        let lon = self.lon0 + x / scale;
        (normalize_dlon(lon).to_degrees(), lat.to_degrees())
    }
}
