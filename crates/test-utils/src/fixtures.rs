//! Common test fixtures for ODIM conversion tests.
//!
//! This module provides pre-defined values that represent common
//! scenarios in OPERA radar data.

/// Nominal date and time of generated files.
pub mod time {
    /// `/what.date`
    pub const DATE: &str = "20240115";

    /// `/what.time`
    pub const TIME: &str = "120000";

    /// Minutes between the end times of consecutive generated datasets.
    pub const DATASET_STEP_MINUTES: u32 = 5;
}

/// Projection definitions as found in `/where.projdef`.
pub mod projdef {
    /// Polar stereographic projection of the Finnish composites
    pub const FINNISH_STERE: &str = "+proj=stere +lat_0=90 +lon_0=25 +lat_ts=60 +a=6371288";

    /// Polar stereographic projection with a true scale latitude of 60N
    pub const STERE_60: &str = "+proj=stere +lat_0=90 +lon_0=10 +lat_ts=60 +ellps=WGS84";

    /// Lambert conformal conic over the Baltic
    pub const BALTIC_LCC: &str = "+proj=lcc +lat_0=57 +lon_0=24 +lat_1=56 +lat_2=58 +R=6371000";

    /// Plain geographic coordinates
    pub const LATLON: &str = "+proj=longlat +ellps=WGS84";
}

/// Composite corner coordinates as (lon, lat) pairs.
pub mod corners {
    /// Lower-left corner of the Finnish composite area
    pub const FINLAND_LL: (f64, f64) = (18.6, 57.93);

    /// Upper-right corner of the Finnish composite area
    pub const FINLAND_UR: (f64, f64) = (34.903, 69.005);

    /// A small geographic test area (LL, UR)
    pub const SMALL_LATLON: ((f64, f64), (f64, f64)) = ((20.0, 60.0), (23.0, 62.0));
}

/// Radar sites as (lon, lat, height) triples.
pub mod radar {
    /// Vantaa, Finland
    pub const VANTAA: (f64, f64, f64) = (24.869, 60.2706, 83.0);

    /// Riga, Latvia
    pub const RIGA: (f64, f64, f64) = (24.06, 56.95, 10.0);
}

/// Packed value conventions used by generated payloads.
pub mod scaling {
    /// Raw value marking missing data
    pub const NODATA: f64 = 255.0;

    /// Raw value marking "measured, nothing detected"
    pub const UNDETECT: f64 = 0.0;

    /// Linear gain of reflectivity payloads
    pub const GAIN: f64 = 0.5;

    /// Linear offset of reflectivity payloads
    pub const OFFSET: f64 = -32.0;

    /// Physical value of a raw value under [`GAIN`] and [`OFFSET`].
    pub fn physical(raw: f64) -> f32 {
        (raw * GAIN + OFFSET) as f32
    }
}

/// Output projection strings accepted by the converter.
pub mod targets {
    /// Geographic target covering the small test area
    pub const SMALL_LATLON: &str = "+proj=longlat:20.0,60.0,23.0,62.0";

    /// Same area with an explicit grid size
    pub const SMALL_LATLON_SIZED: &str = "+proj=longlat:20.0,60.0,23.0,62.0:7,5";

    /// Malformed: corner list is too short
    pub const MALFORMED: &str = "+proj=longlat:20.0,60.0,23.0";
}
