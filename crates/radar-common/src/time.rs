//! Time handling for ODIM date/time attributes.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Parse an ODIM `date` (`YYYYMMDD`) and `time` (`hhmmss`) pair.
///
/// Only the first twelve characters of the concatenation are used, so the
/// result is truncated to minute precision.
pub fn parse_odim_timestamp(date: &str, time: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let stamp: String = date.trim().chars().chain(time.trim().chars()).collect();

    if stamp.len() < 12 || !stamp.is_char_boundary(12) {
        return Err(TimeParseError::InvalidFormat(stamp));
    }

    let minutes = &stamp[..12];
    let ndt = NaiveDateTime::parse_from_str(minutes, "%Y%m%d%H%M")
        .map_err(|_| TimeParseError::InvalidFormat(stamp.clone()))?;

    Ok(Utc.from_utc_datetime(&ndt))
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid ODIM timestamp: '{0}', expected YYYYMMDDhhmm[ss]")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_truncates_seconds() {
        let t = parse_odim_timestamp("20240115", "123459").unwrap();
        assert_eq!(t.year(), 2024);
        assert_eq!(t.month(), 1);
        assert_eq!(t.day(), 15);
        assert_eq!(t.hour(), 12);
        assert_eq!(t.minute(), 34);
        assert_eq!(t.second(), 0);
    }

    #[test]
    fn test_parse_without_seconds() {
        let t = parse_odim_timestamp("20231231", "2355").unwrap();
        assert_eq!(t.minute(), 55);
    }

    #[test]
    fn test_parse_rejects_short_stamp() {
        assert!(parse_odim_timestamp("2024", "12").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_odim_timestamp("2024AB15", "120000").is_err());
    }
}
