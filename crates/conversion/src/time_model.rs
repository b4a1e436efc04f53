//! Time axis construction.

use chrono::{DateTime, Utc};
use odim_parser::NodePath;
use radar_common::parse_odim_timestamp;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::enumerate::Layout;
use crate::error::{ConversionError, Result};
use crate::resolver::Resolver;

/// Origin time plus the distinct valid times of the datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub origin: DateTime<Utc>,
    pub times: Vec<DateTime<Utc>>,
}

impl TimeAxis {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Slot of the instant `time`.
    pub fn index_of(&self, time: DateTime<Utc>) -> Option<usize> {
        self.times.iter().position(|t| *t == time)
    }
}

/// Nominal time of the file, from `/what.date` and `/what.time`.
pub fn origin_time(resolver: &Resolver<'_>) -> Result<DateTime<Utc>> {
    let what = NodePath::parse("/what");
    let date = resolver.read_string(&what, "date")?;
    let time = resolver.read_string(&what, "time")?;
    parse(&what, &date, &time)
}

/// End time of dataset `i`, falling back to the nominal date and time.
pub fn valid_time(resolver: &Resolver<'_>, layout: &Layout, i: usize) -> Result<DateTime<Utc>> {
    let what = layout.dataset(i).join("what");
    let root = NodePath::parse("/what");

    let date = if resolver.has_attribute(&what, "enddate")? {
        resolver.read_string(&what, "enddate")?
    } else {
        resolver.read_string(&root, "date")?
    };

    let time = if resolver.has_attribute(&what, "endtime")? {
        resolver.read_string(&what, "endtime")?
    } else {
        resolver.read_string(&root, "time")?
    };

    parse(&what, &date, &time)
}

/// Build the time axis over `datasets` datasets.
///
/// Times keep the enumeration order and repeated instants are added once.
/// Without datasets the axis holds the origin time alone.
pub fn build_time_axis(resolver: &Resolver<'_>, layout: &Layout, datasets: usize) -> Result<TimeAxis> {
    let origin = origin_time(resolver)?;

    let mut times = Vec::with_capacity(datasets.max(1));
    for i in 1..=datasets {
        let time = valid_time(resolver, layout, i)?;
        if !times.contains(&time) {
            times.push(time);
        }
    }
    if times.is_empty() {
        times.push(origin);
    }

    debug!(origin = %origin, count = times.len(), "Built time axis");

    Ok(TimeAxis { origin, times })
}

fn parse(path: &NodePath, date: &str, time: &str) -> Result<DateTime<Utc>> {
    parse_odim_timestamp(date, time).map_err(|source| ConversionError::InvalidTime {
        path: path.clone(),
        source,
    })
}
