//! Common types shared across the radar conversion workspace.

pub mod bbox;
pub mod geo;
pub mod level;
pub mod parameter;
pub mod producer;
pub mod time;

pub use bbox::BoundingBox;
pub use geo::GeoPoint;
pub use level::{Level, LevelKind};
pub use parameter::{CanonicalParameter, ParameterTable};
pub use producer::Producer;
pub use time::{parse_odim_timestamp, TimeParseError};
