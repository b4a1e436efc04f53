//! Vertical level descriptions.

use serde::{Deserialize, Serialize};

/// Physical family of a level value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelKind {
    /// Height in meters above the radar (CAPPI, PCAPPI).
    Height,
    /// A level with no dedicated physical family (elevation angle of a PPI,
    /// reflectivity limit of an echo top, azimuth of an RHI).
    Any,
    /// Generic level used for volume scan elevation angles.
    NoLevel,
}

impl std::fmt::Display for LevelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Height => write!(f, "height"),
            Self::Any => write!(f, "any"),
            Self::NoLevel => write!(f, "none"),
        }
    }
}

/// A single level of the vertical axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub kind: LevelKind,
    pub name: String,
    pub value: f64,
}

impl Level {
    pub fn new(kind: LevelKind, name: impl Into<String>, value: f64) -> Self {
        Self {
            kind,
            name: name.into(),
            value,
        }
    }
}
