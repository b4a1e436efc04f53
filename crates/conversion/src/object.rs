//! Data object and product kinds from the ODIM vocabulary.

use std::str::FromStr;

use odim_parser::NodePath;
use radar_common::LevelKind;
use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, Result};
use crate::resolver::Resolver;

/// Kind of data object, from `/what.object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObjectKind {
    /// Cartesian composite image(s)
    Comp,
    /// Polar volume
    Pvol,
    /// Cartesian volume
    Cvol,
    /// Polar scan
    Scan,
    /// Cartesian image
    Image,
    /// Single polar ray
    Ray,
    /// Azimuthal object
    Azim,
    /// 2-D vertical cross section
    Xsec,
    /// 1-D vertical profile
    Vp,
    /// Embedded graphical image
    Pic,
}

impl ObjectKind {
    /// Read and parse `/what.object`.
    pub fn read(resolver: &Resolver<'_>) -> Result<Self> {
        resolver
            .read_string(&NodePath::parse("/what"), "object")?
            .parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comp => "COMP",
            Self::Pvol => "PVOL",
            Self::Cvol => "CVOL",
            Self::Scan => "SCAN",
            Self::Image => "IMAGE",
            Self::Ray => "RAY",
            Self::Azim => "AZIM",
            Self::Xsec => "XSEC",
            Self::Vp => "VP",
            Self::Pic => "PIC",
        }
    }

    /// Human readable description used in error messages.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Comp => "composite",
            Self::Pvol => "polar volume",
            Self::Cvol => "cartesian volume",
            Self::Scan => "polar scan",
            Self::Image => "cartesian image",
            Self::Ray => "single polar ray",
            Self::Azim => "azimuthal object",
            Self::Xsec => "2D vertical cross section",
            Self::Vp => "vertical profile",
            Self::Pic => "embedded graphical image",
        }
    }

    /// Error for an object kind a given stage cannot process.
    pub fn unsupported(&self) -> ConversionError {
        ConversionError::unsupported_object(format!(
            "{} ({}) data",
            self.description(),
            self.as_str()
        ))
    }
}

impl FromStr for ObjectKind {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        let kind = match s {
            "COMP" => Self::Comp,
            "PVOL" => Self::Pvol,
            "CVOL" => Self::Cvol,
            "SCAN" => Self::Scan,
            "IMAGE" => Self::Image,
            "RAY" => Self::Ray,
            "AZIM" => Self::Azim,
            "XSEC" => Self::Xsec,
            "VP" => Self::Vp,
            "PIC" => Self::Pic,
            other => {
                return Err(ConversionError::unsupported_object(format!(
                    "unknown data object '{}', it is not listed in the OPERA specification",
                    other
                )))
            }
        };
        Ok(kind)
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product type of a dataset, from `what.product`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductKind {
    Ppi,
    Cappi,
    Pcappi,
    Etop,
    Max,
    Rr,
    Vil,
    Comp,
    Scan,
    Vp,
    Rhi,
    Xsec,
    Vsp,
    Hsp,
    Ray,
    Azim,
    Qual,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ppi => "PPI",
            Self::Cappi => "CAPPI",
            Self::Pcappi => "PCAPPI",
            Self::Etop => "ETOP",
            Self::Max => "MAX",
            Self::Rr => "RR",
            Self::Vil => "VIL",
            Self::Comp => "COMP",
            Self::Scan => "SCAN",
            Self::Vp => "VP",
            Self::Rhi => "RHI",
            Self::Xsec => "XSEC",
            Self::Vsp => "VSP",
            Self::Hsp => "HSP",
            Self::Ray => "RAY",
            Self::Azim => "AZIM",
            Self::Qual => "QUAL",
        }
    }

    /// Level family of products whose `prodpar` is a level value.
    ///
    /// CAPPI and PCAPPI carry a layer height, PPI an elevation angle, ETOP a
    /// reflectivity limit and RHI an azimuth. VIL has two level values and is
    /// treated as level-less.
    pub fn level_kind(&self) -> Option<LevelKind> {
        match self {
            Self::Cappi | Self::Pcappi => Some(LevelKind::Height),
            Self::Ppi | Self::Etop | Self::Rhi => Some(LevelKind::Any),
            Self::Max
            | Self::Rr
            | Self::Vil
            | Self::Comp
            | Self::Scan
            | Self::Vp
            | Self::Xsec
            | Self::Vsp
            | Self::Hsp
            | Self::Ray
            | Self::Azim
            | Self::Qual => None,
        }
    }

    pub fn has_level(&self) -> bool {
        self.level_kind().is_some()
    }
}

impl FromStr for ProductKind {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        let kind = match s {
            "PPI" => Self::Ppi,
            "CAPPI" => Self::Cappi,
            "PCAPPI" => Self::Pcappi,
            "ETOP" => Self::Etop,
            "MAX" => Self::Max,
            "RR" => Self::Rr,
            "VIL" => Self::Vil,
            "COMP" => Self::Comp,
            "SCAN" => Self::Scan,
            "VP" => Self::Vp,
            "RHI" => Self::Rhi,
            "XSEC" => Self::Xsec,
            "VSP" => Self::Vsp,
            "HSP" => Self::Hsp,
            "RAY" => Self::Ray,
            "AZIM" => Self::Azim,
            "QUAL" => Self::Qual,
            other => return Err(ConversionError::UnsupportedProduct(other.to_string())),
        };
        Ok(kind)
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_parsing() {
        assert_eq!("PVOL".parse::<ObjectKind>().unwrap(), ObjectKind::Pvol);
        assert_eq!("IMAGE".parse::<ObjectKind>().unwrap(), ObjectKind::Image);

        match "ELEV".parse::<ObjectKind>() {
            Err(ConversionError::UnsupportedObject(msg)) => {
                assert!(msg.contains("ELEV"));
                assert!(msg.contains("not listed"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_object_message() {
        let msg = ObjectKind::Vp.unsupported().to_string();
        assert!(msg.contains("vertical profile (VP)"));
    }

    #[test]
    fn test_product_level_kinds() {
        assert_eq!(ProductKind::Cappi.level_kind(), Some(LevelKind::Height));
        assert_eq!(ProductKind::Pcappi.level_kind(), Some(LevelKind::Height));
        assert_eq!(ProductKind::Ppi.level_kind(), Some(LevelKind::Any));
        assert_eq!(ProductKind::Etop.level_kind(), Some(LevelKind::Any));
        assert_eq!(ProductKind::Rhi.level_kind(), Some(LevelKind::Any));
        assert!(!ProductKind::Vil.has_level());
        assert!(!ProductKind::Comp.has_level());
    }

    #[test]
    fn test_unknown_product() {
        assert!(matches!(
            "FOO".parse::<ProductKind>(),
            Err(ConversionError::UnsupportedProduct(p)) if p == "FOO"
        ));
    }
}
