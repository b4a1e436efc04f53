//! Canonical parameter identities and the id/name lookup table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A canonical output parameter.
///
/// The numeric ids are stable and are what the output artifact records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalParameter {
    PrecipitationAmount,
    Reflectivity,
    CorrectedReflectivity,
    RadialVelocity,
    SpectralWidth,
    EchoTop,
    RadarBorder,
    DifferentialReflectivity,
    SpecificDifferentialPhase,
    DifferentialPhase,
    SignalQualityIndex,
    ReflectivityCorrelation,
    ProbabilityOfPrec,
    ProbabilityOfPrecLimit1,
    ProbabilityOfPrecLimit2,
    ProbabilityOfPrecLimit3,
    ProbabilityOfPrecLimit4,
    ProbabilityOfPrecLimit5,
    ProbabilityOfPrecLimit6,
    ProbabilityOfPrecLimit7,
    ProbabilityOfPrecLimit8,
    ProbabilityOfPrecLimit9,
    ProbabilityOfPrecLimit10,
    PrecipitationRate,
}

impl CanonicalParameter {
    /// Every canonical parameter, in id order.
    pub const ALL: [CanonicalParameter; 24] = [
        Self::PrecipitationAmount,
        Self::Reflectivity,
        Self::CorrectedReflectivity,
        Self::RadialVelocity,
        Self::SpectralWidth,
        Self::EchoTop,
        Self::RadarBorder,
        Self::DifferentialReflectivity,
        Self::SpecificDifferentialPhase,
        Self::DifferentialPhase,
        Self::SignalQualityIndex,
        Self::ReflectivityCorrelation,
        Self::ProbabilityOfPrec,
        Self::ProbabilityOfPrecLimit1,
        Self::ProbabilityOfPrecLimit2,
        Self::ProbabilityOfPrecLimit3,
        Self::ProbabilityOfPrecLimit4,
        Self::ProbabilityOfPrecLimit5,
        Self::ProbabilityOfPrecLimit6,
        Self::ProbabilityOfPrecLimit7,
        Self::ProbabilityOfPrecLimit8,
        Self::ProbabilityOfPrecLimit9,
        Self::ProbabilityOfPrecLimit10,
        Self::PrecipitationRate,
    ];

    /// Numeric identifier of the parameter.
    pub fn id(&self) -> u32 {
        match self {
            Self::PrecipitationAmount => 50,
            Self::Reflectivity => 201,
            Self::CorrectedReflectivity => 202,
            Self::RadialVelocity => 203,
            Self::SpectralWidth => 204,
            Self::EchoTop => 205,
            Self::RadarBorder => 206,
            Self::DifferentialReflectivity => 207,
            Self::SpecificDifferentialPhase => 208,
            Self::DifferentialPhase => 209,
            Self::SignalQualityIndex => 210,
            Self::ReflectivityCorrelation => 211,
            Self::ProbabilityOfPrec => 230,
            Self::ProbabilityOfPrecLimit1 => 231,
            Self::ProbabilityOfPrecLimit2 => 232,
            Self::ProbabilityOfPrecLimit3 => 233,
            Self::ProbabilityOfPrecLimit4 => 234,
            Self::ProbabilityOfPrecLimit5 => 235,
            Self::ProbabilityOfPrecLimit6 => 236,
            Self::ProbabilityOfPrecLimit7 => 237,
            Self::ProbabilityOfPrecLimit8 => 238,
            Self::ProbabilityOfPrecLimit9 => 239,
            Self::ProbabilityOfPrecLimit10 => 240,
            Self::PrecipitationRate => 353,
        }
    }

    /// Look up a parameter by numeric identifier.
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.id() == id)
    }

    /// Probability of precipitation for a threshold id in 0..=10.
    ///
    /// Id 0 is the plain probability, ids 1-10 select the limit variants.
    pub fn probability_of_prec(threshold_id: i64) -> Option<Self> {
        let p = match threshold_id {
            0 => Self::ProbabilityOfPrec,
            1 => Self::ProbabilityOfPrecLimit1,
            2 => Self::ProbabilityOfPrecLimit2,
            3 => Self::ProbabilityOfPrecLimit3,
            4 => Self::ProbabilityOfPrecLimit4,
            5 => Self::ProbabilityOfPrecLimit5,
            6 => Self::ProbabilityOfPrecLimit6,
            7 => Self::ProbabilityOfPrecLimit7,
            8 => Self::ProbabilityOfPrecLimit8,
            9 => Self::ProbabilityOfPrecLimit9,
            10 => Self::ProbabilityOfPrecLimit10,
            _ => return None,
        };
        Some(p)
    }

    /// Default display name.
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::PrecipitationAmount => "PrecipitationAmount",
            Self::Reflectivity => "Reflectivity",
            Self::CorrectedReflectivity => "CorrectedReflectivity",
            Self::RadialVelocity => "RadialVelocity",
            Self::SpectralWidth => "SpectralWidth",
            Self::EchoTop => "EchoTop",
            Self::RadarBorder => "RadarBorder",
            Self::DifferentialReflectivity => "DifferentialReflectivity",
            Self::SpecificDifferentialPhase => "SpecificDifferentialPhase",
            Self::DifferentialPhase => "DifferentialPhase",
            Self::SignalQualityIndex => "SignalQualityIndex",
            Self::ReflectivityCorrelation => "ReflectivityCorrelation",
            Self::ProbabilityOfPrec => "ProbabilityOfPrec",
            Self::ProbabilityOfPrecLimit1 => "ProbabilityOfPrecLimit1",
            Self::ProbabilityOfPrecLimit2 => "ProbabilityOfPrecLimit2",
            Self::ProbabilityOfPrecLimit3 => "ProbabilityOfPrecLimit3",
            Self::ProbabilityOfPrecLimit4 => "ProbabilityOfPrecLimit4",
            Self::ProbabilityOfPrecLimit5 => "ProbabilityOfPrecLimit5",
            Self::ProbabilityOfPrecLimit6 => "ProbabilityOfPrecLimit6",
            Self::ProbabilityOfPrecLimit7 => "ProbabilityOfPrecLimit7",
            Self::ProbabilityOfPrecLimit8 => "ProbabilityOfPrecLimit8",
            Self::ProbabilityOfPrecLimit9 => "ProbabilityOfPrecLimit9",
            Self::ProbabilityOfPrecLimit10 => "ProbabilityOfPrecLimit10",
            Self::PrecipitationRate => "PrecipitationRate",
        }
    }
}

/// Bidirectional mapping between parameter ids and names.
///
/// The table is built once and passed explicitly to whoever needs to name
/// parameters, so callers can substitute their own naming.
#[derive(Debug, Clone)]
pub struct ParameterTable {
    names: HashMap<u32, String>,
    ids: HashMap<String, u32>,
}

impl ParameterTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
            ids: HashMap::new(),
        }
    }

    /// Table with the default name of every canonical parameter.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for p in CanonicalParameter::ALL {
            table.insert(p.id(), p.default_name());
        }
        table
    }

    /// Add or replace a mapping.
    pub fn insert(&mut self, id: u32, name: impl Into<String>) {
        let name = name.into();
        if let Some(old) = self.names.insert(id, name.clone()) {
            self.ids.remove(&old);
        }
        self.ids.insert(name, id);
    }

    /// Replace a mapping, builder style.
    pub fn with_name(mut self, id: u32, name: impl Into<String>) -> Self {
        self.insert(id, name);
        self
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn id(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    /// Name of a canonical parameter, falling back to its numeric id.
    pub fn display_name(&self, parameter: CanonicalParameter) -> String {
        self.name(parameter.id())
            .map(str::to_string)
            .unwrap_or_else(|| parameter.id().to_string())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ParameterTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<u32> = CanonicalParameter::ALL.iter().map(|p| p.id()).collect();
        assert_eq!(ids.len(), CanonicalParameter::ALL.len());
    }

    #[test]
    fn test_from_id_roundtrip() {
        for p in CanonicalParameter::ALL {
            assert_eq!(CanonicalParameter::from_id(p.id()), Some(p));
        }
        assert_eq!(CanonicalParameter::from_id(9999), None);
    }

    #[test]
    fn test_probability_thresholds() {
        assert_eq!(
            CanonicalParameter::probability_of_prec(0),
            Some(CanonicalParameter::ProbabilityOfPrec)
        );
        assert_eq!(
            CanonicalParameter::probability_of_prec(10),
            Some(CanonicalParameter::ProbabilityOfPrecLimit10)
        );
        assert_eq!(CanonicalParameter::probability_of_prec(11), None);
        assert_eq!(CanonicalParameter::probability_of_prec(-1), None);
    }

    #[test]
    fn test_table_is_bidirectional() {
        let table = ParameterTable::standard();
        assert_eq!(table.name(201), Some("Reflectivity"));
        assert_eq!(table.id("PrecipitationRate"), Some(353));
        assert_eq!(table.len(), CanonicalParameter::ALL.len());
    }

    #[test]
    fn test_table_rename_drops_old_name() {
        let table = ParameterTable::standard().with_name(201, "DBZ");
        assert_eq!(table.name(201), Some("DBZ"));
        assert_eq!(table.id("DBZ"), Some(201));
        assert_eq!(table.id("Reflectivity"), None);
        assert_eq!(
            table.display_name(CanonicalParameter::Reflectivity),
            "DBZ".to_string()
        );
    }
}
