//! Producer identity recorded in the output artifact.

use serde::{Deserialize, Serialize};

/// Numeric id and name of the data producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Producer {
    pub id: u32,
    pub name: String,
}

impl Producer {
    pub const DEFAULT_ID: u32 = 1014;
    pub const DEFAULT_NAME: &'static str = "RADAR";

    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Parse a "number,name" pair.
    pub fn from_pair(s: &str) -> Result<Self, ProducerParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 2 {
            return Err(ProducerParseError::InvalidFormat(s.to_string()));
        }

        let id = parts[0]
            .trim()
            .parse()
            .map_err(|_| ProducerParseError::InvalidNumber(parts[0].to_string()))?;

        Ok(Self::new(id, parts[1].trim()))
    }
}

impl Default for Producer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ID, Self::DEFAULT_NAME)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProducerParseError {
    #[error("Producer expects a comma separated number,name argument, got '{0}'")]
    InvalidFormat(String),

    #[error("Invalid producer number: {0}")]
    InvalidNumber(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_producer() {
        let p = Producer::default();
        assert_eq!(p.id, 1014);
        assert_eq!(p.name, "RADAR");
    }

    #[test]
    fn test_from_pair() {
        let p = Producer::from_pair("1017,RADAR_LV").unwrap();
        assert_eq!(p, Producer::new(1017, "RADAR_LV"));
    }

    #[test]
    fn test_from_pair_rejects_bad_input() {
        assert!(Producer::from_pair("1017").is_err());
        assert!(Producer::from_pair("a,b").is_err());
        assert!(Producer::from_pair("1,b,c").is_err());
    }
}
