//! PROJ.4 style projection definition strings.
//!
//! Radar files describe their Cartesian products with strings such as
//! `+proj=stere +lat_0=90 +lon_0=25 +lat_ts=60 +ellps=intl`. Only the
//! tokenizing lives here; [`crate::Projection::from_projdef`] interprets the
//! parameters.

use std::collections::BTreeMap;

use crate::error::{ProjectionError, ProjectionResult};

/// A tokenized projection definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjDef {
    source: String,
    params: BTreeMap<String, Option<String>>,
}

impl ProjDef {
    /// Tokenize a projdef string.
    ///
    /// Tokens are separated by whitespace and have the form `+key=value` or
    /// `+key`. The leading `+` is optional.
    pub fn parse(s: &str) -> ProjectionResult<Self> {
        let mut params = BTreeMap::new();

        for token in s.split_whitespace() {
            let token = token.trim_start_matches('+');
            if token.is_empty() {
                continue;
            }
            match token.split_once('=') {
                Some((key, _)) if key.is_empty() => {
                    return Err(ProjectionError::InvalidProjdef(s.to_string()));
                }
                Some((key, value)) => {
                    params.insert(key.to_string(), Some(value.to_string()));
                }
                None => {
                    params.insert(token.to_string(), None);
                }
            }
        }

        if params.is_empty() {
            return Err(ProjectionError::InvalidProjdef(s.to_string()));
        }

        Ok(Self {
            source: s.trim().to_string(),
            params,
        })
    }

    /// The original string.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Raw string value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_deref())
    }

    /// Numeric value of a parameter, if present.
    pub fn get_f64(&self, key: &str) -> ProjectionResult<Option<f64>> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => v
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ProjectionError::InvalidParameter {
                    param: key.to_string(),
                    value: v.to_string(),
                }),
        }
    }

    /// Numeric value of a parameter, or a default when absent.
    pub fn f64_or(&self, key: &str, default: f64) -> ProjectionResult<f64> {
        Ok(self.get_f64(key)?.unwrap_or(default))
    }

    /// The `+proj` name.
    pub fn proj_name(&self) -> ProjectionResult<&str> {
        self.get("proj")
            .ok_or_else(|| ProjectionError::InvalidProjdef(self.source.clone()))
    }
}

impl std::fmt::Display for ProjDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}
