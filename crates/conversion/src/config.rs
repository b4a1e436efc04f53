//! Conversion options.

use radar_common::Producer;
use serde::{Deserialize, Serialize};

/// Options controlling a single conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Name prefix of the numbered dataset groups (`dataset1`, `dataset2`, ...).
    pub dataset_prefix: String,

    /// Optional output area, `<projdef>:<LL_lon>,<LL_lat>,<UR_lon>,<UR_lat>[:<w>,<h>]`.
    pub projection: Option<String>,

    /// Log a dump of the input file and per-dataset progress.
    pub verbose: bool,

    /// Producer recorded in the artifact.
    pub producer: Producer,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            dataset_prefix: Self::DEFAULT_DATASET_PREFIX.to_string(),
            projection: None,
            verbose: false,
            producer: Producer::default(),
        }
    }
}

impl ConversionOptions {
    pub const DEFAULT_DATASET_PREFIX: &'static str = "dataset";

    pub fn with_dataset_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.dataset_prefix = prefix.into();
        self
    }

    pub fn with_projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = Some(projection.into());
        self
    }

    pub fn with_producer(mut self, producer: Producer) -> Self {
        self.producer = producer;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), String> {
        if self.dataset_prefix.is_empty() {
            return Err("dataset prefix must not be empty".to_string());
        }

        if self.dataset_prefix.contains('/') {
            return Err(format!(
                "dataset prefix must be a group name, got '{}'",
                self.dataset_prefix
            ));
        }

        if self.producer.name.is_empty() {
            return Err("producer name must not be empty".to_string());
        }

        if matches!(&self.projection, Some(p) if p.trim().is_empty()) {
            return Err("output projection must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ConversionOptions::default();
        assert_eq!(opts.dataset_prefix, "dataset");
        assert_eq!(opts.projection, None);
        assert!(!opts.verbose);
        assert_eq!(opts.producer.id, 1014);
        assert_eq!(opts.producer.name, "RADAR");
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        assert!(ConversionOptions::default()
            .with_dataset_prefix("")
            .validate()
            .is_err());
        assert!(ConversionOptions::default()
            .with_dataset_prefix("a/b")
            .validate()
            .is_err());
        assert!(ConversionOptions::default()
            .with_dataset_prefix("scan")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_projection() {
        let opts = ConversionOptions::default().with_projection("  ");
        assert!(opts.validate().is_err());
    }
}
