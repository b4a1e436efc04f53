//! Typed attribute lookup with group-hierarchy fallback.
//!
//! ODIM lets a value be declared at the most specific level that applies:
//! `gain` may sit in `/dataset1/data1/what`, `/dataset1/what` or `/what`.
//! The `lookup_*` family walks from a starting node towards the root and
//! returns the first hit, so local values override global defaults.

use odim_parser::{AttributeValue, NodePath, OdimSource};

use crate::error::{ConversionError, Result};

/// Attribute reader over an [`OdimSource`].
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    source: &'a dyn OdimSource,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a dyn OdimSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'a dyn OdimSource {
        self.source
    }

    /// Whether attribute `name` exists on the group at `path`.
    pub fn has_attribute(&self, path: &NodePath, name: &str) -> Result<bool> {
        Ok(self.source.attribute(path, name)?.is_some())
    }

    pub fn read_string(&self, path: &NodePath, name: &str) -> Result<String> {
        let value = self.read(path, name)?;
        as_string(path, name, value)
    }

    pub fn read_i64(&self, path: &NodePath, name: &str) -> Result<i64> {
        let value = self.read(path, name)?;
        as_i64(path, name, &value)
    }

    pub fn read_f64(&self, path: &NodePath, name: &str) -> Result<f64> {
        let value = self.read(path, name)?;
        as_f64(path, name, &value)
    }

    pub fn lookup_string(&self, start: &NodePath, group: &str, name: &str) -> Result<String> {
        let (path, value) = self.lookup(start, group, name)?;
        as_string(&path, name, value)
    }

    pub fn lookup_i64(&self, start: &NodePath, group: &str, name: &str) -> Result<i64> {
        let (path, value) = self.lookup(start, group, name)?;
        as_i64(&path, name, &value)
    }

    pub fn lookup_f64(&self, start: &NodePath, group: &str, name: &str) -> Result<f64> {
        let (path, value) = self.lookup(start, group, name)?;
        as_f64(&path, name, &value)
    }

    /// Fallback lookup of a numeric attribute that may be absent everywhere.
    ///
    /// Absence yields `Ok(None)`; a value of the wrong type is still an error.
    pub fn optional_f64(&self, start: &NodePath, group: &str, name: &str) -> Result<Option<f64>> {
        match self.find(start, group, name)? {
            Some((path, value)) => as_f64(&path, name, &value).map(Some),
            None => Ok(None),
        }
    }

    fn read(&self, path: &NodePath, name: &str) -> Result<AttributeValue> {
        self.source
            .attribute(path, name)?
            .ok_or_else(|| ConversionError::AttributeNotFound {
                path: path.clone(),
                group: path.name().unwrap_or("/").to_string(),
                name: name.to_string(),
            })
    }

    fn lookup(&self, start: &NodePath, group: &str, name: &str) -> Result<(NodePath, AttributeValue)> {
        self.find(start, group, name)?
            .ok_or_else(|| ConversionError::AttributeNotFound {
                path: start.clone(),
                group: group.to_string(),
                name: name.to_string(),
            })
    }

    fn find(
        &self,
        start: &NodePath,
        group: &str,
        name: &str,
    ) -> Result<Option<(NodePath, AttributeValue)>> {
        for ancestor in start.ancestors() {
            let path = ancestor.join(group);
            if let Some(value) = self.source.attribute(&path, name)? {
                return Ok(Some((path, value)));
            }
        }
        Ok(None)
    }
}

fn mismatch(path: &NodePath, name: &str, expected: &'static str, value: &AttributeValue) -> ConversionError {
    ConversionError::TypeMismatch {
        path: path.clone(),
        name: name.to_string(),
        expected,
        actual: value.type_name(),
    }
}

fn as_string(path: &NodePath, name: &str, value: AttributeValue) -> Result<String> {
    match value {
        AttributeValue::Text(s) => Ok(s.trim_end_matches('\0').to_string()),
        other => Err(mismatch(path, name, "string", &other)),
    }
}

fn as_i64(path: &NodePath, name: &str, value: &AttributeValue) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| mismatch(path, name, "integer", value))
}

fn as_f64(path: &NodePath, name: &str, value: &AttributeValue) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| mismatch(path, name, "double", value))
}
