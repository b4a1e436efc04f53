//! In-memory ODIM tree, loadable from a JSON dump.
//!
//! The dump format mirrors the HDF5 layout:
//!
//! ```json
//! {
//!   "attributes": {
//!     "/what": { "object": "COMP", "date": "20240115", "time": "120000" },
//!     "/dataset1/data1/what": { "quantity": "DBZH", "gain": 0.5 }
//!   },
//!   "arrays": { "/dataset1/data1/data": [0, 1, 2, 3] },
//!   "groups": ["/how"]
//! }
//! ```
//!
//! Groups are implied by attribute and array paths; `groups` only needs to
//! list groups that are otherwise empty.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OdimError, OdimResult};
use crate::path::NodePath;
use crate::source::OdimSource;
use crate::value::AttributeValue;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Dump {
    #[serde(default)]
    attributes: BTreeMap<NodePath, BTreeMap<String, AttributeValue>>,
    #[serde(default)]
    arrays: BTreeMap<NodePath, Vec<f64>>,
    #[serde(default)]
    groups: BTreeSet<NodePath>,
}

/// An ODIM hierarchy held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryFile {
    name: String,
    attributes: BTreeMap<NodePath, BTreeMap<String, AttributeValue>>,
    arrays: BTreeMap<NodePath, Vec<f64>>,
    groups: BTreeSet<NodePath>,
}

impl MemoryFile {
    pub fn new() -> Self {
        Self {
            name: "<memory>".to_string(),
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> OdimResult<Self> {
        let dump: Dump = serde_json::from_str(json)?;
        let mut file = Self::new();
        for path in dump.groups {
            file.add_group(path);
        }
        for (path, attrs) in dump.attributes {
            for (name, value) in attrs {
                file.set_attribute(path.clone(), name, value);
            }
        }
        for (path, values) in dump.arrays {
            file.insert_array(path, values);
        }
        Ok(file)
    }

    pub fn open(path: impl AsRef<Path>) -> OdimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let mut file = Self::from_json_str(&json)?;
        file.name = path.display().to_string();
        Ok(file)
    }

    /// Serialize to the JSON dump format.
    pub fn to_json_string(&self) -> OdimResult<String> {
        let dump = Dump {
            attributes: self.attributes.clone(),
            arrays: self.arrays.clone(),
            groups: self.groups.clone(),
        };
        Ok(serde_json::to_string_pretty(&dump)?)
    }

    /// Register a group and all of its ancestors.
    pub fn add_group(&mut self, path: impl Into<NodePath>) {
        for p in path.into().ancestors() {
            if !p.is_root() {
                self.groups.insert(p);
            }
        }
    }

    pub fn set_attribute(
        &mut self,
        path: impl Into<NodePath>,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) {
        let path = path.into();
        self.add_group(path.clone());
        self.attributes
            .entry(path)
            .or_default()
            .insert(name.into(), value.into());
    }

    /// Store a numeric dataset. Its parent groups are created.
    pub fn insert_array(&mut self, path: impl Into<NodePath>, values: Vec<f64>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_group(parent);
        }
        self.arrays.insert(path, values);
    }

    pub fn remove_attribute(&mut self, path: impl Into<NodePath>, name: &str) {
        if let Some(attrs) = self.attributes.get_mut(&path.into()) {
            attrs.remove(name);
        }
    }

    /// Remove a group together with everything below it.
    pub fn remove_group(&mut self, path: impl Into<NodePath>) {
        let path = path.into();
        let prefix = path.segments().to_vec();
        let below = |p: &NodePath| p.segments().starts_with(&prefix);
        self.groups.retain(|p| !below(p));
        self.attributes.retain(|p, _| !below(p));
        self.arrays.retain(|p, _| !below(p));
    }

    pub fn with_group(mut self, path: impl Into<NodePath>) -> Self {
        self.add_group(path);
        self
    }

    pub fn with_attribute(
        mut self,
        path: impl Into<NodePath>,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.set_attribute(path, name, value);
        self
    }

    pub fn with_array(mut self, path: impl Into<NodePath>, values: Vec<f64>) -> Self {
        self.insert_array(path, values);
        self
    }
}

impl OdimSource for MemoryFile {
    fn attribute(&self, path: &NodePath, name: &str) -> OdimResult<Option<AttributeValue>> {
        Ok(self
            .attributes
            .get(path)
            .and_then(|attrs| attrs.get(name))
            .cloned())
    }

    fn attribute_names(&self, path: &NodePath) -> OdimResult<Vec<String>> {
        Ok(self
            .attributes
            .get(path)
            .map(|attrs| attrs.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn child_groups(&self, path: &NodePath) -> OdimResult<Vec<String>> {
        let depth = path.segments().len();
        Ok(self
            .groups
            .iter()
            .filter(|g| g.segments().len() == depth + 1 && g.segments().starts_with(path.segments()))
            .filter_map(|g| g.name().map(str::to_string))
            .collect())
    }

    fn read_array(&self, path: &NodePath) -> OdimResult<Vec<f64>> {
        self.arrays
            .get(path)
            .cloned()
            .ok_or_else(|| OdimError::DatasetNotFound(path.to_string()))
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
