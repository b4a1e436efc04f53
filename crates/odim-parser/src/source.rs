//! The read capability every ODIM backend provides.

use crate::error::OdimResult;
use crate::path::NodePath;
use crate::value::AttributeValue;

/// Read-only access to an ODIM group hierarchy.
///
/// Implementations only expose raw primitives; schema knowledge (fallback
/// lookups, numbering, type coercion) lives with the caller.
pub trait OdimSource {
    /// Value of attribute `name` on the group at `path`.
    ///
    /// Returns `Ok(None)` when the group or the attribute does not exist.
    fn attribute(&self, path: &NodePath, name: &str) -> OdimResult<Option<AttributeValue>>;

    /// Names of all attributes on the group at `path`, in storage order.
    /// Empty when the group does not exist.
    fn attribute_names(&self, path: &NodePath) -> OdimResult<Vec<String>>;

    /// Names of the direct child groups of `path`. Datasets are not listed.
    fn child_groups(&self, path: &NodePath) -> OdimResult<Vec<String>>;

    /// Flat row-major contents of the numeric dataset at `path`, widened to f64.
    fn read_array(&self, path: &NodePath) -> OdimResult<Vec<f64>>;

    /// Whether a group exists at `path`. The root always exists.
    fn has_group(&self, path: &NodePath) -> OdimResult<bool> {
        match (path.parent(), path.name()) {
            (Some(parent), Some(name)) => {
                Ok(self.child_groups(&parent)?.iter().any(|g| g == name))
            }
            _ => Ok(true),
        }
    }

    /// Human readable identification of the source, used in logs.
    fn describe(&self) -> String;
}

impl<T: OdimSource + ?Sized> OdimSource for Box<T> {
    fn attribute(&self, path: &NodePath, name: &str) -> OdimResult<Option<AttributeValue>> {
        (**self).attribute(path, name)
    }

    fn attribute_names(&self, path: &NodePath) -> OdimResult<Vec<String>> {
        (**self).attribute_names(path)
    }

    fn child_groups(&self, path: &NodePath) -> OdimResult<Vec<String>> {
        (**self).child_groups(path)
    }

    fn read_array(&self, path: &NodePath) -> OdimResult<Vec<f64>> {
        (**self).read_array(path)
    }

    fn has_group(&self, path: &NodePath) -> OdimResult<bool> {
        (**self).has_group(path)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
