//! Native HDF5 reading using the netcdf library.
//!
//! libnetcdf opens HDF5 files directly and exposes HDF5 groups, attributes
//! and datasets as netCDF-4 groups, attributes and variables, which is all
//! an ODIM file uses.

use std::path::Path;
use std::sync::Once;

use tracing::debug;

use crate::error::{OdimError, OdimResult};
use crate::path::NodePath;
use crate::source::OdimSource;
use crate::value::AttributeValue;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// It only needs to be called once per process, but is safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// An ODIM file opened through libnetcdf.
pub struct Hdf5File {
    name: String,
    file: netcdf::File,
}

impl Hdf5File {
    pub fn open(path: impl AsRef<Path>) -> OdimResult<Self> {
        silence_hdf5_errors();

        let path = path.as_ref();
        let file = netcdf::open(path).map_err(|e| OdimError::OpenFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "Opened HDF5 file");

        Ok(Self {
            name: path.display().to_string(),
            file,
        })
    }

    fn group(&self, path: &NodePath) -> OdimResult<Option<netcdf::Group<'_>>> {
        if path.is_root() {
            return Ok(self.file.root());
        }
        self.file
            .group(&path.relative())
            .map_err(|e| OdimError::InvalidFormat(format!("{}: {}", path, e)))
    }
}

impl OdimSource for Hdf5File {
    fn attribute(&self, path: &NodePath, name: &str) -> OdimResult<Option<AttributeValue>> {
        let Some(group) = self.group(path)? else {
            return Ok(None);
        };

        // Check presence first; probing a missing attribute makes HDF5 complain
        if !group.attributes().any(|attr| attr.name() == name) {
            return Ok(None);
        }

        let Some(attr) = group.attribute(name) else {
            return Ok(None);
        };
        let value = attr
            .value()
            .map_err(|e| OdimError::InvalidFormat(format!("{}/{}: {}", path, name, e)))?;

        convert_attribute(value)
            .map(Some)
            .ok_or_else(|| OdimError::InvalidFormat(format!("{}/{}: unsupported attribute type", path, name)))
    }

    fn attribute_names(&self, path: &NodePath) -> OdimResult<Vec<String>> {
        Ok(match self.group(path)? {
            Some(group) => group.attributes().map(|a| a.name().to_string()).collect(),
            None => Vec::new(),
        })
    }

    fn child_groups(&self, path: &NodePath) -> OdimResult<Vec<String>> {
        Ok(match self.group(path)? {
            Some(group) => group.groups().map(|g| g.name()).collect(),
            None => Vec::new(),
        })
    }

    fn read_array(&self, path: &NodePath) -> OdimResult<Vec<f64>> {
        let var = self
            .file
            .variable(&path.relative())
            .ok_or_else(|| OdimError::DatasetNotFound(path.to_string()))?;

        // Read all extents, converted to f64 by the library
        let values: Vec<f64> = var
            .get_values(..)
            .map_err(|e| OdimError::InvalidFormat(format!("Failed to read {}: {}", path, e)))?;

        Ok(values)
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Widen a netcdf attribute to an [`AttributeValue`].
///
/// Single element arrays are accepted as scalars.
fn convert_attribute(value: netcdf::AttributeValue) -> Option<AttributeValue> {
    use netcdf::AttributeValue as Nc;

    let v = match value {
        Nc::Uchar(v) => AttributeValue::Int(v as i64),
        Nc::Schar(v) => AttributeValue::Int(v as i64),
        Nc::Ushort(v) => AttributeValue::Int(v as i64),
        Nc::Short(v) => AttributeValue::Int(v as i64),
        Nc::Uint(v) => AttributeValue::Int(v as i64),
        Nc::Int(v) => AttributeValue::Int(v as i64),
        Nc::Ulonglong(v) => AttributeValue::Int(i64::try_from(v).ok()?),
        Nc::Longlong(v) => AttributeValue::Int(v),
        Nc::Float(v) => AttributeValue::Float(v as f64),
        Nc::Double(v) => AttributeValue::Float(v),
        Nc::Str(s) => AttributeValue::text(s),
        Nc::Strs(v) => AttributeValue::text(v.into_iter().next()?),
        Nc::Uchars(v) if v.len() == 1 => AttributeValue::Int(v[0] as i64),
        Nc::Shorts(v) if v.len() == 1 => AttributeValue::Int(v[0] as i64),
        Nc::Ints(v) if v.len() == 1 => AttributeValue::Int(v[0] as i64),
        Nc::Longlongs(v) if v.len() == 1 => AttributeValue::Int(v[0]),
        Nc::Floats(v) if v.len() == 1 => AttributeValue::Float(v[0] as f64),
        Nc::Doubles(v) if v.len() == 1 => AttributeValue::Float(v[0]),
        _ => return None,
    };
    Some(v)
}
