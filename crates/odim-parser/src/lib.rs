//! ODIM_H5 source access.
//!
//! This crate provides raw, schema-agnostic access to files following the
//! EUMETNET OPERA ODIM_H5 layout: groups (`/what`, `/where`, `/dataset1`, ...)
//! carrying scalar attributes, and numeric datasets (`/dataset1/data1/data`).
//!
//! Two backends implement [`OdimSource`]:
//!
//! - [`MemoryFile`] holds a tree in memory and loads JSON dumps, so the
//!   converter can be driven without the HDF5 C library;
//! - `Hdf5File` (feature `native`) reads real HDF5 files through libnetcdf.

pub mod error;
pub mod memory;
#[cfg(feature = "native")]
pub mod native;
pub mod path;
pub mod source;
pub mod value;

pub use error::{OdimError, OdimResult};
pub use memory::MemoryFile;
#[cfg(feature = "native")]
pub use native::{silence_hdf5_errors, Hdf5File};
pub use path::NodePath;
pub use source::OdimSource;
pub use value::AttributeValue;

use std::path::Path;

/// Open an input file, choosing the backend from the extension.
///
/// `.json` files are read as [`MemoryFile`] dumps; anything else is treated
/// as HDF5 and needs the `native` feature.
pub fn open_source(path: impl AsRef<Path>) -> OdimResult<Box<dyn OdimSource>> {
    let path = path.as_ref();

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        return Ok(Box::new(MemoryFile::open(path)?));
    }

    open_native(path)
}

#[cfg(feature = "native")]
fn open_native(path: &Path) -> OdimResult<Box<dyn OdimSource>> {
    Ok(Box::new(Hdf5File::open(path)?))
}

#[cfg(not(feature = "native"))]
fn open_native(path: &Path) -> OdimResult<Box<dyn OdimSource>> {
    Err(OdimError::BackendUnavailable(path.display().to_string()))
}
