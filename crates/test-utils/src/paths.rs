//! Locating real ODIM files and scratch directories for tests.
//!
//! Real HDF5 products are too large to keep in the repository. Tests that
//! need them look them up with [`find_test_file`] and skip when absent.

use std::path::PathBuf;

/// Environment variable naming an extra directory of ODIM test files.
pub const TEST_DATA_ENV: &str = "ODIM_TEST_DATA";

/// Returns the workspace root directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Directories searched for real ODIM files, in order.
///
/// `$ODIM_TEST_DATA` first when set, then `crates/odim-parser/testdata`,
/// `crates/conversion/testdata` and the workspace level `testdata`.
pub fn test_data_dirs() -> Vec<PathBuf> {
    let root = workspace_root();
    std::env::var_os(TEST_DATA_ENV)
        .map(PathBuf::from)
        .into_iter()
        .chain([
            root.join("crates/odim-parser/testdata"),
            root.join("crates/conversion/testdata"),
            root.join("testdata"),
        ])
        .collect()
}

/// First existing `name` in [`test_data_dirs`].
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    test_data_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// Creates a temporary directory for test output, removed on drop.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("odim2grid_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_is_valid() {
        let root = workspace_root();
        assert!(
            root.join("Cargo.toml").exists(),
            "Workspace root should contain Cargo.toml: {:?}",
            root
        );
    }

    #[test]
    fn test_search_order_ends_at_workspace() {
        let dirs = test_data_dirs();
        assert_eq!(dirs.last(), Some(&workspace_root().join("testdata")));
        assert!(dirs.iter().any(|d| d.ends_with("odim-parser/testdata")));
    }

    #[test]
    fn test_missing_file_not_found() {
        assert!(find_test_file("no_such_product.h5").is_none());
    }

    #[test]
    fn test_temp_test_dir() {
        let dir = temp_test_dir();
        assert!(dir.path().exists());
        assert!(dir.path().to_string_lossy().contains("odim2grid_"));
    }
}
