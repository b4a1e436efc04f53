//! Generators for synthetic ODIM files.
//!
//! The files are built in memory and follow the group layout of real OPERA
//! products, so the whole conversion pipeline can be exercised without the
//! HDF5 library. Payload values are predictable and can be checked cell by
//! cell after conversion.

use std::path::{Path, PathBuf};

use odim_parser::{AttributeValue, MemoryFile, NodePath};

use crate::fixtures::{corners, projdef, scaling, time};

/// Creates a north-up payload with predictable raw values.
///
/// The cell in source row `row` (row 0 is the northernmost) and column `col`
/// holds `row * width + col + 1`. Values never hit the undetect value 0 and,
/// for grids of fewer than 254 cells, never hit the nodata value 255.
///
/// # Example
///
/// ```
/// use test_utils::create_test_payload;
///
/// let payload = create_test_payload(3, 2);
/// assert_eq!(payload, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// ```
pub fn create_test_payload(width: usize, height: usize) -> Vec<f64> {
    (0..width * height).map(|k| (k + 1) as f64).collect()
}

/// Creates a polar sweep payload of `nrays` × `nbins` raw values.
///
/// Every bin of ray `r` holds `r + 1`, so the ray a cell came from can be
/// read back from its value.
pub fn create_sweep_payload(nrays: usize, nbins: usize) -> Vec<f64> {
    (0..nrays)
        .flat_map(|ray| std::iter::repeat((ray + 1) as f64).take(nbins))
        .collect()
}

/// End time of generated dataset `i`.
pub fn dataset_endtime(i: usize) -> String {
    let minutes = i as u32 * time::DATASET_STEP_MINUTES;
    format!("{:02}{:02}00", 12 + minutes / 60, minutes % 60)
}

/// Builder for synthetic ODIM files.
///
/// # Example
///
/// ```
/// use test_utils::OdimFileBuilder;
///
/// let file = OdimFileBuilder::composite(4, 3)
///     .cartesian_dataset("PCAPPI", Some(500.0), &["DBZH"])
///     .cartesian_dataset("PCAPPI", Some(1000.0), &["DBZH", "VRAD"])
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct OdimFileBuilder {
    file: MemoryFile,
    datasets: usize,
    width: usize,
    height: usize,
}

impl OdimFileBuilder {
    /// A file with `/what` filled in for the given object kind.
    pub fn new(object: &str) -> Self {
        let file = MemoryFile::new()
            .with_attribute("/what", "object", object)
            .with_attribute("/what", "version", "H5rad 2.2")
            .with_attribute("/what", "date", time::DATE)
            .with_attribute("/what", "time", time::TIME)
            .with_attribute("/what", "source", "WMO:02974,NOD:fivan")
            .with_attribute("/how", "system", "SYNTHETIC");

        Self {
            file,
            datasets: 0,
            width: 0,
            height: 0,
        }
    }

    /// A cartesian product over the Finnish composite area with
    /// `LL_*`/`UR_*` corners.
    pub fn cartesian(object: &str, width: usize, height: usize) -> Self {
        let (ll, ur) = (corners::FINLAND_LL, corners::FINLAND_UR);
        let mut builder = Self::new(object)
            .with_attribute("/where", "projdef", projdef::FINNISH_STERE)
            .with_attribute("/where", "xsize", width as i64)
            .with_attribute("/where", "ysize", height as i64)
            .with_attribute("/where", "LL_lon", ll.0)
            .with_attribute("/where", "LL_lat", ll.1)
            .with_attribute("/where", "UR_lon", ur.0)
            .with_attribute("/where", "UR_lat", ur.1);
        builder.width = width;
        builder.height = height;
        builder
    }

    /// A `COMP` object; see [`OdimFileBuilder::cartesian`].
    pub fn composite(width: usize, height: usize) -> Self {
        Self::cartesian("COMP", width, height)
    }

    /// A geographic (`+proj=longlat`) cartesian product over the given corners.
    pub fn latlon(
        object: &str,
        width: usize,
        height: usize,
        ll: (f64, f64),
        ur: (f64, f64),
    ) -> Self {
        Self::cartesian(object, width, height)
            .with_attribute("/where", "projdef", projdef::LATLON)
            .with_attribute("/where", "LL_lon", ll.0)
            .with_attribute("/where", "LL_lat", ll.1)
            .with_attribute("/where", "UR_lon", ur.0)
            .with_attribute("/where", "UR_lat", ur.1)
    }

    /// A `PVOL` object for a radar at (`lon`, `lat`).
    pub fn volume(lon: f64, lat: f64) -> Self {
        Self::new("PVOL")
            .with_attribute("/where", "lon", lon)
            .with_attribute("/where", "lat", lat)
            .with_attribute("/where", "height", 83.0)
    }

    /// Number of datasets added so far.
    pub fn dataset_count(&self) -> usize {
        self.datasets
    }

    /// Path of dataset `i`.
    pub fn dataset_path(i: usize) -> NodePath {
        NodePath::parse(&format!("/dataset{}", i))
    }

    /// Add a dataset with one numbered data unit per quantity.
    ///
    /// Units carry reflectivity style scaling (see [`scaling`]) and a
    /// [`create_test_payload`] payload.
    pub fn cartesian_dataset(
        mut self,
        product: &str,
        prodpar: Option<f64>,
        quantities: &[&str],
    ) -> Self {
        let i = self.next_dataset(product, prodpar);
        for (k, quantity) in quantities.iter().enumerate() {
            let unit = Self::dataset_path(i).join(&format!("data{}", k + 1));
            self.add_unit(&unit, quantity);
            let payload = create_test_payload(self.width, self.height);
            self.file.insert_array(unit.join("data"), payload);
        }
        self
    }

    /// Add a dataset in the legacy layout: no numbered data units, the
    /// quantity and payload sit directly in the dataset group.
    pub fn legacy_dataset(
        mut self,
        product: &str,
        prodpar: Option<f64>,
        quantity: &str,
    ) -> Self {
        let i = self.next_dataset(product, prodpar);
        let dataset = Self::dataset_path(i);
        self.add_unit(&dataset, quantity);
        let payload = create_test_payload(self.width, self.height);
        self.file.insert_array(dataset.join("data"), payload);
        self
    }

    /// Add a polar sweep with one data unit per quantity and a
    /// [`create_sweep_payload`] payload.
    pub fn sweep(
        mut self,
        elangle: f64,
        nrays: usize,
        nbins: usize,
        rscale: f64,
        quantities: &[&str],
    ) -> Self {
        let i = self.next_dataset("SCAN", None);
        let where_ = Self::dataset_path(i).join("where");
        self.file.set_attribute(where_.clone(), "elangle", elangle);
        self.file.set_attribute(where_.clone(), "nbins", nbins as i64);
        self.file.set_attribute(where_.clone(), "nrays", nrays as i64);
        self.file.set_attribute(where_.clone(), "rscale", rscale);
        self.file.set_attribute(where_.clone(), "rstart", 0.0);
        self.file.set_attribute(where_, "a1gate", 0);

        for (k, quantity) in quantities.iter().enumerate() {
            let unit = Self::dataset_path(i).join(&format!("data{}", k + 1));
            self.add_unit(&unit, quantity);
            self.file
                .insert_array(unit.join("data"), create_sweep_payload(nrays, nbins));
        }
        self
    }

    /// Replace the payload below `unit` (e.g. `/dataset1/data2`).
    pub fn with_payload(mut self, unit: &str, values: Vec<f64>) -> Self {
        self.file.insert_array(NodePath::parse(unit).join("data"), values);
        self
    }

    pub fn with_attribute(
        mut self,
        path: &str,
        name: &str,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.file.set_attribute(path, name, value);
        self
    }

    pub fn without_attribute(mut self, path: &str, name: &str) -> Self {
        self.file.remove_attribute(path, name);
        self
    }

    /// Remove a group and everything below it.
    pub fn without_group(mut self, path: &str) -> Self {
        self.file.remove_group(path);
        self
    }

    pub fn build(self) -> MemoryFile {
        self.file
    }

    /// Write the file as a JSON dump into `dir` and return its path.
    pub fn write_json(self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let json = self
            .file
            .to_json_string()
            .expect("Failed to serialize synthetic ODIM file");
        std::fs::write(&path, json).expect("Failed to write synthetic ODIM file");
        path
    }

    fn next_dataset(&mut self, product: &str, prodpar: Option<f64>) -> usize {
        self.datasets += 1;
        let i = self.datasets;
        let what = Self::dataset_path(i).join("what");

        self.file.set_attribute(what.clone(), "product", product);
        if let Some(prodpar) = prodpar {
            self.file.set_attribute(what.clone(), "prodpar", prodpar);
        }
        self.file.set_attribute(what.clone(), "startdate", time::DATE);
        self.file.set_attribute(what.clone(), "starttime", time::TIME);
        self.file.set_attribute(what.clone(), "enddate", time::DATE);
        self.file.set_attribute(what, "endtime", dataset_endtime(i));
        i
    }

    fn add_unit(&mut self, unit: &NodePath, quantity: &str) {
        let what = unit.join("what");
        self.file.set_attribute(what.clone(), "quantity", quantity);
        self.file.set_attribute(what.clone(), "gain", scaling::GAIN);
        self.file.set_attribute(what.clone(), "offset", scaling::OFFSET);
        self.file.set_attribute(what.clone(), "nodata", scaling::NODATA);
        self.file.set_attribute(what, "undetect", scaling::UNDETECT);
    }
}

/// A composite with datasets 1, 2 and 4 only.
pub fn create_gapped_composite(width: usize, height: usize) -> MemoryFile {
    let mut file = OdimFileBuilder::composite(width, height)
        .cartesian_dataset("COMP", None, &["DBZH"])
        .cartesian_dataset("COMP", None, &["DBZH"])
        .cartesian_dataset("COMP", None, &["DBZH"])
        .cartesian_dataset("COMP", None, &["DBZH"])
        .build();
    file.remove_group("/dataset3");
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use odim_parser::OdimSource;

    #[test]
    fn test_payload_values() {
        let p = create_test_payload(4, 3);
        assert_eq!(p.len(), 12);
        assert_eq!(p[0], 1.0);
        assert_eq!(p[11], 12.0);
    }

    #[test]
    fn test_sweep_payload_values() {
        let p = create_sweep_payload(3, 2);
        assert_eq!(p, vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_dataset_endtime() {
        assert_eq!(dataset_endtime(1), "120500");
        assert_eq!(dataset_endtime(12), "130000");
    }

    #[test]
    fn test_builder_layout() {
        let f = OdimFileBuilder::composite(4, 3)
            .cartesian_dataset("PCAPPI", Some(500.0), &["DBZH", "VRAD"])
            .legacy_dataset("PCAPPI", Some(1000.0), "DBZH")
            .build();

        let root = f.child_groups(&NodePath::root()).unwrap();
        assert_eq!(root, vec!["dataset1", "dataset2", "how", "what", "where"]);

        let d1 = f.child_groups(&NodePath::parse("/dataset1")).unwrap();
        assert_eq!(d1, vec!["data1", "data2", "what"]);

        let d2 = f.child_groups(&NodePath::parse("/dataset2")).unwrap();
        assert_eq!(d2, vec!["what"]);
        assert_eq!(
            f.read_array(&NodePath::parse("/dataset2/data")).unwrap().len(),
            12
        );
    }

    #[test]
    fn test_gapped_composite() {
        let f = create_gapped_composite(2, 2);
        let root = f.child_groups(&NodePath::root()).unwrap();
        assert!(root.contains(&"dataset4".to_string()));
        assert!(!root.contains(&"dataset3".to_string()));
    }
}
