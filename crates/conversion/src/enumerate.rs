//! Dataset numbering and group paths.

use odim_parser::{NodePath, OdimSource};
use tracing::warn;

use crate::error::Result;

/// Paths of the numbered groups in an ODIM file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    prefix: String,
}

impl Layout {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Name of dataset group `i`, e.g. `dataset3`.
    pub fn dataset_name(&self, i: usize) -> String {
        format!("{}{}", self.prefix, i)
    }

    /// `/{prefix}{i}`
    pub fn dataset(&self, i: usize) -> NodePath {
        NodePath::root().join(&self.dataset_name(i))
    }

    /// `/{prefix}{i}/data{j}`
    pub fn data_unit(&self, i: usize, j: usize) -> NodePath {
        self.dataset(i).join(&format!("data{}", j))
    }

    /// The numeric payload below a data unit.
    pub fn payload(unit: &NodePath) -> NodePath {
        unit.join("data")
    }
}

/// Counts datasets and data units by probing for contiguous numbering.
pub struct Enumerator<'a> {
    source: &'a dyn OdimSource,
    layout: &'a Layout,
}

impl<'a> Enumerator<'a> {
    pub fn new(source: &'a dyn OdimSource, layout: &'a Layout) -> Self {
        Self { source, layout }
    }

    /// Number of datasets `1..=n` present without a gap.
    pub fn count_datasets(&self) -> Result<usize> {
        let names = self.source.child_groups(&NodePath::root())?;
        Ok(count_run(&names, self.layout.prefix(), &NodePath::root()))
    }

    /// Number of data units in dataset `i`; 0 for the legacy layout where
    /// the payload hangs directly off the dataset group.
    pub fn count_data_units(&self, i: usize) -> Result<usize> {
        let dataset = self.layout.dataset(i);
        let names = self.source.child_groups(&dataset)?;
        Ok(count_run(&names, "data", &dataset))
    }

    /// Paths of the units holding payloads of dataset `i`.
    ///
    /// Without numbered data units the dataset group itself is the unit.
    pub fn units(&self, i: usize) -> Result<Vec<NodePath>> {
        let n = self.count_data_units(i)?;
        if n == 0 {
            return Ok(vec![self.layout.dataset(i)]);
        }
        Ok((1..=n).map(|j| self.layout.data_unit(i, j)).collect())
    }
}

/// Length of the run `{prefix}1, {prefix}2, ...` among `names`.
fn count_run(names: &[String], prefix: &str, parent: &NodePath) -> usize {
    let numbers: Vec<usize> = names
        .iter()
        .filter_map(|name| name.strip_prefix(prefix))
        .filter(|rest| !rest.starts_with('0') && rest.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|rest| rest.parse().ok())
        .collect();

    let mut n = 0;
    while numbers.contains(&(n + 1)) {
        n += 1;
    }

    if let Some(highest) = numbers.iter().copied().filter(|&k| k > n + 1).max() {
        warn!(
            parent = %parent,
            prefix = prefix,
            found = n,
            highest = highest,
            "Numbering gap, ignoring groups after {}{}",
            prefix,
            n
        );
    }

    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use odim_parser::MemoryFile;

    fn with_datasets(names: &[&str]) -> MemoryFile {
        names
            .iter()
            .fold(MemoryFile::new(), |f, name| f.with_group(format!("/{}/what", name)))
    }

    #[test]
    fn test_counts_contiguous_datasets() {
        let f = with_datasets(&["dataset1", "dataset2", "dataset3"]);
        let layout = Layout::new("dataset");
        assert_eq!(Enumerator::new(&f, &layout).count_datasets().unwrap(), 3);
    }

    #[test]
    fn test_gap_ends_enumeration() {
        let f = with_datasets(&["dataset1", "dataset2", "dataset4"]);
        let layout = Layout::new("dataset");
        assert_eq!(Enumerator::new(&f, &layout).count_datasets().unwrap(), 2);
    }

    #[test]
    fn test_missing_first_dataset() {
        let f = with_datasets(&["dataset2"]);
        let layout = Layout::new("dataset");
        assert_eq!(Enumerator::new(&f, &layout).count_datasets().unwrap(), 0);
    }

    #[test]
    fn test_custom_prefix_and_lookalikes() {
        let f = with_datasets(&["scan1", "scan2", "scanx", "dataset1", "scan01"]);
        let layout = Layout::new("scan");
        assert_eq!(Enumerator::new(&f, &layout).count_datasets().unwrap(), 2);
    }

    #[test]
    fn test_data_units_and_legacy_layout() {
        let f = MemoryFile::new()
            .with_array("/dataset1/data1/data", vec![0.0])
            .with_array("/dataset1/data2/data", vec![0.0])
            .with_attribute("/dataset2/what", "product", "PPI")
            .with_array("/dataset2/data", vec![0.0]);
        let layout = Layout::new("dataset");
        let e = Enumerator::new(&f, &layout);

        assert_eq!(e.count_data_units(1).unwrap(), 2);
        assert_eq!(e.count_data_units(2).unwrap(), 0);
        assert_eq!(
            e.units(1).unwrap(),
            vec![NodePath::parse("/dataset1/data1"), NodePath::parse("/dataset1/data2")]
        );
        assert_eq!(e.units(2).unwrap(), vec![NodePath::parse("/dataset2")]);
    }

    #[test]
    fn test_layout_paths() {
        let layout = Layout::new("dataset");
        assert_eq!(layout.data_unit(2, 3).to_string(), "/dataset2/data3");
        assert_eq!(
            Layout::payload(&layout.data_unit(1, 1)).to_string(),
            "/dataset1/data1/data"
        );
    }
}
