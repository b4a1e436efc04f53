//! Human readable dump of an input file.

use odim_parser::{NodePath, OdimSource};
use tracing::{info, warn};

use crate::enumerate::{Enumerator, Layout};
use crate::error::Result;

const METADATA_GROUPS: [&str; 3] = ["what", "where", "how"];

/// Log every attribute of the metadata groups of the file: the top level
/// groups, those of each dataset and those of each data unit.
pub fn log_file_summary(source: &dyn OdimSource, layout: &Layout) -> Result<()> {
    let enumerator = Enumerator::new(source, layout);
    let datasets = enumerator.count_datasets()?;

    info!(source = %source.describe(), datasets, "Number of datasets: {}", datasets);

    log_metadata(source, &NodePath::root())?;

    for i in 1..=datasets {
        let dataset = layout.dataset(i);
        log_metadata(source, &dataset)?;

        for j in 1..=enumerator.count_data_units(i)? {
            log_metadata(source, &layout.data_unit(i, j))?;
        }
    }

    Ok(())
}

fn log_metadata(source: &dyn OdimSource, parent: &NodePath) -> Result<()> {
    for group in METADATA_GROUPS {
        log_group_attributes(source, &parent.join(group))?;
    }
    Ok(())
}

/// Log the attributes of one group; missing groups are skipped.
///
/// Attributes the source cannot represent (array valued `how` attributes
/// for instance) are reported and skipped.
pub fn log_group_attributes(source: &dyn OdimSource, path: &NodePath) -> Result<()> {
    if !source.has_group(path)? {
        return Ok(());
    }

    info!(group = %path, "Opened {}", path);

    for name in source.attribute_names(path)? {
        match source.attribute(path, &name) {
            Ok(Some(value)) => info!(
                "Attribute: {}/{} ( {} ) = {}",
                path,
                name,
                value.type_name(),
                value
            ),
            Ok(None) => {}
            Err(e) => warn!(group = %path, attribute = %name, error = %e, "Unreadable attribute"),
        }
    }

    Ok(())
}
