//! Main Converter struct driving a conversion from source to artifact.

use std::path::Path;

use odim_parser::OdimSource;
use radar_common::ParameterTable;
use tracing::{debug, info, warn};

use crate::artifact::{Artifact, ArtifactDescriptor};
use crate::config::ConversionOptions;
use crate::copy::copy_datasets;
use crate::enumerate::{Enumerator, Layout};
use crate::error::{ConversionError, Result};
use crate::grid_model::build_grid;
use crate::inspect::log_file_summary;
use crate::level_model::build_level_axis;
use crate::object::ObjectKind;
use crate::param_model::build_param_axis;
use crate::polar::resample_volume;
use crate::reproject::{parse_target, reproject};
use crate::resolver::Resolver;
use crate::time_model::build_time_axis;
use crate::validate::validate_schema;

/// Converts ODIM sources into artifacts.
///
/// A run validates the file, builds the time, parameter, level and grid
/// axes, allocates the artifact once, fills it by copying cartesian payloads
/// or resampling polar sweeps, and optionally reprojects the result.
pub struct Converter {
    options: ConversionOptions,
    table: ParameterTable,
    layout: Layout,
}

impl Converter {
    /// Create a new Converter with the standard parameter names.
    pub fn new(options: ConversionOptions) -> Self {
        let layout = Layout::new(options.dataset_prefix.clone());
        Self {
            options,
            table: ParameterTable::standard(),
            layout,
        }
    }

    /// Use a different parameter naming table.
    pub fn with_parameter_table(mut self, table: ParameterTable) -> Self {
        self.table = table;
        self
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Open `path` and convert it.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<Artifact> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening file");
        let source = odim_parser::open_source(path)?;
        self.convert(&*source)
    }

    /// Convert an opened source.
    pub fn convert(&self, source: &dyn OdimSource) -> Result<Artifact> {
        self.options.validate().map_err(ConversionError::InvalidConfig)?;

        let resolver = Resolver::new(source);
        validate_schema(&resolver, &self.layout)?;

        if self.options.verbose {
            if let Err(e) = log_file_summary(source, &self.layout) {
                warn!(error = %e, "File summary incomplete");
            }
        }

        // Parse the output area before any real work so syntax errors surface fast
        let target = self.options.projection.as_deref().map(parse_target).transpose()?;

        let object = ObjectKind::read(&resolver)?;
        let datasets = self.count_datasets(source)?;
        let descriptor = self.build_descriptor(&resolver, object, datasets)?;

        let cells = descriptor.cell_count()?;
        debug!(shape = ?descriptor.shape(), cells, "Allocating artifact");
        let mut artifact = Artifact::allocate(descriptor, self.options.producer.clone())?;

        match object {
            ObjectKind::Pvol => resample_volume(&resolver, &self.layout, datasets, &mut artifact)?,
            _ => copy_datasets(&resolver, &self.layout, datasets, &mut artifact)?,
        }

        info!(
            source = %source.describe(),
            object = %object,
            shape = ?artifact.shape(),
            present = artifact.count_present(),
            "Converted"
        );

        match target {
            Some(target) => reproject(&artifact, &target),
            None => Ok(artifact),
        }
    }

    /// Build the four axes of the artifact without reading any payload.
    pub fn describe(&self, source: &dyn OdimSource) -> Result<ArtifactDescriptor> {
        let resolver = Resolver::new(source);
        validate_schema(&resolver, &self.layout)?;
        let object = ObjectKind::read(&resolver)?;
        let datasets = self.count_datasets(source)?;
        self.build_descriptor(&resolver, object, datasets)
    }

    fn count_datasets(&self, source: &dyn OdimSource) -> Result<usize> {
        Enumerator::new(source, &self.layout).count_datasets()
    }

    fn build_descriptor(
        &self,
        resolver: &Resolver<'_>,
        object: ObjectKind,
        datasets: usize,
    ) -> Result<ArtifactDescriptor> {
        debug!(datasets, object = %object, "Enumerated datasets");

        let time = build_time_axis(resolver, &self.layout, datasets)?;
        let params = build_param_axis(resolver, &self.layout, datasets, &self.table)?;
        let levels = build_level_axis(resolver, &self.layout, datasets, object)?;
        let grid = build_grid(resolver, &self.layout, datasets, object)?;

        Ok(ArtifactDescriptor {
            time,
            params,
            levels,
            grid,
        })
    }
}
