//! Copying cartesian payloads into the artifact.
//!
//! ODIM images are stored with the first row at the top (north), while the
//! artifact numbers rows from the south, so every payload is flipped
//! vertically on the way in.

use odim_parser::NodePath;
use tracing::debug;

use crate::artifact::Artifact;
use crate::enumerate::{Enumerator, Layout};
use crate::error::{ConversionError, Result};
use crate::param_model::{unit_parameter, UnitParameter};
use crate::resolver::Resolver;
use crate::time_model::valid_time;

/// Conversion from stored values to physical values.
///
/// Declared `nodata` becomes missing, declared `undetect` becomes the
/// physical value of a raw zero, anything else is scaled linearly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValueTransform {
    pub nodata: Option<f64>,
    pub undetect: Option<f64>,
    pub gain: Option<f64>,
    pub offset: Option<f64>,
}

impl ValueTransform {
    /// Look up `nodata`, `undetect`, `gain` and `offset` from a data unit.
    pub fn read(resolver: &Resolver<'_>, unit: &NodePath) -> Result<Self> {
        Ok(Self {
            nodata: resolver.optional_f64(unit, "what", "nodata")?,
            undetect: resolver.optional_f64(unit, "what", "undetect")?,
            gain: resolver.optional_f64(unit, "what", "gain")?,
            offset: resolver.optional_f64(unit, "what", "offset")?,
        })
    }

    pub fn apply(&self, raw: f64) -> f32 {
        if self.nodata == Some(raw) {
            Artifact::MISSING
        } else if self.undetect == Some(raw) {
            self.scale(0.0)
        } else {
            self.scale(raw)
        }
    }

    fn scale(&self, value: f64) -> f32 {
        (value * self.gain.unwrap_or(1.0) + self.offset.unwrap_or(0.0)) as f32
    }
}

/// Write a north-up `width` × `height` payload into a south-up slice.
pub fn copy_flipped(
    values: &[f64],
    width: usize,
    height: usize,
    transform: &ValueTransform,
    target: &mut [f32],
) {
    for (j, row) in target.chunks_exact_mut(width).take(height).enumerate() {
        let source = &values[(height - 1 - j) * width..(height - j) * width];
        for (cell, &raw) in row.iter_mut().zip(source) {
            *cell = transform.apply(raw);
        }
    }
}

/// Level slot of a data unit: the index of its `prodpar` for level-bearing
/// products, otherwise 0.
fn level_index(resolver: &Resolver<'_>, artifact: &Artifact, unit: &NodePath, up: &UnitParameter) -> Result<usize> {
    if !up.product.has_level() {
        return Ok(0);
    }

    let prodpar = resolver.lookup_f64(unit, "what", "prodpar")?;
    artifact
        .descriptor()
        .levels
        .index_of(prodpar)
        .ok_or_else(|| {
            ConversionError::inconsistent_levels(format!(
                "{} level {} of {} is not on the level axis",
                up.product, prodpar, unit
            ))
        })
}

pub(crate) fn param_index(artifact: &Artifact, unit: &NodePath, up: &UnitParameter) -> Result<usize> {
    artifact
        .descriptor()
        .params
        .index_of(up.parameter)
        .ok_or_else(|| ConversionError::UnsupportedParameter {
            product: up.product.to_string(),
            quantity: up.quantity.clone(),
            detail: format!(" in {} (not on the parameter axis)", unit),
        })
}

/// Copy every cartesian dataset of the file into the artifact.
///
/// Dataset `i` is written at the slot of its valid time, so datasets sharing
/// a valid time fill the same time step.
pub fn copy_datasets(
    resolver: &Resolver<'_>,
    layout: &Layout,
    datasets: usize,
    artifact: &mut Artifact,
) -> Result<()> {
    let enumerator = Enumerator::new(resolver.source(), layout);
    let width = artifact.descriptor().grid.nx();
    let height = artifact.descriptor().grid.ny();

    for i in 1..=datasets {
        let stamp = valid_time(resolver, layout, i)?;
        let time = artifact
            .descriptor()
            .time
            .index_of(stamp)
            .ok_or_else(|| ConversionError::TimeNotOnAxis {
                path: layout.dataset(i),
                time: stamp,
            })?;

        for (part, unit) in enumerator.units(i)?.into_iter().enumerate() {
            let up = unit_parameter(resolver, &unit)?;
            let param = param_index(artifact, &unit, &up)?;
            let level = level_index(resolver, artifact, &unit, &up)?;
            let transform = ValueTransform::read(resolver, &unit)?;

            debug!(
                dataset = i,
                part = part + 1,
                valid_time = %stamp,
                "Copying dataset {} part {} with valid time {}",
                i,
                part + 1,
                stamp
            );

            let payload = Layout::payload(&unit);
            debug!(path = %payload, "Reading payload");
            let values = resolver.source().read_array(&payload)?;

            if values.len() != width * height {
                return Err(ConversionError::ShapeMismatch {
                    path: payload,
                    expected: width * height,
                    actual: values.len(),
                });
            }

            copy_flipped(&values, width, height, &transform, artifact.slice_mut(time, param, level));
        }
    }

    Ok(())
}
