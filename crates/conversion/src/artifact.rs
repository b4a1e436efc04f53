//! The 4-D output artifact.
//!
//! Values are stored in one flat buffer addressed by
//! `(time, parameter, level, location)`, with the location varying fastest:
//!
//! ```text
//! index = ((t * n_params + p) * n_levels + l) * n_locations + location
//! ```

use projection::{GridDescription, ProjectedGrid};
use radar_common::Producer;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ConversionError, Result};
use crate::level_model::LevelAxis;
use crate::param_model::ParamAxis;
use crate::time_model::TimeAxis;

/// The four axes that fix the shape of an artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactDescriptor {
    pub time: TimeAxis,
    pub params: ParamAxis,
    pub levels: LevelAxis,
    pub grid: ProjectedGrid,
}

impl ArtifactDescriptor {
    /// Axis sizes as `[time, param, level, location]`.
    pub fn shape(&self) -> [usize; 4] {
        [
            self.time.len(),
            self.params.len(),
            self.levels.slots(),
            self.grid.len(),
        ]
    }

    /// Total number of cells, failing when it does not fit in memory.
    pub fn cell_count(&self) -> Result<usize> {
        let shape = self.shape();
        shape
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or(ConversionError::AllocationFailure { cells: usize::MAX })
    }

    /// Same axes over a different grid.
    pub fn with_grid(&self, grid: ProjectedGrid) -> Self {
        Self {
            time: self.time.clone(),
            params: self.params.clone(),
            levels: self.levels.clone(),
            grid,
        }
    }
}

/// A fully allocated artifact.
#[derive(Debug, Clone)]
pub struct Artifact {
    descriptor: ArtifactDescriptor,
    producer: Producer,
    values: Vec<f32>,
}

impl Artifact {
    /// Sentinel for cells without data.
    pub const MISSING: f32 = f32::NAN;

    /// Allocate an artifact with every cell missing.
    pub fn allocate(descriptor: ArtifactDescriptor, producer: Producer) -> Result<Self> {
        let cells = descriptor.cell_count()?;
        let values = missing_buffer(cells)?;
        Ok(Self {
            descriptor,
            producer,
            values,
        })
    }

    /// Build an artifact from existing values.
    pub fn from_values(descriptor: ArtifactDescriptor, producer: Producer, values: Vec<f32>) -> Result<Self> {
        let cells = descriptor.cell_count()?;
        if values.len() != cells {
            return Err(ConversionError::ValueCountMismatch {
                shape: descriptor.shape(),
                expected: cells,
                actual: values.len(),
            });
        }
        Ok(Self {
            descriptor,
            producer,
            values,
        })
    }

    pub fn is_missing(value: f32) -> bool {
        value.is_nan()
    }

    pub fn descriptor(&self) -> &ArtifactDescriptor {
        &self.descriptor
    }

    pub fn producer(&self) -> &Producer {
        &self.producer
    }

    pub fn shape(&self) -> [usize; 4] {
        self.descriptor.shape()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Flat index of a cell. Panics on out of range coordinates in debug builds.
    pub fn index(&self, time: usize, param: usize, level: usize, location: usize) -> usize {
        let [nt, np, nl, nloc] = self.shape();
        debug_assert!(time < nt && param < np && level < nl && location < nloc);
        ((time * np + param) * nl + level) * nloc + location
    }

    pub fn get(&self, time: usize, param: usize, level: usize, location: usize) -> Option<f32> {
        self.in_range(time, param, level, location)
            .then(|| self.values[self.index(time, param, level, location)])
    }

    pub fn set(&mut self, time: usize, param: usize, level: usize, location: usize, value: f32) {
        let idx = self.index(time, param, level, location);
        self.values[idx] = value;
    }

    /// All locations of one (time, parameter, level) slice.
    pub fn slice(&self, time: usize, param: usize, level: usize) -> &[f32] {
        let start = self.index(time, param, level, 0);
        &self.values[start..start + self.descriptor.grid.len()]
    }

    pub fn slice_mut(&mut self, time: usize, param: usize, level: usize) -> &mut [f32] {
        let start = self.index(time, param, level, 0);
        let n = self.descriptor.grid.len();
        &mut self.values[start..start + n]
    }

    /// Number of cells holding data.
    pub fn count_present(&self) -> usize {
        self.values.iter().filter(|v| !Self::is_missing(**v)).count()
    }

    fn in_range(&self, time: usize, param: usize, level: usize, location: usize) -> bool {
        let [nt, np, nl, nloc] = self.shape();
        time < nt && param < np && level < nl && location < nloc
    }
}

/// Allocate `cells` missing values without aborting on exhaustion.
pub(crate) fn missing_buffer(cells: usize) -> Result<Vec<f32>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(cells)
        .map_err(|_| ConversionError::AllocationFailure { cells })?;
    values.resize(cells, Artifact::MISSING);
    Ok(values)
}

/// Serialized form of an [`Artifact`]. Missing values are written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactDocument {
    pub producer: Producer,
    pub time: TimeAxis,
    pub params: ParamAxis,
    pub levels: LevelAxis,
    pub grid: GridDescription,
    pub shape: [usize; 4],
    pub values: Vec<Option<f32>>,
}

#[derive(Serialize)]
struct ArtifactView<'a> {
    producer: &'a Producer,
    time: &'a TimeAxis,
    params: &'a ParamAxis,
    levels: &'a LevelAxis,
    grid: GridDescription,
    shape: [usize; 4],
    #[serde(serialize_with = "serialize_values")]
    values: &'a [f32],
}

fn serialize_values<S: Serializer>(values: &&[f32], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(
        values
            .iter()
            .map(|v| if Artifact::is_missing(*v) { None } else { Some(*v) }),
    )
}

impl Serialize for Artifact {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ArtifactView {
            producer: &self.producer,
            time: &self.descriptor.time,
            params: &self.descriptor.params,
            levels: &self.descriptor.levels,
            grid: self.descriptor.grid.describe(),
            shape: self.shape(),
            values: &self.values,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use grid_processor::InterpolationMethod;
    use projection::{Area, Projection};
    use radar_common::{CanonicalParameter, GeoPoint};

    use crate::param_model::ParamEntry;

    fn descriptor(times: usize, params: usize) -> ArtifactDescriptor {
        let origin = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let area = Area::from_corners(
            Projection::latlon(),
            GeoPoint::new(20.0, 60.0),
            GeoPoint::new(22.0, 61.0),
        )
        .unwrap();

        ArtifactDescriptor {
            time: TimeAxis {
                origin,
                times: vec![origin; times],
            },
            params: ParamAxis {
                params: CanonicalParameter::ALL[..params]
                    .iter()
                    .map(|&p| ParamEntry {
                        id: p.id(),
                        parameter: p,
                        name: p.default_name().to_string(),
                        interpolation: InterpolationMethod::Bilinear,
                    })
                    .collect(),
            },
            levels: LevelAxis::default(),
            grid: ProjectedGrid::new(area, 3, 2).unwrap(),
        }
    }

    #[test]
    fn test_allocation_is_all_missing() {
        let a = Artifact::allocate(descriptor(2, 3), Producer::default()).unwrap();
        assert_eq!(a.shape(), [2, 3, 1, 6]);
        assert_eq!(a.values().len(), 36);
        assert_eq!(a.count_present(), 0);
    }

    #[test]
    fn test_index_is_location_fastest() {
        let mut a = Artifact::allocate(descriptor(2, 3), Producer::default()).unwrap();
        assert_eq!(a.index(0, 0, 0, 5), 5);
        assert_eq!(a.index(0, 1, 0, 0), 6);
        assert_eq!(a.index(1, 0, 0, 0), 18);

        a.set(1, 2, 0, 4, 7.5);
        assert_eq!(a.get(1, 2, 0, 4), Some(7.5));
        assert_eq!(a.slice(1, 2, 0)[4], 7.5);
        assert_eq!(a.get(2, 0, 0, 0), None);
        assert_eq!(a.count_present(), 1);
    }

    #[test]
    fn test_from_values_checks_count() {
        let a = Artifact::from_values(descriptor(1, 2), Producer::default(), vec![1.0; 12]).unwrap();
        assert_eq!(a.count_present(), 12);

        let err = Artifact::from_values(descriptor(1, 2), Producer::default(), vec![1.0; 11]).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::ValueCountMismatch {
                shape: [1, 2, 1, 6],
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_overflowing_shape_fails() {
        let mut d = descriptor(32, 1);
        d.grid = ProjectedGrid::new(d.grid.area().clone(), 1 << 30, 1 << 30).unwrap();
        assert!(matches!(
            Artifact::allocate(d, Producer::default()),
            Err(ConversionError::AllocationFailure { .. })
        ));
    }

    #[test]
    fn test_unsatisfiable_allocation_fails() {
        let mut d = descriptor(1, 1);
        d.grid = ProjectedGrid::new(d.grid.area().clone(), 1 << 30, 1 << 30).unwrap();
        assert!(matches!(
            Artifact::allocate(d, Producer::default()),
            Err(ConversionError::AllocationFailure { cells }) if cells == 1 << 60
        ));
    }

    #[test]
    fn test_missing_serializes_as_null() {
        let mut a = Artifact::allocate(descriptor(1, 1), Producer::new(2001, "TEST")).unwrap();
        a.set(0, 0, 0, 0, 1.5);

        let json = serde_json::to_string(&a).unwrap();
        let doc: ArtifactDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(doc.producer, Producer::new(2001, "TEST"));
        assert_eq!(doc.shape, [1, 1, 1, 6]);
        assert_eq!(doc.values[0], Some(1.5));
        assert!(doc.values[1..].iter().all(Option::is_none));
        assert_eq!(doc.grid.nx, 3);
    }
}
