//! Optional move of a finished artifact onto another grid.

use grid_processor::resample_between_grids;
use projection::{AreaSpec, ProjectedGrid};
use tracing::info;

use crate::artifact::{missing_buffer, Artifact};
use crate::error::Result;

/// Parse an output area, `<projdef>:<LL_lon>,<LL_lat>,<UR_lon>,<UR_lat>[:<w>,<h>]`.
pub fn parse_target(spec: &str) -> Result<AreaSpec> {
    Ok(spec.parse::<AreaSpec>()?)
}

/// Grid described by `target`; without an explicit size the source size is kept.
pub fn target_grid(target: &AreaSpec, source: &ProjectedGrid) -> Result<ProjectedGrid> {
    let (nx, ny) = target.size.unwrap_or((source.nx(), source.ny()));
    Ok(ProjectedGrid::new(target.area.clone(), nx, ny)?)
}

/// Resample every (time, parameter, level) slice onto the target grid,
/// using each parameter's interpolation method.
pub fn reproject(artifact: &Artifact, target: &AreaSpec) -> Result<Artifact> {
    let source = &artifact.descriptor().grid;
    let grid = target_grid(target, source)?;
    let descriptor = artifact.descriptor().with_grid(grid);

    let mut values = missing_buffer(descriptor.cell_count()?)?;
    let [nt, np, nl, _] = artifact.shape();
    let slice_len = descriptor.grid.len();

    for t in 0..nt {
        for (p, param) in artifact.descriptor().params.params.iter().enumerate() {
            for l in 0..nl {
                let resampled = resample_between_grids(
                    artifact.slice(t, p, l),
                    source,
                    &descriptor.grid,
                    param.interpolation,
                )?;
                let start = ((t * np + p) * nl + l) * slice_len;
                values[start..start + slice_len].copy_from_slice(&resampled);
            }
        }
    }

    info!(
        projection = %descriptor.grid.area().projection().to_projdef(),
        nx = descriptor.grid.nx(),
        ny = descriptor.grid.ny(),
        "Reprojected artifact"
    );

    Artifact::from_values(descriptor, artifact.producer().clone(), values)
}
