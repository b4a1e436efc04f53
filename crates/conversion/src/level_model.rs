//! Vertical axis construction.
//!
//! Products whose `prodpar` describes a level:
//!
//! | product | prodpar | level kind |
//! |---|---|---|
//! | CAPPI, PCAPPI | layer height above the radar (m) | Height |
//! | PPI | elevation angle (deg) | Any |
//! | ETOP | reflectivity limit (dBZ) | Any |
//! | RHI | azimuth angle (deg) | Any |
//!
//! Polar volumes use the `where.elangle` of each sweep instead.

use radar_common::{Level, LevelKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::enumerate::Layout;
use crate::error::{ConversionError, Result};
use crate::object::{ObjectKind, ProductKind};
use crate::resolver::Resolver;

const LEVEL_TOLERANCE: f64 = 1e-9;

/// Unique, ascending levels of a single kind. May be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelAxis {
    pub levels: Vec<Level>,
}

impl LevelAxis {
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of level slots in the artifact; an empty axis still has one.
    pub fn slots(&self) -> usize {
        self.levels.len().max(1)
    }

    pub fn index_of(&self, value: f64) -> Option<usize> {
        self.levels
            .iter()
            .position(|l| (l.value - value).abs() <= LEVEL_TOLERANCE)
    }

    fn from_values(kind: LevelKind, values: Vec<f64>, name: impl Fn(f64) -> String) -> Self {
        let levels = unique_sorted(values)
            .into_iter()
            .map(|v| Level::new(kind, name(v), v))
            .collect();
        Self { levels }
    }
}

/// Build the level axis for the given object kind.
pub fn build_level_axis(
    resolver: &Resolver<'_>,
    layout: &Layout,
    datasets: usize,
    object: ObjectKind,
) -> Result<LevelAxis> {
    let axis = match object {
        ObjectKind::Comp | ObjectKind::Cvol | ObjectKind::Scan | ObjectKind::Image => {
            product_levels(resolver, layout, datasets)?
        }
        ObjectKind::Pvol => elevation_levels(resolver, layout, datasets)?,
        ObjectKind::Ray | ObjectKind::Azim | ObjectKind::Xsec | ObjectKind::Vp | ObjectKind::Pic => {
            return Err(object.unsupported())
        }
    };

    info!(
        count = axis.len(),
        kind = ?axis.levels.first().map(|l| l.kind),
        values = ?axis.levels.iter().map(|l| l.value).collect::<Vec<_>>(),
        "Built level axis"
    );

    Ok(axis)
}

fn product_levels(resolver: &Resolver<'_>, layout: &Layout, datasets: usize) -> Result<LevelAxis> {
    let mut common: Option<ProductKind> = None;
    let mut has_levels = false;
    let mut has_non_levels = false;

    for i in 1..=datasets {
        let product: ProductKind = resolver
            .lookup_string(&layout.dataset(i), "what", "product")?
            .parse()?;

        if product.has_level() {
            has_levels = true;
        } else {
            has_non_levels = true;
        }

        match common {
            None => common = Some(product),
            Some(first) if product.has_level() && first != product => {
                return Err(ConversionError::inconsistent_levels(format!(
                    "cannot have different kinds of products when level data is used: {} and {}",
                    first, product
                )));
            }
            Some(_) => {}
        }
    }

    if has_levels && has_non_levels {
        return Err(ConversionError::inconsistent_levels(
            "cannot mix non-level type parameters with level type parameters",
        ));
    }

    let (Some(product), Some(kind)) = (common, common.and_then(|p| p.level_kind())) else {
        return Ok(LevelAxis::default());
    };

    let mut values = Vec::with_capacity(datasets);
    for i in 1..=datasets {
        let prodpar = resolver.lookup_f64(&layout.dataset(i), "what", "prodpar")?;
        debug!(dataset = i, prodpar, "Level value");
        values.push(prodpar);
    }

    Ok(LevelAxis::from_values(kind, values, |_| product.to_string()))
}

fn elevation_levels(resolver: &Resolver<'_>, layout: &Layout, datasets: usize) -> Result<LevelAxis> {
    let mut angles = Vec::with_capacity(datasets);
    for i in 1..=datasets {
        let angle = resolver.read_f64(&layout.dataset(i).join("where"), "elangle")?;
        debug!(dataset = i, elangle = angle, "Elevation angle");
        angles.push(angle);
    }

    Ok(LevelAxis::from_values(LevelKind::NoLevel, angles, elevation_name))
}

/// Level name of a volume sweep.
pub fn elevation_name(angle: f64) -> String {
    format!("Elevation angle {}", angle)
}

fn unique_sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() <= LEVEL_TOLERANCE);
    values
}
