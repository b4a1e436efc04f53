//! Parameter axis construction.
//!
//! Every data unit declares a product and a quantity; together they name a
//! canonical parameter. The composite probability product is further split
//! by its `threshold_id`.

use std::collections::BTreeSet;

use grid_processor::InterpolationMethod;
use odim_parser::NodePath;
use radar_common::{CanonicalParameter, ParameterTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::enumerate::{Enumerator, Layout};
use crate::error::{ConversionError, Result};
use crate::object::ProductKind;
use crate::resolver::Resolver;

/// One parameter of the output artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamEntry {
    pub id: u32,
    pub parameter: CanonicalParameter,
    pub name: String,
    pub interpolation: InterpolationMethod,
}

/// Unique parameters ordered by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParamAxis {
    pub params: Vec<ParamEntry>,
}

impl ParamAxis {
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn index_of(&self, parameter: CanonicalParameter) -> Option<usize> {
        self.params.iter().position(|p| p.parameter == parameter)
    }
}

/// Product, quantity and resulting parameter of one data unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitParameter {
    pub product: ProductKind,
    pub quantity: String,
    pub parameter: CanonicalParameter,
}

/// Map a (product, quantity) pair to its canonical parameter.
///
/// `threshold_id` is only consulted for the composite probability product.
pub fn map_parameter(
    product: ProductKind,
    quantity: &str,
    threshold_id: impl FnOnce() -> Result<i64>,
) -> Result<CanonicalParameter> {
    use CanonicalParameter as P;
    use ProductKind as K;

    let parameter = match (product, quantity) {
        (K::Ppi | K::Cappi | K::Pcappi | K::Scan, "TH") => P::Reflectivity,
        (K::Ppi | K::Cappi | K::Pcappi, "DBZ") => P::Reflectivity,
        (K::Ppi | K::Cappi | K::Pcappi | K::Scan, "DBZH") => P::CorrectedReflectivity,
        (K::Ppi | K::Cappi | K::Pcappi | K::Scan, "VRAD") => P::RadialVelocity,
        (K::Ppi | K::Cappi | K::Pcappi | K::Scan, "WRAD" | "W") => P::SpectralWidth,
        (K::Etop, "HGHT") => P::EchoTop,
        (K::Max, "TH") => P::Reflectivity,
        (K::Max, "DBZH") => P::CorrectedReflectivity,
        (K::Rr | K::Vil, "ACRR") => P::PrecipitationAmount,
        (K::Scan, "ZDR") => P::DifferentialReflectivity,
        (K::Scan, "KDP") => P::SpecificDifferentialPhase,
        (K::Scan, "PHIDP") => P::DifferentialPhase,
        (K::Scan, "SQI") => P::SignalQualityIndex,
        (K::Scan, "RHOHV") => P::ReflectivityCorrelation,
        (K::Comp, "RATE") => P::PrecipitationRate,
        (K::Comp, "BRDR") => P::RadarBorder,
        (K::Comp, "TH") => P::Reflectivity,
        (K::Comp, "DBZH") => P::CorrectedReflectivity,
        (K::Comp, "PROB") => {
            let limit = threshold_id()?;
            P::probability_of_prec(limit).ok_or_else(|| ConversionError::UnsupportedParameter {
                product: product.to_string(),
                quantity: quantity.to_string(),
                detail: format!(" with threshold_id {} outside range 0-10", limit),
            })?
        }
        _ => return Err(ConversionError::unsupported_parameter(product.as_str(), quantity)),
    };

    Ok(parameter)
}

/// Resolve the parameter of the data unit at `unit`.
///
/// `product`, `quantity` and `threshold_id` are looked up in `what` groups
/// from the unit towards the root.
pub fn unit_parameter(resolver: &Resolver<'_>, unit: &NodePath) -> Result<UnitParameter> {
    let product: ProductKind = resolver.lookup_string(unit, "what", "product")?.parse()?;
    let quantity = resolver.lookup_string(unit, "what", "quantity")?;

    let parameter = map_parameter(product, &quantity, || {
        resolver.lookup_i64(unit, "what", "threshold_id")
    })?;

    Ok(UnitParameter {
        product,
        quantity,
        parameter,
    })
}

/// Collect the parameters of every data unit of every dataset.
pub fn build_param_axis(
    resolver: &Resolver<'_>,
    layout: &Layout,
    datasets: usize,
    table: &ParameterTable,
) -> Result<ParamAxis> {
    let enumerator = Enumerator::new(resolver.source(), layout);
    let mut found = BTreeSet::new();

    for i in 1..=datasets {
        for unit in enumerator.units(i)? {
            let up = unit_parameter(resolver, &unit)?;
            debug!(
                unit = %unit,
                product = %up.product,
                quantity = %up.quantity,
                parameter = %table.display_name(up.parameter),
                "Product: {} Quantity: {} Parameter: {}",
                up.product,
                up.quantity,
                table.display_name(up.parameter)
            );
            found.insert((up.parameter.id(), up.parameter));
        }
    }

    let params: Vec<ParamEntry> = found
        .into_iter()
        .map(|(id, parameter)| ParamEntry {
            id,
            parameter,
            name: table.display_name(parameter),
            interpolation: InterpolationMethod::Bilinear,
        })
        .collect();

    info!(
        count = params.len(),
        params = ?params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        "Built parameter axis"
    );

    Ok(ParamAxis { params })
}
