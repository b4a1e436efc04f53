//! Top-level structure checks run before any other work.

use odim_parser::NodePath;

use crate::enumerate::Layout;
use crate::error::{ConversionError, Result};
use crate::resolver::Resolver;

/// Confirm that the source has the groups and attributes every ODIM file
/// must carry: `/what` with `date` and `time`, the first dataset and `/where`.
pub fn validate_schema(resolver: &Resolver<'_>, layout: &Layout) -> Result<()> {
    let source = resolver.source();
    let what = NodePath::parse("/what");

    if !source.has_group(&what)? {
        return Err(ConversionError::schema("/what group missing"));
    }

    for name in ["date", "time"] {
        if !resolver.has_attribute(&what, name)? {
            return Err(ConversionError::schema(format!("/what.{} missing", name)));
        }
    }

    let first = layout.dataset(1);
    if !source.has_group(&first)? {
        return Err(ConversionError::schema(format!("{} group missing", first)));
    }

    if !source.has_group(&NodePath::parse("/where"))? {
        return Err(ConversionError::schema("/where group missing"));
    }

    Ok(())
}
