//! Working extent of a sheet.

use std::fmt;

use super::cell_ref::CellRef;
use super::range::{CellRange, bounding_box};
use super::sheet::Sheet;
use crate::error::{ConvertError, Diagnostics, Result};

/// Fallback extent used when a sheet declares none.
pub enum DefaultRange {
    /// Computed from the sheet.
    Rule(Box<dyn Fn(&Sheet) -> Option<CellRange>>),
    Range(CellRange),
    /// A range in A1 notation, checked when it is used.
    Text(String),
}

impl fmt::Debug for DefaultRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultRange::Rule(_) => f.write_str("Rule(..)"),
            DefaultRange::Range(range) => f.debug_tuple("Range").field(range).finish(),
            DefaultRange::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

/// Resolve the rectangle a conversion works on.
///
/// Order: the sheet's declared extent, then `default_range`, then the
/// bounding box of occupied cells. `Ok(None)` means the sheet is empty.
pub fn resolve_extent(
    sheet: &Sheet,
    default_range: Option<&DefaultRange>,
    diagnostics: &mut Diagnostics,
) -> Result<Option<CellRange>> {
    if let Some(reference) = sheet.reference.as_deref() {
        return CellRange::decode(reference).map(Some);
    }

    match default_range {
        Some(DefaultRange::Rule(rule)) => return Ok(rule(sheet)),
        Some(DefaultRange::Range(range)) => return Ok(Some(*range)),
        Some(DefaultRange::Text(text)) => match CellRange::decode(text) {
            Ok(range) => return Ok(Some(range)),
            Err(_) => diagnostics.recover(ConvertError::InvalidDefaultRange(text.clone()), ())?,
        },
        None => {}
    }

    occupied_extent(sheet)
}

/// Bounding box of every occupied, non-metadata cell key.
pub fn occupied_extent(sheet: &Sheet) -> Result<Option<CellRange>> {
    let mut points = Vec::with_capacity(sheet.cells.len());
    for entry in sheet.cells.iter() {
        let key = entry.key();
        if key.starts_with('!') {
            continue;
        }
        points.push(CellRef::decode(key)?);
    }
    Ok(bounding_box(points))
}
