//! Locating the data body relative to the headers.

use super::axis::Axis;
use super::compile::Header;
use super::range::CellRange;
use crate::error::{ConvertError, Result};

/// Rectangle holding data values.
///
/// - no header: the whole extent;
/// - both headers: the span of data indices on each axis;
/// - one header: everything past the header on the other axis, limited to
///   the header's own span. The header must lie within `extent`.
///
/// `Ok(None)` means there is no room left for data.
pub fn reconcile(
    extent: CellRange,
    col: Option<&Header>,
    row: Option<&Header>,
) -> Result<Option<CellRange>> {
    match (col, row) {
        (None, None) => Ok(Some(extent)),
        (Some(col), Some(row)) => {
            let (Some(cols), Some(rows)) = (col.index_bounds(), row.index_bounds()) else {
                return Ok(None);
            };
            Ok(Axis::Col.range(cols, rows))
        }
        (Some(header), None) | (None, Some(header)) => remainder(extent, header),
    }
}

fn remainder(extent: CellRange, header: &Header) -> Result<Option<CellRange>> {
    let Some(bounds) = header.extent() else {
        return Ok(None);
    };
    if !extent.contains(&bounds) {
        return Err(ConvertError::HeaderOutOfBounds {
            axis: header.axis,
            header: bounds,
            extent,
        });
    }

    let axis = header.axis;
    let other = axis.other();
    Ok(axis.range(
        (axis.of(bounds.start), axis.of(bounds.end)),
        (other.of(bounds.end) + 1, other.of(extent.end)),
    ))
}
