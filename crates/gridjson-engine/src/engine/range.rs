//! Rectangular ranges and the geometry the header engine needs.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cell_ref::CellRef;
use crate::error::{ConvertError, Result};

/// An inclusive rectangle of cells with `start` at the top-left.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    /// Construct a range from two corners, normalizing their order.
    pub fn new(a: CellRef, b: CellRef) -> Self {
        CellRange {
            start: CellRef::new(a.col.min(b.col), a.row.min(b.row)),
            end: CellRef::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }

    /// Construct a range from its top-left and bottom-right corners, or
    /// `None` if the corners are out of order on either axis.
    pub fn new_checked(start: CellRef, end: CellRef) -> Option<Self> {
        (start.col <= end.col && start.row <= end.row).then_some(CellRange { start, end })
    }

    /// The 1x1 range covering a single cell.
    pub const fn cell(at: CellRef) -> Self {
        CellRange { start: at, end: at }
    }

    /// Parse "A1:C5". Anything other than exactly two colon-separated
    /// addresses is malformed.
    pub fn decode(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split(':').collect();
        let [start, end] = parts.as_slice() else {
            return Err(ConvertError::MalformedRange(text.to_string()));
        };
        let (Ok(start), Ok(end)) = (CellRef::decode(start), CellRef::decode(end)) else {
            return Err(ConvertError::MalformedRange(text.to_string()));
        };
        Ok(CellRange::new(start, end))
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// True if `inner` lies entirely within this range.
    pub fn contains(&self, inner: &CellRange) -> bool {
        self.contains_cell(inner.start) && self.contains_cell(inner.end)
    }

    pub fn contains_cell(&self, cell: CellRef) -> bool {
        cell.row >= self.start.row
            && cell.row <= self.end.row
            && cell.col >= self.start.col
            && cell.col <= self.end.col
    }
}

/// Smallest range covering every point, or `None` when there are no points.
pub fn bounding_box<I>(points: I) -> Option<CellRange>
where
    I: IntoIterator<Item = CellRef>,
{
    let mut points = points.into_iter();
    let first = points.next()?;
    let mut bounds = CellRange::cell(first);
    for point in points {
        bounds.start.col = bounds.start.col.min(point.col);
        bounds.start.row = bounds.start.row.min(point.row);
        bounds.end.col = bounds.end.col.max(point.col);
        bounds.end.row = bounds.end.row.max(point.row);
    }
    Some(bounds)
}

impl std::str::FromStr for CellRange {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
