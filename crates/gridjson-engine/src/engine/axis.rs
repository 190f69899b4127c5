//! Column/row axis selector used by the header walk.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cell_ref::CellRef;
use super::range::CellRange;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Col,
    Row,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Col => Axis::Row,
            Axis::Row => Axis::Col,
        }
    }

    /// Coordinate of `cell` along this axis.
    pub fn of(self, cell: CellRef) -> usize {
        match self {
            Axis::Col => cell.col,
            Axis::Row => cell.row,
        }
    }

    /// Build a cell from a coordinate on this axis and one on the other axis.
    pub fn cell(self, primary: usize, secondary: usize) -> CellRef {
        match self {
            Axis::Col => CellRef::new(primary, secondary),
            Axis::Row => CellRef::new(secondary, primary),
        }
    }

    /// Number of units `range` covers along this axis.
    pub fn span(self, range: &CellRange) -> usize {
        self.of(range.end) - self.of(range.start) + 1
    }

    /// Rectangle given as inclusive bounds on this axis and the other one.
    /// Returns `None` when either extent would be negative.
    pub fn range(
        self,
        primary: (usize, usize),
        secondary: (usize, usize),
    ) -> Option<CellRange> {
        CellRange::new_checked(
            self.cell(primary.0, secondary.0),
            self.cell(primary.1, secondary.1),
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Col => "col",
            Axis::Row => "row",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
