//! A parsed worksheet: cells, declared extent and merge regions.

use super::cell::{Cell, Grid};
use super::cell_ref::CellRef;
use super::range::CellRange;

/// Input to a conversion, as produced by a spreadsheet parser.
///
/// Keys of `cells` are A1 addresses. Keys starting with `!` are parser
/// metadata and never count as occupied cells.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    pub cells: Grid,
    /// Declared reference extent, e.g. "A1:C3".
    pub reference: Option<String>,
    pub merges: Vec<CellRange>,
}

impl Sheet {
    pub fn new() -> Self {
        Sheet::default()
    }

    pub fn insert(&self, at: CellRef, cell: Cell) {
        self.cells.insert(at.encode(), cell);
    }

    pub fn cell(&self, at: CellRef) -> Option<Cell> {
        self.cells.get(&at.encode()).map(|cell| cell.clone())
    }

    pub fn content(&self, at: CellRef) -> Option<String> {
        self.cells
            .get(&at.encode())
            .and_then(|cell| cell.content().map(|c| c.into_owned()))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
