//! Merged-cell lookup.

use super::cell_ref::CellRef;
use super::range::CellRange;

/// The rectangle anchored at `at`: the merge region starting there, or the
/// 1x1 range of the cell itself. Cells strictly inside a merge region are
/// not anchors and resolve to their own 1x1 range as well.
pub fn resolve_anchor(merges: &[CellRange], at: CellRef) -> CellRange {
    merges
        .iter()
        .find(|merge| merge.start == at)
        .copied()
        .unwrap_or(CellRange::cell(at))
}
