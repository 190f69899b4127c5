//! Merge-aware header discovery.
//!
//! A header axis is walked cell by cell from the top-left of its range. Each
//! header cell is resolved to its merge rectangle; a rectangle wider than one
//! unit along the walked axis is a group whose sub-headers sit directly past
//! it on the other axis, and those are discovered by walking that region
//! recursively. Header depth therefore never needs to be supplied up front.
//!
//! ```text
//!   A        B       C
//! 1 | group (A1:B1) | id (C1:C2)
//! 2 | a      | b    |
//! ```
//!
//! yields `group -> {a: 0, b: 1}` and `id: 2` for a column header.

use indexmap::IndexMap;

use super::axis::Axis;
use super::cell::Cell;
use super::cell_ref::CellRef;
use super::merge::resolve_anchor;
use super::range::CellRange;
use super::sheet::Sheet;

/// Derives a header label from `(content, cell, axis, sheet)`.
pub type HeaderKeyFn = dyn Fn(&str, &Cell, Axis, &Sheet) -> String;

#[derive(Clone, Debug, PartialEq)]
pub enum HeaderKind {
    /// Labels the data column or row at `data_index`.
    Leaf { data_index: usize },
    Group { children: HeaderTree },
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderNode {
    pub label: String,
    /// Merge rectangle of the header cell (1x1 when unmerged).
    pub range: CellRange,
    pub anchor: CellRef,
    pub cell: Cell,
    pub kind: HeaderKind,
}

impl HeaderNode {
    pub fn data_index(&self) -> Option<usize> {
        match self.kind {
            HeaderKind::Leaf { data_index } => Some(data_index),
            HeaderKind::Group { .. } => None,
        }
    }

    pub fn children(&self) -> Option<&HeaderTree> {
        match &self.kind {
            HeaderKind::Leaf { .. } => None,
            HeaderKind::Group { children } => Some(children),
        }
    }
}

/// One level of header nodes keyed by label, in discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeaderTree {
    nodes: IndexMap<String, HeaderNode>,
}

impl HeaderTree {
    pub fn get(&self, label: &str) -> Option<&HeaderNode> {
        self.nodes.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Merge rectangles of every node at every level.
    pub fn ranges(&self) -> Vec<CellRange> {
        let mut out = Vec::new();
        self.collect_ranges(&mut out);
        out
    }

    fn collect_ranges(&self, out: &mut Vec<CellRange>) {
        for node in self.iter() {
            out.push(node.range);
            if let Some(children) = node.children() {
                children.collect_ranges(out);
            }
        }
    }

    /// Data indices of all leaves, depth first.
    pub fn leaf_indices(&self) -> Vec<usize> {
        let mut out = Vec::new();
        for node in self.iter() {
            match &node.kind {
                HeaderKind::Leaf { data_index } => out.push(*data_index),
                HeaderKind::Group { children } => out.extend(children.leaf_indices()),
            }
        }
        out
    }

    /// Insert a node; a node already holding the label is replaced in place.
    fn insert(&mut self, node: HeaderNode) -> Option<HeaderNode> {
        self.nodes.insert(node.label.clone(), node)
    }
}

/// Walk `axis` across `range` and build the header tree found there.
///
/// The walk starts at `range.start` with the other coordinate fixed, stops
/// at the first cell without content, and consumes each merge rectangle as
/// a whole. Labels come from `key`, or the cell content when `key` is `None`.
pub fn build_header_axis(
    sheet: &Sheet,
    axis: Axis,
    range: CellRange,
    key: Option<&HeaderKeyFn>,
) -> HeaderTree {
    let mut tree = HeaderTree::default();
    let secondary = axis.other().of(range.start);
    let last = axis.of(range.end);
    let mut primary = axis.of(range.start);

    while primary <= last {
        let anchor = axis.cell(primary, secondary);
        let Some(cell) = sheet.cell(anchor) else {
            break;
        };
        let Some(content) = cell.content().map(|c| c.into_owned()) else {
            break;
        };
        let label = match key {
            Some(key) => key(&content, &cell, axis, sheet),
            None => content,
        };

        let merged = resolve_anchor(&sheet.merges, anchor);
        let span = axis.span(&merged);
        let kind = if span > 1 {
            let children = sub_headers(sheet, axis, range, merged, key);
            if children.is_empty() {
                HeaderKind::Leaf { data_index: primary }
            } else {
                HeaderKind::Group { children }
            }
        } else {
            HeaderKind::Leaf { data_index: primary }
        };

        let node = HeaderNode {
            label,
            range: merged,
            anchor,
            cell,
            kind,
        };
        if let Some(previous) = tree.insert(node) {
            log::debug!(
                "{axis} header {:?} at {anchor} replaces the one at {}",
                previous.label,
                previous.anchor
            );
        }

        primary += span;
    }

    tree
}

/// Headers nested under `merged`: its extent along `axis`, from just past it
/// on the other axis to the far edge of `range`.
fn sub_headers(
    sheet: &Sheet,
    axis: Axis,
    range: CellRange,
    merged: CellRange,
    key: Option<&HeaderKeyFn>,
) -> HeaderTree {
    let other = axis.other();
    let primary = (axis.of(merged.start), axis.of(merged.end).min(axis.of(range.end)));
    let secondary = (other.of(merged.end) + 1, other.of(range.end));
    match axis.range(primary, secondary) {
        Some(nested) => build_header_axis(sheet, axis, nested, key),
        None => HeaderTree::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet(cells: &[(&str, &str)], merges: &[&str]) -> Sheet {
        let sheet = Sheet::new();
        for (address, text) in cells {
            sheet.insert(CellRef::decode(address).unwrap(), Cell::new_text(text));
        }
        Sheet {
            merges: merges.iter().map(|m| CellRange::decode(m).unwrap()).collect(),
            ..sheet
        }
    }

    fn range(text: &str) -> CellRange {
        CellRange::decode(text).unwrap()
    }

    #[test]
    fn test_flat_column_header() {
        let s = sheet(&[("A1", "x"), ("B1", "y"), ("C1", "z"), ("A2", "1")], &[]);
        let tree = build_header_axis(&s, Axis::Col, range("A1:C3"), None);
        let labels: Vec<&str> = tree.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["x", "y", "z"]);
        assert_eq!(tree.leaf_indices(), vec![0, 1, 2]);
        assert_eq!(tree.get("y").unwrap().anchor, CellRef::new(1, 1));
    }

    #[test]
    fn test_walk_stops_at_gap() {
        let s = sheet(&[("A1", "x"), ("C1", "z")], &[]);
        let tree = build_header_axis(&s, Axis::Col, range("A1:C3"), None);
        assert_eq!(tree.len(), 1);
        assert!(tree.get("z").is_none());
    }

    #[test]
    fn test_merged_group_discovers_sub_headers() {
        let s = sheet(
            &[("A1", "group"), ("A2", "a"), ("B2", "b"), ("C1", "id")],
            &["A1:B1", "C1:C2"],
        );
        let tree = build_header_axis(&s, Axis::Col, range("A1:C4"), None);

        let group = tree.get("group").unwrap();
        assert_eq!(group.range, range("A1:B1"));
        let children = group.children().unwrap();
        assert_eq!(children.get("a").unwrap().data_index(), Some(0));
        assert_eq!(children.get("b").unwrap().data_index(), Some(1));

        // Vertical merges do not widen a column header.
        let id = tree.get("id").unwrap();
        assert_eq!(id.data_index(), Some(2));
        assert_eq!(id.range, range("C1:C2"));
    }

    #[test]
    fn test_row_header_walks_down() {
        let s = sheet(
            &[("A2", "north"), ("B2", "q1"), ("B3", "q2"), ("A4", "south")],
            &["A2:A3"],
        );
        let tree = build_header_axis(&s, Axis::Row, range("A2:B5"), None);
        let north = tree.get("north").unwrap();
        let children = north.children().unwrap();
        assert_eq!(children.get("q1").unwrap().data_index(), Some(2));
        assert_eq!(children.get("q2").unwrap().data_index(), Some(3));
        assert_eq!(tree.get("south").unwrap().data_index(), Some(4));
    }

    #[test]
    fn test_group_without_sub_headers_is_a_leaf() {
        let s = sheet(&[("A1", "wide")], &["A1:B1"]);
        let tree = build_header_axis(&s, Axis::Col, range("A1:B1"), None);
        assert_eq!(tree.get("wide").unwrap().data_index(), Some(0));
    }

    #[test]
    fn test_duplicate_label_last_anchor_wins() {
        let s = sheet(&[("A1", "dup"), ("B1", "other"), ("C1", "dup")], &[]);
        let tree = build_header_axis(&s, Axis::Col, range("A1:C1"), None);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get("dup").unwrap().data_index(), Some(2));
        let labels: Vec<&str> = tree.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["dup", "other"]);
    }

    #[test]
    fn test_custom_key_function() {
        let s = sheet(&[("A1", " Name "), ("B1", "AGE")], &[]);
        let key = |content: &str, _: &Cell, axis: Axis, _: &Sheet| {
            format!("{axis}:{}", content.trim().to_lowercase())
        };
        let tree = build_header_axis(&s, Axis::Col, range("A1:B1"), Some(&key));
        assert!(tree.get("col:name").is_some());
        assert!(tree.get("col:age").is_some());
    }

    #[test]
    fn test_ranges_cover_every_level() {
        let s = sheet(&[("A1", "group"), ("A2", "a"), ("B2", "b")], &["A1:B1"]);
        let tree = build_header_axis(&s, Axis::Col, range("A1:B3"), None);
        assert_eq!(
            tree.ranges(),
            vec![range("A1:B1"), range("A2:A2"), range("B2:B2")]
        );
    }
}
