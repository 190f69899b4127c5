//! Flattening header trees into per-index lookups.

use std::collections::BTreeMap;

use super::axis::Axis;
use super::cell::Cell;
use super::cell_ref::CellRef;
use super::header::{HeaderKind, HeaderNode, HeaderTree};
use super::range::{CellRange, bounding_box};

/// Per-level metadata of a header. Geometry is absent for caller-supplied
/// ancestors that were only named.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderMeta {
    pub label: String,
    pub range: Option<CellRange>,
    pub anchor: Option<CellRef>,
    pub cell: Option<Cell>,
}

impl HeaderMeta {
    pub fn named(label: &str) -> Self {
        HeaderMeta {
            label: label.to_string(),
            range: None,
            anchor: None,
            cell: None,
        }
    }
}

impl From<&HeaderNode> for HeaderMeta {
    fn from(node: &HeaderNode) -> Self {
        HeaderMeta {
            label: node.label.clone(),
            range: Some(node.range),
            anchor: Some(node.anchor),
            cell: Some(node.cell.clone()),
        }
    }
}

/// Everything needed to label one data column or row.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledHeader {
    pub data_index: usize,
    pub name: String,
    /// Depth of the leaf; 0 is the topmost level.
    pub level: usize,
    /// Labels from the topmost level down to the leaf.
    pub path: Vec<String>,
    pub parent: Option<String>,
    /// Metadata for each level of `path`.
    pub chain: Vec<HeaderMeta>,
}

impl CompiledHeader {
    pub fn from_chain(data_index: usize, chain: Vec<HeaderMeta>) -> Self {
        let path: Vec<String> = chain.iter().map(|meta| meta.label.clone()).collect();
        let parent = path.len().checked_sub(2).map(|i| path[i].clone());
        CompiledHeader {
            data_index,
            name: path.last().cloned().unwrap_or_default(),
            level: path.len().saturating_sub(1),
            path,
            parent,
            chain,
        }
    }
}

pub type CompiledHeaders = BTreeMap<usize, CompiledHeader>;

/// One entry per leaf, keyed by data index. Groups contribute no entry.
pub fn compile(tree: &HeaderTree) -> CompiledHeaders {
    let mut out = CompiledHeaders::new();
    let mut chain = Vec::new();
    compile_level(tree, &mut chain, &mut out);
    out
}

fn compile_level(tree: &HeaderTree, chain: &mut Vec<HeaderMeta>, out: &mut CompiledHeaders) {
    for node in tree.iter() {
        chain.push(HeaderMeta::from(node));
        match &node.kind {
            HeaderKind::Leaf { data_index } => {
                let entry = CompiledHeader::from_chain(*data_index, chain.clone());
                let previous = out.insert(*data_index, entry);
                debug_assert!(previous.is_none(), "data index {data_index} compiled twice");
            }
            HeaderKind::Group { children } => compile_level(children, chain, out),
        }
        chain.pop();
    }
}

/// A compiled header together with the geometry it was found in.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub axis: Axis,
    pub entries: CompiledHeaders,
    /// Rectangles of every header cell, at every level.
    pub ranges: Vec<CellRange>,
}

impl Header {
    pub fn from_tree(axis: Axis, tree: &HeaderTree) -> Self {
        Header {
            axis,
            entries: compile(tree),
            ranges: tree.ranges(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, data_index: usize) -> Option<&CompiledHeader> {
        self.entries.get(&data_index)
    }

    /// Smallest and largest data index.
    pub fn index_bounds(&self) -> Option<(usize, usize)> {
        let (first, _) = self.entries.first_key_value()?;
        let (last, _) = self.entries.last_key_value()?;
        Some((*first, *last))
    }

    /// Bounding rectangle of the header cells.
    pub fn extent(&self) -> Option<CellRange> {
        bounding_box(self.ranges.iter().flat_map(|range| [range.start, range.end]))
    }
}
