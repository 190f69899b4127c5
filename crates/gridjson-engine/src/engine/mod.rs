//! Header inference API.
//!
//! - [`Cell`], [`CellValue`], [`Grid`], [`Sheet`] - Parsed sheet input
//! - [`CellRef`], [`CellRange`] - A1 addressing and range geometry
//! - [`resolve_anchor`] - Merged-cell lookup
//! - [`resolve_extent`] - Working extent of a sheet
//! - [`build_header_axis`] - Merge-aware header tree discovery
//! - [`compile`], [`Header`] - Header trees flattened by data index
//! - [`reconcile`] - Data body location
//! - [`normalize`] - Caller-supplied header definitions

mod axis;
mod cell;
mod cell_ref;
mod compile;
mod extent;
mod header;
mod merge;
mod normalize;
mod range;
mod reconcile;
mod sheet;

pub use axis::Axis;
pub use cell::{Cell, CellValue, Grid};
pub use cell_ref::CellRef;
pub use compile::{CompiledHeader, CompiledHeaders, Header, HeaderMeta, compile};
pub use extent::{DefaultRange, occupied_extent, resolve_extent};
pub use header::{HeaderKeyFn, HeaderKind, HeaderNode, HeaderTree, build_header_axis};
pub use merge::resolve_anchor;
pub use normalize::{HeaderSpec, normalize};
pub use range::{CellRange, bounding_box};
pub use reconcile::reconcile;
pub use sheet::Sheet;
