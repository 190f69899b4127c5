//! Caller-supplied header definitions.

use serde::{Deserialize, Serialize};

use super::axis::Axis;
use super::cell_ref::CellRef;
use super::compile::{CompiledHeader, CompiledHeaders, Header, HeaderMeta};
use super::range::CellRange;
use super::sheet::Sheet;
use crate::error::{ConvertError, Result};

/// One header entry given by the caller instead of being detected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderSpec {
    pub name: String,
    /// A1 address or range of the header cell.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub data_index: Option<usize>,
    /// Labels of the enclosing headers, outermost first.
    #[serde(default)]
    pub parents: Vec<String>,
}

/// Turn header definitions for `axis` into a [`Header`].
///
/// Each entry needs an address or a data index; when only one axis is
/// supplied (`single_axis`) the address is mandatory because the data range
/// is then derived from header geometry. A missing data index is taken from
/// the address.
pub fn normalize(
    sheet: &Sheet,
    axis: Axis,
    specs: &[HeaderSpec],
    single_axis: bool,
) -> Result<Header> {
    let mut entries = CompiledHeaders::new();
    let mut ranges = Vec::new();

    for spec in specs {
        if spec.address.is_none() && spec.data_index.is_none() {
            return Err(incomplete(axis, spec, "an address or a data index"));
        }
        if spec.address.is_none() && single_axis {
            return Err(incomplete(
                axis,
                spec,
                "an address when headers are supplied for one axis only",
            ));
        }

        let range = spec.address.as_deref().map(decode_target).transpose()?;
        let data_index = match (spec.data_index, range) {
            (Some(index), _) => index,
            (None, Some(range)) => axis.of(range.start),
            (None, None) => return Err(incomplete(axis, spec, "an address or a data index")),
        };

        let anchor = range.map(|range| range.start);
        let mut chain: Vec<HeaderMeta> = spec.parents.iter().map(|p| HeaderMeta::named(p)).collect();
        chain.push(HeaderMeta {
            label: spec.name.clone(),
            range,
            anchor,
            cell: anchor.and_then(|at| sheet.cell(at)),
        });
        ranges.extend(range);

        let entry = CompiledHeader::from_chain(data_index, chain);
        if let Some(previous) = entries.insert(data_index, entry) {
            return Err(ConvertError::DuplicateDataIndex {
                axis,
                index: data_index,
                first: previous.name,
                second: spec.name.clone(),
            });
        }
    }

    Ok(Header {
        axis,
        entries,
        ranges,
    })
}

fn decode_target(address: &str) -> Result<CellRange> {
    if address.contains(':') {
        CellRange::decode(address)
    } else {
        CellRef::decode(address).map(CellRange::cell)
    }
}

fn incomplete(axis: Axis, spec: &HeaderSpec, requirement: &'static str) -> ConvertError {
    ConvertError::IncompleteHeaderSpec {
        axis,
        name: spec.name.clone(),
        requirement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cell;

    fn spec(name: &str, address: Option<&str>, data_index: Option<usize>) -> HeaderSpec {
        HeaderSpec {
            name: name.to_string(),
            address: address.map(str::to_string),
            data_index,
            parents: Vec::new(),
        }
    }

    #[test]
    fn test_address_resolves_cell_and_index() {
        let sheet = Sheet::new();
        sheet.insert(CellRef::new(2, 1), Cell::new_text("Price"));
        let header = normalize(&sheet, Axis::Col, &[spec("price", Some("C1"), None)], true).unwrap();

        let entry = header.get(2).unwrap();
        assert_eq!(entry.name, "price");
        assert_eq!(entry.chain[0].cell, Some(Cell::new_text("Price")));
        assert_eq!(header.extent(), Some(CellRange::decode("C1:C1").unwrap()));
    }

    #[test]
    fn test_explicit_index_wins_over_address() {
        let header = normalize(
            &Sheet::new(),
            Axis::Row,
            &[spec("total", Some("A9:B9"), Some(12))],
            false,
        )
        .unwrap();
        assert!(header.get(12).is_some());
        assert_eq!(header.ranges, vec![CellRange::decode("A9:B9").unwrap()]);
    }

    #[test]
    fn test_index_only_allowed_when_both_axes_given() {
        let specs = [spec("x", None, Some(0))];
        assert!(normalize(&Sheet::new(), Axis::Col, &specs, false).is_ok());
        assert!(matches!(
            normalize(&Sheet::new(), Axis::Col, &specs, true),
            Err(ConvertError::IncompleteHeaderSpec { .. })
        ));
    }

    #[test]
    fn test_entry_without_address_or_index() {
        let err = normalize(&Sheet::new(), Axis::Row, &[spec("x", None, None)], false).unwrap_err();
        assert_eq!(
            err,
            ConvertError::IncompleteHeaderSpec {
                axis: Axis::Row,
                name: "x".to_string(),
                requirement: "an address or a data index",
            }
        );
    }

    #[test]
    fn test_parents_build_path() {
        let mut leaf = spec("q1", Some("B2"), None);
        leaf.parents = vec!["sales".to_string()];
        let header = normalize(&Sheet::new(), Axis::Col, &[leaf], true).unwrap();
        let entry = header.get(1).unwrap();
        assert_eq!(entry.path, vec!["sales".to_string(), "q1".to_string()]);
        assert_eq!(entry.parent.as_deref(), Some("sales"));
        assert_eq!(entry.level, 1);
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let specs = [spec("a", Some("A1"), None), spec("b", None, Some(0))];
        assert!(matches!(
            normalize(&Sheet::new(), Axis::Col, &specs, false),
            Err(ConvertError::DuplicateDataIndex { index: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_address_fails() {
        let err = normalize(&Sheet::new(), Axis::Col, &[spec("a", Some("1A"), None)], true)
            .unwrap_err();
        assert_eq!(err, ConvertError::MalformedAddress("1A".to_string()));
    }
}
