//! Sheet to JSON conversion.
//!
//! [`convert`] resolves the working extent, detects (or normalizes) the
//! headers, reconciles the data body and assembles one [`Record`] per data
//! row. Failures follow [`ConvertOptions::throw_error`]: either the first
//! one is returned, or it is kept in [`Conversion::diagnostics`] and the
//! conversion yields no records.

mod records;

pub use records::{Record, assemble_records, cell_json, insert_path};

use gridjson_engine::Diagnostics;
use gridjson_engine::engine::{
    Axis, CellRange, Header, Sheet, build_header_axis, normalize, reconcile, resolve_anchor,
    resolve_extent,
};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::options::{ConvertOptions, HeaderSpecs, HeaderType};

/// Outcome of one conversion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conversion {
    pub records: Vec<Record>,
    /// Failures recovered from when errors are not thrown.
    pub diagnostics: Vec<gridjson_engine::ConvertError>,
    pub extent: Option<CellRange>,
    pub data_range: Option<CellRange>,
    pub col_header: Option<Header>,
    pub row_header: Option<Header>,
}

impl Conversion {
    /// Records as JSON: an array of row objects, or an object nested by row
    /// header path when a row header is present.
    pub fn to_json(&self) -> Value {
        if self.row_header.is_none() {
            return Value::Array(
                self.records
                    .iter()
                    .map(|record| Value::Object(record.values.clone()))
                    .collect(),
            );
        }

        let mut root = Map::new();
        for record in &self.records {
            let key = match &record.row_path {
                Some(path) => path.clone(),
                None => vec![record.row.to_string()],
            };
            insert_path(&mut root, &key, Value::Object(record.values.clone()));
        }
        Value::Object(root)
    }
}

type Headers = (Option<Header>, Option<Header>);

/// Convert `sheet` into labelled records.
pub fn convert(sheet: &Sheet, options: &ConvertOptions) -> Result<Conversion> {
    let mut diagnostics = Diagnostics::new(options.throw_error);
    let mut conversion = Conversion::default();

    let extent = match options.range.as_deref() {
        Some(text) => Some(CellRange::decode(text)?),
        None => resolve_extent(sheet, options.default_range.as_ref(), &mut diagnostics)?,
    };
    let Some(extent) = extent else {
        log::debug!("sheet has no occupied cells");
        conversion.diagnostics = diagnostics.into_errors();
        return Ok(conversion);
    };
    conversion.extent = Some(extent);

    let headers = match &options.headers {
        Some(specs) => supplied_headers(sheet, specs, &mut diagnostics)?,
        None => Some(detect_headers(sheet, extent, options)),
    };
    let Some((col, row)) = headers else {
        conversion.diagnostics = diagnostics.into_errors();
        return Ok(conversion);
    };

    let data_range = match options.data_range.as_deref() {
        Some(text) => Some(CellRange::decode(text)?),
        None => match reconcile(extent, col.as_ref(), row.as_ref()) {
            Ok(range) => range,
            Err(err) => diagnostics.recover(err, None)?,
        },
    };

    if let Some(data_range) = data_range {
        conversion.records = assemble_records(
            sheet,
            data_range,
            col.as_ref(),
            row.as_ref(),
            options.skip_blank_rows,
        );
        conversion.data_range = Some(data_range);
        conversion.col_header = col;
        conversion.row_header = row;
    }
    conversion.diagnostics = diagnostics.into_errors();
    Ok(conversion)
}

/// Detect headers inside `extent` according to the requested header type.
fn detect_headers(sheet: &Sheet, extent: CellRange, options: &ConvertOptions) -> Headers {
    let corner_has_content = sheet.content(extent.start).is_some();
    let header_type = match options.header_type {
        Some(header_type) => header_type,
        None if !corner_has_content => HeaderType::Col,
        None => return (None, None),
    };
    let corner = resolve_anchor(&sheet.merges, extent.start);

    let (col_range, row_range) = match header_type {
        HeaderType::Col => {
            let first = if corner_has_content { extent.start.col } else { corner.end.col + 1 };
            let col_range = Axis::Col.range(
                (first, extent.end.col),
                (extent.start.row, extent.end.row),
            );
            (col_range, None)
        }
        HeaderType::Row => {
            let first = if corner_has_content { extent.start.row } else { corner.end.row + 1 };
            let row_range = Axis::Row.range(
                (first, extent.end.row),
                (extent.start.col, extent.end.col),
            );
            (None, row_range)
        }
        HeaderType::Both => (
            Axis::Col.range(
                (corner.end.col + 1, extent.end.col),
                (corner.start.row, corner.end.row),
            ),
            Axis::Row.range(
                (corner.end.row + 1, extent.end.row),
                (corner.start.col, corner.end.col),
            ),
        ),
    };

    (
        col_range.and_then(|range| detect_axis(sheet, Axis::Col, range, options)),
        row_range.and_then(|range| detect_axis(sheet, Axis::Row, range, options)),
    )
}

fn detect_axis(
    sheet: &Sheet,
    axis: Axis,
    range: CellRange,
    options: &ConvertOptions,
) -> Option<Header> {
    let tree = build_header_axis(sheet, axis, range, options.header_keys.for_axis(axis));
    let header = Header::from_tree(axis, &tree);
    log::debug!("{axis} header in {range}: {} data indices", header.entries.len());
    (!header.is_empty()).then_some(header)
}

/// Normalize caller-supplied headers. `Ok(None)` means they were unusable
/// and the failure was recorded.
fn supplied_headers(
    sheet: &Sheet,
    specs: &HeaderSpecs,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Headers>> {
    let single_axis = specs.col.is_none() || specs.row.is_none();
    let col = specs
        .col
        .as_deref()
        .map(|col| normalize(sheet, Axis::Col, col, single_axis))
        .transpose();
    let row = specs
        .row
        .as_deref()
        .map(|row| normalize(sheet, Axis::Row, row, single_axis))
        .transpose();

    match (col, row) {
        (Ok(col), Ok(row)) => Ok(Some((col, row))),
        (Err(err), _) | (_, Err(err)) => Ok(diagnostics.recover(err, None)?),
    }
}
