//! SheetJS-style JSON worksheets.
//!
//! ```json
//! {
//!   "!ref": "A1:B3",
//!   "!merges": ["A1:B1", {"s": {"c": 0, "r": 1}, "e": {"c": 0, "r": 2}}],
//!   "A1": {"t": "s", "v": "group"},
//!   "A2": {"t": "n", "v": 0.5, "w": "50%", "z": "0%"}
//! }
//! ```
//!
//! Merge objects use zero-based rows and are shifted onto the written row
//! numbers used everywhere else.

use crate::error::{GridjsonError, Result};
use gridjson_engine::engine::{Cell, CellRange, CellRef, CellValue, Sheet};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct JsonCell {
    #[serde(default)]
    v: Option<Value>,
    #[serde(default)]
    w: Option<String>,
    #[serde(default)]
    z: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonMerge {
    Text(String),
    Coords { s: JsonCoord, e: JsonCoord },
}

#[derive(Debug, Deserialize)]
struct JsonCoord {
    c: usize,
    r: usize,
}

/// Parse a JSON worksheet file.
pub fn parse_json_sheet(path: &Path) -> Result<Sheet> {
    let content = super::read_sheet_file(path)?;
    parse_json_sheet_content(&content)
}

/// Parse a JSON worksheet from a string.
pub fn parse_json_sheet_content(content: &str) -> Result<Sheet> {
    let raw: Map<String, Value> = serde_json::from_str(content)?;
    let mut sheet = Sheet::new();

    for (key, value) in raw {
        match key.as_str() {
            "!ref" => {
                let Value::String(reference) = value else {
                    return Err(GridjsonError::InvalidSheet(
                        "\"!ref\" must be a string".to_string(),
                    ));
                };
                sheet.reference = Some(reference);
            }
            "!merges" => {
                let merges: Vec<JsonMerge> = serde_json::from_value(value)?;
                for merge in merges {
                    sheet.merges.push(merge_range(merge)?);
                }
            }
            // Other sheet metadata (!cols, !rows, !margins, ...).
            meta if meta.starts_with('!') => continue,
            address => {
                let at = CellRef::decode(address)?;
                let cell: JsonCell = serde_json::from_value(value)?;
                sheet.insert(at, json_cell(cell));
            }
        }
    }

    Ok(sheet)
}

fn merge_range(merge: JsonMerge) -> Result<CellRange> {
    match merge {
        JsonMerge::Text(text) => Ok(CellRange::decode(&text)?),
        JsonMerge::Coords { s, e } => Ok(CellRange::new(
            CellRef::new(s.c, s.r + 1),
            CellRef::new(e.c, e.r + 1),
        )),
    }
}

fn json_cell(cell: JsonCell) -> Cell {
    let value = match cell.v {
        None | Some(Value::Null) => CellValue::Empty,
        Some(Value::Bool(b)) => CellValue::Bool(b),
        Some(Value::Number(n)) => n.as_f64().map_or(CellValue::Empty, CellValue::Number),
        Some(Value::String(s)) => CellValue::Text(s),
        Some(other) => CellValue::Text(other.to_string()),
    };
    Cell {
        value,
        text: cell.w,
        format: cell.z,
    }
}
