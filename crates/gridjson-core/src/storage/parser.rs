//! Parser for the .grd sheet format
//!
//! ```text
//! # Quarterly sales
//! !ref: A1:C4
//! !merge: A1:A2
//! A1: "region"
//! B1: "q1"
//! B3: 1200
//! C3: true
//! ```

use crate::error::{GridjsonError, Result};
use gridjson_engine::engine::{Cell, CellRange, CellRef, Sheet};
use std::path::Path;

/// Parse a .grd file and return a Sheet
pub fn parse_grd(path: &Path) -> Result<Sheet> {
    let content = super::read_sheet_file(path)?;
    parse_grd_content(&content)
}

/// Parse .grd content from a string
pub fn parse_grd_content(content: &str) -> Result<Sheet> {
    let mut sheet = Sheet::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(GridjsonError::Parse {
                line: line_num + 1,
                message: "Expected 'ADDRESS: VALUE' format".to_string(),
            });
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "!ref" => {
                CellRange::decode(value).map_err(|e| parse_error(line_num, e))?;
                sheet.reference = Some(value.to_string());
            }
            "!merge" => {
                let merge = CellRange::decode(value).map_err(|e| parse_error(line_num, e))?;
                sheet.merges.push(merge);
            }
            _ => {
                let at = CellRef::decode(key).map_err(|e| parse_error(line_num, e))?;
                if let Some(cell) = parse_cell_value(value, line_num + 1)? {
                    sheet.insert(at, cell);
                }
            }
        }
    }

    Ok(sheet)
}

fn parse_error(line_num: usize, err: impl std::fmt::Display) -> GridjsonError {
    GridjsonError::Parse {
        line: line_num + 1,
        message: err.to_string(),
    }
}

/// Parse a cell value string into a Cell; an empty value leaves the cell out
fn parse_cell_value(value: &str, line_num: usize) -> Result<Option<Cell>> {
    if value.is_empty() {
        return Ok(None);
    }

    // Quoted string: starts and ends with '"'
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        let text = &value[1..value.len() - 1];
        return Ok(Some(Cell::new_text(&unescape_grd_text(text))));
    }

    match value {
        "true" => return Ok(Some(Cell::new_bool(true))),
        "false" => return Ok(Some(Cell::new_bool(false))),
        _ => {}
    }

    if let Ok(n) = value.parse::<f64>() {
        return Ok(Some(Cell::new_number(n)));
    }

    Err(GridjsonError::Parse {
        line: line_num,
        message: format!("Invalid value: {}. Use quotes for text.", value),
    })
}

fn unescape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                match next {
                    '\\' => out.push('\\'),
                    '"' => out.push('"'),
                    _ => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            } else {
                out.push('\\');
            }
        } else {
            out.push(ch);
        }
    }
    out
}
