//! CSV import

use crate::error::Result;
use gridjson_engine::engine::{Cell, CellRef, Sheet};
use std::path::Path;

/// Parse a CSV file into a sheet whose first field lands on A1
pub fn parse_csv(path: &Path) -> Result<Sheet> {
    let content = super::read_sheet_file(path)?;
    parse_csv_content(&content)
}

/// Parse CSV content. Quoted fields may span lines; empty fields leave
/// their cell out.
pub fn parse_csv_content(content: &str) -> Result<Sheet> {
    let sheet = Sheet::new();
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    // The reader skips empty lines; they still count as sheet rows.
    let mut row = 0usize;
    let mut next_line = 1u64;
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(next_line, |pos| pos.line());
        row += 1 + line.saturating_sub(next_line) as usize;
        let spanned: usize = record.iter().map(|field| field.matches('\n').count()).sum();
        next_line = line + 1 + spanned as u64;

        for (col_idx, field) in record.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            sheet.insert(CellRef::new(col_idx, row), parse_csv_field(field));
        }
    }

    Ok(sheet)
}

/// Parse a CSV field into a cell
/// - Valid number -> Number (unless it has leading zeros like "007")
/// - Otherwise -> Text
pub(crate) fn parse_csv_field(field: &str) -> Cell {
    let trimmed = field.trim();
    if field != trimmed {
        return Cell::new_text(field);
    }

    // Preserve strings that look like numbers but have leading zeros (e.g., "007", "00123")
    // unless they're just "0" or start with "0."
    if trimmed.starts_with('0')
        && trimmed.len() > 1
        && !trimmed.starts_with("0.")
        && trimmed.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
    {
        return Cell::new_text(trimmed);
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        return Cell::new_number(n);
    }

    Cell::new_text(trimmed)
}
