//! Sheet loading (.json, .grd, .csv) and JSON output

mod csv;
mod json;
mod parser;
mod writer;

pub use self::csv::{parse_csv, parse_csv_content};
pub use json::{parse_json_sheet, parse_json_sheet_content};
pub use parser::{parse_grd, parse_grd_content};
pub use writer::{to_json_string, write_json};

use crate::error::{GridjsonError, Result};
use crate::options::HeaderSpecs;
use gridjson_engine::engine::Sheet;
use std::path::Path;

const MAX_SHEET_FILE_BYTES: u64 = 64 * 1_048_576; // 64 MiB
const MAX_HEADERS_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// Load a sheet, choosing the format from the file extension.
pub fn load_sheet(path: &Path) -> Result<Sheet> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("json") => parse_json_sheet(path),
        Some("grd") => parse_grd(path),
        Some("csv") => parse_csv(path),
        _ => Err(GridjsonError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Load caller-supplied header definitions from a JSON file.
pub fn load_header_specs(path: &Path) -> Result<HeaderSpecs> {
    let content = read_capped(path, MAX_HEADERS_FILE_BYTES, "headers")?;
    Ok(serde_json::from_str(&content)?)
}

pub(crate) fn read_sheet_file(path: &Path) -> Result<String> {
    read_capped(path, MAX_SHEET_FILE_BYTES, "sheet")
}

fn read_capped(path: &Path, max_bytes: u64, kind: &str) -> Result<String> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > max_bytes {
        return Err(GridjsonError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: {} file too large ({} bytes, max {})",
                path.display(),
                kind,
                meta.len(),
                max_bytes
            ),
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridjson_engine::engine::{Cell, CellRef};
    use std::io::Write;

    #[test]
    fn test_load_sheet_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".grd").tempfile().unwrap();
        writeln!(file, "A1: \"x\"").unwrap();
        let sheet = load_sheet(file.path()).unwrap();
        assert_eq!(sheet.cell(CellRef::new(0, 1)), Some(Cell::new_text("x")));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        assert!(matches!(
            load_sheet(file.path()),
            Err(GridjsonError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_header_specs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"col": [{{"name": "id", "address": "A1"}}]}}"#).unwrap();
        let specs = load_header_specs(file.path()).unwrap();
        assert_eq!(specs.col.unwrap()[0].name, "id");
        assert!(specs.row.is_none());
    }

    #[test]
    fn test_oversized_header_specs_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let padding = " ".repeat(MAX_HEADERS_FILE_BYTES as usize + 1);
        write!(file, "{{}}{}", padding).unwrap();
        let err = load_header_specs(file.path()).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
