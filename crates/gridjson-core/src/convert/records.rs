//! Record assembly over a reconciled data range.

use gridjson_engine::engine::{Cell, CellRange, CellRef, CellValue, Header, Sheet};
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// One data row, keyed by column header path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    /// Sheet row number.
    pub row: usize,
    /// Row header path, when a row header labels this row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_path: Option<Vec<String>>,
    pub values: Map<String, Value>,
}

/// Build one record per data row of `data`.
///
/// Values nest along the column header path, or sit under the column letters
/// without a column header. Columns and rows a present header does not label
/// are skipped. Rows with no content are kept unless `skip_blank_rows` is set.
pub fn assemble_records(
    sheet: &Sheet,
    data: CellRange,
    col: Option<&Header>,
    row: Option<&Header>,
    skip_blank_rows: bool,
) -> Vec<Record> {
    let mut records = Vec::new();

    for r in data.start.row..=data.end.row {
        let row_path = match row {
            Some(header) => match header.get(r) {
                Some(entry) => Some(entry.path.clone()),
                None => continue,
            },
            None => None,
        };

        let mut values = Map::new();
        let mut blank = true;
        for c in data.start.col..=data.end.col {
            let key = match col {
                Some(header) => match header.get(c) {
                    Some(entry) => entry.path.clone(),
                    None => continue,
                },
                None => vec![CellRef::col_to_letters(c)],
            };
            let value = match sheet.cell(CellRef::new(c, r)) {
                Some(cell) => {
                    blank &= cell.content().is_none();
                    cell_json(&cell)
                }
                None => Value::Null,
            };
            insert_path(&mut values, &key, value);
        }

        if blank && skip_blank_rows {
            continue;
        }
        records.push(Record {
            row: r,
            row_path,
            values,
        });
    }

    records
}

/// JSON value of a cell: its formatted text, else its format, else the raw value.
pub fn cell_json(cell: &Cell) -> Value {
    if let Some(text) = &cell.text {
        return Value::String(text.clone());
    }
    if let Some(format) = &cell.format {
        return Value::String(format.clone());
    }
    match &cell.value {
        CellValue::Empty => Value::Null,
        CellValue::Bool(b) => Value::Bool(*b),
        CellValue::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
        CellValue::Text(s) => Value::String(s.clone()),
    }
}

/// Insert `value` at `path`, creating intermediate objects. A non-object
/// already sitting on the path is replaced.
pub fn insert_path(map: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut target = map;
    for key in parents {
        let slot = target
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(inner) = slot else {
            return;
        };
        target = inner;
    }
    target.insert(last.clone(), value);
}
