//! gridjson-core - Sheet loading, conversion and JSON output.

pub mod convert;
pub mod error;
pub mod options;
pub mod script;
pub mod storage;

pub use convert::{Conversion, Record, convert};
pub use error::{GridjsonError, Result};
pub use options::{ConvertOptions, HeaderKeys, HeaderSpecs, HeaderType};

pub use gridjson_engine::engine::{Cell, CellRange, CellRef, CellValue, Sheet};
