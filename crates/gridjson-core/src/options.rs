//! Conversion options.

use gridjson_engine::engine::{Axis, DefaultRange, HeaderKeyFn, HeaderSpec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which header axes to detect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderType {
    Col,
    Row,
    Both,
}

impl std::str::FromStr for HeaderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "col" => Ok(HeaderType::Col),
            "row" => Ok(HeaderType::Row),
            "both" => Ok(HeaderType::Both),
            other => Err(format!("Invalid header type: {} (expected col, row or both)", other)),
        }
    }
}

/// Header definitions given by the caller, per axis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderSpecs {
    #[serde(default)]
    pub col: Option<Vec<HeaderSpec>>,
    #[serde(default)]
    pub row: Option<Vec<HeaderSpec>>,
}

/// Label functions used while detecting headers, per axis.
#[derive(Default)]
pub struct HeaderKeys {
    pub col: Option<Box<HeaderKeyFn>>,
    pub row: Option<Box<HeaderKeyFn>>,
}

impl HeaderKeys {
    pub fn for_axis(&self, axis: Axis) -> Option<&HeaderKeyFn> {
        match axis {
            Axis::Col => self.col.as_deref(),
            Axis::Row => self.row.as_deref(),
        }
    }
}

impl fmt::Debug for HeaderKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderKeys")
            .field("col", &self.col.is_some())
            .field("row", &self.row.is_some())
            .finish()
    }
}

/// Options for [`convert`](crate::convert::convert).
#[derive(Debug, Default)]
pub struct ConvertOptions {
    /// Extent override in A1 notation.
    pub range: Option<String>,
    /// Axes to detect headers on. `None` detects a column header only when
    /// the top-left cell of the extent is empty.
    pub header_type: Option<HeaderType>,
    /// Caller-supplied headers; disables detection.
    pub headers: Option<HeaderSpecs>,
    /// Data body override in A1 notation.
    pub data_range: Option<String>,
    /// Extent used when the sheet declares none.
    pub default_range: Option<DefaultRange>,
    /// Return the first failure instead of an empty result.
    pub throw_error: bool,
    pub header_keys: HeaderKeys,
    /// Leave out rows without any content.
    pub skip_blank_rows: bool,
}
