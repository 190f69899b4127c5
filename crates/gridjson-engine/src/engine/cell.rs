//! Cell data structures for parsed sheets.
//!
//! This module provides the core data types for representing cells:
//! - [`CellValue`] - The raw value a parser resolved for a cell
//! - [`Cell`] - A raw value plus the optional formatted text and number format
//! - [`Grid`] - Sparse storage for cells keyed by A1 address (backed by `DashMap`)
//!
//! Values are consumed exactly as the parser produced them; the engine only
//! reads a cell's [`content`](Cell::content) to label headers.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The raw value stored in a cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// A cell in a parsed sheet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    /// Formatted text, as displayed by the producing application.
    pub text: Option<String>,
    /// Number format the text was derived from.
    pub format: Option<String>,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell::default()
    }

    pub fn new_text(text: &str) -> Cell {
        Cell {
            value: CellValue::Text(text.to_string()),
            ..Cell::default()
        }
    }

    pub fn new_number(n: f64) -> Cell {
        Cell {
            value: CellValue::Number(n),
            ..Cell::default()
        }
    }

    pub fn new_bool(b: bool) -> Cell {
        Cell {
            value: CellValue::Bool(b),
            ..Cell::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Cell {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_format(mut self, format: &str) -> Cell {
        self.format = Some(format.to_string());
        self
    }

    /// Displayable content: formatted text, else the format, else the raw value.
    pub fn content(&self) -> Option<Cow<'_, str>> {
        if let Some(text) = &self.text {
            return Some(Cow::Borrowed(text));
        }
        if let Some(format) = &self.format {
            return Some(Cow::Borrowed(format));
        }
        match &self.value {
            CellValue::Empty => None,
            CellValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            CellValue::Number(n) => Some(Cow::Owned(n.to_string())),
            CellValue::Text(s) => Some(Cow::Borrowed(s)),
        }
    }
}

/// Sparse cell storage keyed by A1 address.
pub type Grid = DashMap<String, Cell>;
