//! gridjson_engine - Header inference for parsed spreadsheets.

pub mod engine;
pub mod error;

pub use error::{ConvertError, Diagnostics, Result};
