//! Error types for Gridjson core.

use thiserror::Error;

use gridjson_engine::ConvertError;

/// Errors that can occur while loading or converting a sheet
#[derive(Error, Debug)]
pub enum GridjsonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid sheet: {0}")]
    InvalidSheet(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Unsupported sheet format: {0}")]
    UnsupportedFormat(String),

    #[error("Rhai compile error: {0}")]
    RhaiCompile(String),
}

pub type Result<T> = std::result::Result<T, GridjsonError>;
