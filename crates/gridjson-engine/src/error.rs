//! Error types for header inference.

use thiserror::Error;

use crate::engine::{Axis, CellRange};

/// Failures detected while resolving sheet geometry or headers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Malformed cell address: {0:?}")]
    MalformedAddress(String),

    #[error("Malformed range: {0:?}")]
    MalformedRange(String),

    #[error("Invalid default range: {0:?}")]
    InvalidDefaultRange(String),

    #[error("{axis} header {header} lies outside the sheet extent {extent}")]
    HeaderOutOfBounds {
        axis: Axis,
        header: CellRange,
        extent: CellRange,
    },

    #[error("{axis} header entry {name:?} needs {requirement}")]
    IncompleteHeaderSpec {
        axis: Axis,
        name: String,
        requirement: &'static str,
    },

    #[error("{axis} headers {first:?} and {second:?} share data index {index}")]
    DuplicateDataIndex {
        axis: Axis,
        index: usize,
        first: String,
        second: String,
    },
}

impl ConvertError {
    /// Unparseable coordinates have no safe fallback and are always raised.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ConvertError::MalformedAddress(_) | ConvertError::MalformedRange(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Error policy for one conversion.
///
/// With `throw_error` set, every failure is returned to the caller. Otherwise
/// recoverable failures are logged and kept here, and the caller continues
/// with a safe fallback value.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    throw_error: bool,
    errors: Vec<ConvertError>,
}

impl Diagnostics {
    pub fn new(throw_error: bool) -> Self {
        Diagnostics {
            throw_error,
            errors: Vec::new(),
        }
    }

    /// Raise `err`, or record it and hand back `fallback`.
    pub fn recover<T>(&mut self, err: ConvertError, fallback: T) -> Result<T> {
        if self.throw_error || !err.is_recoverable() {
            return Err(err);
        }
        log::warn!("{err}");
        self.errors.push(err);
        Ok(fallback)
    }

    pub fn errors(&self) -> &[ConvertError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ConvertError> {
        self.errors
    }
}
