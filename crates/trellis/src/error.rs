//! Error types for Trellis operations.

use std::io;

use thiserror::Error;

use trellis_parser::ParseError;

/// The main error type for Trellis operations.
///
/// # Diagnostic Variants
///
/// `Parse` keeps the text the error's spans point into: the original source
/// for a malformed directive, the cleaned diagram text for a grammar error.
/// Both have the same line structure.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

impl TrellisError {
    /// Create a new `Parse` error with the text its spans refer to.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
