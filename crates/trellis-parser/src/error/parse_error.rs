//! The error type returned by the parsing pipeline.

use thiserror::Error;

use crate::{error::Diagnostic, preprocess::MalformedDirective, span::Span};

/// Error type for one pipeline invocation.
///
/// `E` is the grammar adapter's error type; the built-in grammar uses
/// [`Diagnostic`].
#[derive(Debug, Error)]
pub enum ParseError<E = Diagnostic> {
    /// A `#` line without a `:`-separated value.
    ///
    /// `line` is 1-based; `span` covers the whole line in the source.
    #[error("line {line}: Malformed directive")]
    MalformedDirective { line: usize, span: Span },

    /// The grammar adapter failed. The error is passed through unmodified.
    #[error(transparent)]
    Grammar(E),
}

impl<E> ParseError<E> {
    /// Returns the grammar error, if this is one.
    pub fn grammar_error(&self) -> Option<&E> {
        match self {
            ParseError::Grammar(err) => Some(err),
            ParseError::MalformedDirective { .. } => None,
        }
    }
}

impl<E> From<MalformedDirective> for ParseError<E> {
    fn from(err: MalformedDirective) -> Self {
        ParseError::MalformedDirective {
            line: err.line,
            span: err.span,
        }
    }
}
