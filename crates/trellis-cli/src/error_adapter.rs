//! Error adapter for converting TrellisError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Grammar failures already carry a [`Diagnostic`]. A malformed directive is
//! turned into one here, labelled on the offending source line.

use std::{borrow::Cow, fmt};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use trellis::TrellisError;
use trellis_parser::{
    ParseError, Span,
    error::{Diagnostic, ErrorCode},
};

/// Adapter for a single trellis diagnostic.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: Cow<'a, Diagnostic>,
    /// Source text the diagnostic's spans point into
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self {
            diag: Cow::Borrowed(diag),
            src,
        }
    }

    /// Create an adapter for a diagnostic built by the CLI itself.
    pub fn owned(diag: Diagnostic, src: &'a str) -> Self {
        Self {
            diag: Cow::Owned(diag),
            src,
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        // The first label marks the error location
        Some(Box::new(labels.iter().enumerate().map(|(index, label)| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if index == 0 {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Adapter for non-diagnostic [`TrellisError`] variants.
///
/// This adapter handles errors that don't have source locations: I/O,
/// configuration and export errors.
pub struct ErrorAdapter<'a>(pub &'a TrellisError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TrellisError::Io(_) => "trellis::io",
            TrellisError::Parse { .. } => return None,
            TrellisError::Export(_) => "trellis::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Diagnostic for a `#` line without a `:`-separated value.
fn malformed_directive(line: usize, span: Span) -> Diagnostic {
    Diagnostic::error(format!("line {line}: Malformed directive"))
        .with_code(ErrorCode::E001)
        .with_label(span, ErrorCode::E001.description())
        .with_help("write directives as `#key: value`")
}

/// Convert a [`TrellisError`] into a reportable error.
pub fn to_reportable(err: &TrellisError) -> Reportable<'_> {
    match err {
        TrellisError::Parse {
            err: ParseError::MalformedDirective { line, span },
            src,
        } => Reportable::Diagnostic(DiagnosticAdapter::owned(
            malformed_directive(*line, *span),
            src,
        )),
        TrellisError::Parse {
            err: ParseError::Grammar(diag),
            src,
        } => Reportable::Diagnostic(DiagnosticAdapter::new(diag, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_directive_report() {
        let err = TrellisError::new_parse_error(
            ParseError::MalformedDirective {
                line: 2,
                span: Span::new(4..11),
            },
            "[A]\n#broken",
        );

        let reportable = to_reportable(&err);
        assert_eq!(reportable.to_string(), "line 2: Malformed directive");
        assert_eq!(reportable.code().map(|c| c.to_string()), Some("E001".to_string()));

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 4);
        assert_eq!(labels[0].len(), 7);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_grammar_diagnostic_report() {
        let diag = Diagnostic::error("unclosed classifier")
            .with_code(ErrorCode::E101)
            .with_label(Span::new(0..4), "classifier opened here")
            .with_help("add a closing `]`");
        let err = TrellisError::new_parse_error(ParseError::Grammar(diag), "[Foo");

        let reportable = to_reportable(&err);
        assert_eq!(reportable.to_string(), "unclosed classifier");
        assert_eq!(
            reportable.help().map(|h| h.to_string()),
            Some("add a closing `]`".to_string())
        );
        assert!(reportable.source_code().is_some());
    }

    #[test]
    fn test_secondary_labels() {
        let diag = Diagnostic::error("error with labels")
            .with_label(Span::new(0..5), "primary")
            .with_label(Span::new(10..15), "secondary");

        let adapter = DiagnosticAdapter::new(&diag, "some source code");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].label(), Some("secondary"));
    }

    #[test]
    fn test_non_parse_error() {
        let err = TrellisError::Io(std::io::Error::other("disk full"));

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "I/O error: disk full");
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
        assert_eq!(
            reportable.code().map(|c| c.to_string()),
            Some("trellis::io".to_string())
        );
    }
}
