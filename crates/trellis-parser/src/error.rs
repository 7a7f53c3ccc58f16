//! Error and diagnostic types for the Trellis parser.
//!
//! The pipeline fails in exactly two ways, both captured by [`ParseError`]:
//! a malformed `#key:value` directive, or a failure reported by the grammar
//! adapter. Grammar failures are carried through untouched.
//!
//! The built-in grammar reports its failures as a [`Diagnostic`]: a message
//! with an optional [`ErrorCode`], labelled source spans and help text.
//!
//! # Example
//!
//! ```
//! # use trellis_parser::error::{Diagnostic, ErrorCode};
//! # use trellis_parser::Span;
//!
//! let diag = Diagnostic::error("unclosed classifier")
//!     .with_code(ErrorCode::E101)
//!     .with_label(Span::new(0..4), "classifier opened here")
//!     .with_help("add a closing `]`");
//! assert_eq!(diag.to_string(), "error[E101]: unclosed classifier");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
