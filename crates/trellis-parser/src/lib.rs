//! # Trellis Parser
//!
//! Turns Trellis diagram text into a canonical syntax tree plus a fully
//! resolved rendering configuration.
//!
//! ## Usage
//!
//! ```
//! # use trellis_parser::{parse, ParseError};
//! # use trellis_core::config::Direction;
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "#direction: right\n\
//!                   [Customer] places -> * [Order]\n\
//!                   [Order|id: u64|total()]";
//!
//!     let diagram = parse(source)?;
//!     assert_eq!(diagram.config().direction, Direction::LeftToRight);
//!     assert_eq!(diagram.root().relations().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod grammar;
pub mod preprocess;

mod canonicalize;
mod resolve;
mod span;
mod style_def;

use std::borrow::Cow;

use log::{debug, info};

use trellis_core::{
    diagram::ParsedDiagram,
    style::{StyleTable, builtin_styles},
    syntax::Compartment,
};

pub use canonicalize::canonicalize;
pub use error::{Diagnostic, ParseError};
pub use grammar::{ClassGrammar, Grammar};
pub use preprocess::{Directives, MalformedDirective, Preprocessed, preprocess};
pub use resolve::resolve_config;
pub use span::Span;
pub use style_def::{StyleDefinition, StyleFlag, parse_custom_style};

/// The diagram pipeline: preprocess, parse, canonicalize and resolve.
///
/// A `DiagramParser` holds no per-document state, so one instance can parse
/// any number of documents, from any number of threads when `G` allows it.
#[derive(Debug, Clone)]
pub struct DiagramParser<G = ClassGrammar> {
    grammar: G,
    styles: Cow<'static, StyleTable>,
    defaults: Directives,
}

impl DiagramParser {
    /// A pipeline using the built-in grammar and style table.
    pub fn new() -> Self {
        Self::with_grammar(ClassGrammar)
    }
}

impl Default for DiagramParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Grammar> DiagramParser<G> {
    /// A pipeline using `grammar` and the built-in style table.
    pub fn with_grammar(grammar: G) -> Self {
        Self {
            grammar,
            styles: Cow::Borrowed(builtin_styles()),
            defaults: Directives::new(),
        }
    }

    /// Replace the base style table that custom styles are merged over.
    pub fn with_styles(mut self, styles: StyleTable) -> Self {
        self.styles = Cow::Owned(styles);
        self
    }

    /// Directives applied before the document's own.
    ///
    /// A document directive with the same key overrides the default.
    pub fn with_default_directives(mut self, defaults: Directives) -> Self {
        self.defaults = defaults;
        self
    }

    /// Run the pipeline over one document.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MalformedDirective`] for a `#` line without a value.
    /// - [`ParseError::Grammar`] carrying the grammar's own error, unmodified.
    pub fn parse(&self, source: &str) -> Result<ParsedDiagram, ParseError<G::Error>> {
        info!(bytes = source.len(); "Parsing diagram");

        let preprocessed = preprocess(source)?;
        let is_empty = preprocessed.is_empty();
        let (document_directives, code) = preprocessed.into_parts();
        let directives = self.merge_directives(document_directives);

        let root = if is_empty {
            debug!("Diagram has no content, skipping grammar");
            Compartment::default()
        } else {
            let raw = self.grammar.parse(&code).map_err(ParseError::Grammar)?;
            canonicalize(raw)
        };

        let config = resolve_config(&directives, &self.styles);

        info!(
            classifiers = root.classifiers().len(),
            relations = root.relations().len();
            "Diagram parsed"
        );

        Ok(ParsedDiagram::new(root, config))
    }

    fn merge_directives(&self, document: Directives) -> Directives {
        if self.defaults.is_empty() {
            return document;
        }

        let mut directives = self.defaults.clone();
        directives.extend(document);
        directives
    }
}

/// Parse `source` with the built-in grammar and style table.
///
/// # Errors
///
/// See [`DiagramParser::parse`].
pub fn parse(source: &str) -> Result<ParsedDiagram, ParseError> {
    DiagramParser::new().parse(source)
}
