//! Grammar adapters.
//!
//! A [`Grammar`] turns cleaned diagram text into a [`RawCompartment`]. The
//! pipeline treats it as an opaque collaborator: whatever error it returns is
//! handed back to the caller unchanged.
//!
//! [`ClassGrammar`] is the built-in adapter for the bracket class-diagram
//! syntax. Any `Fn(&str) -> Result<RawCompartment, E>` is also a grammar,
//! which lets tests substitute a deterministic fake.

mod association;
mod parser;

use std::error::Error;

use log::debug;

use trellis_core::raw::RawCompartment;

use crate::error::Diagnostic;

/// Maps cleaned diagram text to a raw parse tree.
pub trait Grammar {
    /// Grammar-specific failure, propagated by the pipeline unmodified.
    type Error: Error + 'static;

    /// Parse diagram text with directives and comments already blanked out.
    fn parse(&self, text: &str) -> Result<RawCompartment, Self::Error>;
}

impl<F, E> Grammar for F
where
    F: Fn(&str) -> Result<RawCompartment, E>,
    E: Error + 'static,
{
    type Error = E;

    fn parse(&self, text: &str) -> Result<RawCompartment, E> {
        self(text)
    }
}

/// The built-in grammar for bracket class diagrams.
///
/// ```text
/// [<abstract> Shape|area(): float]
/// [Shape] <:- [Circle|radius: float]
/// [Circle] uses -> [Point]
/// ```
///
/// - `[Name|part|part]` declares a classifier with `|`-separated compartments.
/// - `<type>` before the name selects the classifier type; the default is `CLASS`.
/// - `;` or a line break separates slots within a compartment.
/// - `[A] label arrow label [B]` declares a relation; links may be chained.
/// - `\[`, `\]` and `\|` escape the structural characters in text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassGrammar;

impl Grammar for ClassGrammar {
    type Error = Diagnostic;

    fn parse(&self, text: &str) -> Result<RawCompartment, Diagnostic> {
        let root = parser::parse_document(text)?;
        debug!(
            lines = root.lines.len(),
            nodes = root.nodes.len(),
            rels = root.rels.len();
            "Grammar produced raw tree"
        );
        Ok(root)
    }
}
