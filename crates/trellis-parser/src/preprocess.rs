//! Line classification and directive extraction.
//!
//! The preprocessor splits the source into lines and sorts each one into
//! exactly one bucket:
//!
//! - **directive**: first character is `#`, parsed as `#key:value`
//! - **comment**: trimmed text starts with `//`
//! - **diagram**: everything else, kept trimmed
//!
//! Directive and comment lines are blanked rather than removed so the text
//! handed to the grammar has the same line numbering as the source.

use indexmap::IndexMap;
use log::{debug, trace};
use thiserror::Error;

use crate::span::Span;

/// Document directives, keyed by trimmed key. A repeated key keeps the last value.
pub type Directives = IndexMap<String, String>;

/// A `#` line without a `:`-separated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("line {line}: Malformed directive")]
pub struct MalformedDirective {
    /// 1-based line number.
    pub line: usize,
    /// The offending line in the source.
    pub span: Span,
}

/// One source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'src> {
    index: usize,
    offset: usize,
    text: &'src str,
}

impl<'src> Line<'src> {
    /// 0-based line index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based line number, as used in error messages.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// The raw line text, without its trailing newline.
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Byte range of the line in the source.
    pub fn span(&self) -> Span {
        Span::new(self.offset..self.offset + self.text.trim_end().len())
    }

    pub fn is_directive(&self) -> bool {
        self.text.starts_with('#')
    }

    pub fn is_comment(&self) -> bool {
        self.text.trim().starts_with("//")
    }

    /// The text this line contributes to the grammar input.
    fn compilable(&self) -> &'src str {
        if self.is_directive() || self.is_comment() {
            ""
        } else {
            self.text.trim()
        }
    }

    /// Split a directive line into its key and value.
    ///
    /// Only the first two `:`-separated fields are used; anything after a
    /// second `:` is dropped.
    fn directive(&self) -> Result<(&'src str, &'src str), MalformedDirective> {
        let body = self.text.strip_prefix('#').unwrap_or(self.text);
        let mut fields = body.split(':');
        match (fields.next(), fields.next()) {
            (Some(key), Some(value)) => Ok((key.trim(), value.trim())),
            _ => Err(MalformedDirective {
                line: self.number(),
                span: self.span(),
            }),
        }
    }
}

/// Split source text into indexed lines.
pub fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    source
        .split('\n')
        .enumerate()
        .scan(0, |offset, (index, text)| {
            let line = Line {
                index,
                offset: *offset,
                text,
            };
            *offset += text.len() + 1;
            Some(line)
        })
}

/// The preprocessor's output: directives plus the cleaned diagram text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preprocessed {
    directives: Directives,
    code: String,
}

impl Preprocessed {
    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    /// Diagram text for the grammar, one line per source line.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns `true` if no line carries diagram content.
    pub fn is_empty(&self) -> bool {
        self.code.chars().all(|c| c == '\n')
    }

    pub fn into_parts(self) -> (Directives, String) {
        (self.directives, self.code)
    }
}

/// Separate directives and comments from diagram content.
///
/// # Errors
///
/// Returns [`MalformedDirective`] for the first `#` line lacking a `:`.
pub fn preprocess(source: &str) -> Result<Preprocessed, MalformedDirective> {
    let mut directives = Directives::new();
    let mut code = Vec::new();

    for line in lines(source) {
        if line.is_directive() {
            let (key, value) = line.directive()?;
            trace!(line = line.number(), key = key, value = value; "Directive");
            directives.insert(key.to_string(), value.to_string());
        }
        code.push(line.compilable());
    }

    debug!(lines = code.len(), directives = directives.len(); "Preprocessed source");

    Ok(Preprocessed {
        directives,
        code: code.join("\n"),
    })
}
