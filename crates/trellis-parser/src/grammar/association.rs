//! Splitting association text into labels and arrow.

use winnow::{
    Parser as _,
    combinator::opt,
    error::ModalResult,
    token::{one_of, take_while},
};

/// The pieces of the text between two associated classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link<'a> {
    pub start_label: &'a str,
    pub assoc: &'a str,
    pub end_label: &'a str,
}

/// Arrow shape: `[<:o+]*[-_]/?[-_]*[:o+>]*`.
fn arrow<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        take_while(0.., ['<', ':', 'o', '+']),
        one_of(['-', '_']),
        opt('/'),
        take_while(0.., ['-', '_']),
        take_while(0.., [':', 'o', '+', '>']),
    )
        .take()
        .parse_next(input)
}

/// Split link text at the leftmost arrow.
///
/// Text before the arrow is the start label, text after it the end label,
/// both trimmed. Returns `None` if the text contains no arrow.
pub(crate) fn split_link(text: &str) -> Option<Link<'_>> {
    text.char_indices().find_map(|(index, _)| {
        let mut rest = &text[index..];
        let assoc = arrow.parse_next(&mut rest).ok()?;
        Some(Link {
            start_label: text[..index].trim(),
            assoc,
            end_label: rest.trim(),
        })
    })
}
