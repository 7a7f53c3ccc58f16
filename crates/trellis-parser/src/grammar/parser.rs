//! Parser for the bracket class-diagram syntax.
//!
//! Works directly on the cleaned diagram text. Structural characters are
//! `[`, `]`, `|`, `;` and line breaks; everything else is text. The public
//! entry point is [`parse_document`].

use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{alt, cut_err, opt, repeat},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{none_of, one_of, take_while},
};

use trellis_core::raw::{RawClassifier, RawCompartment, RawRelation};

use crate::{
    error::{Diagnostic, ErrorCode},
    grammar::association,
    span::Span,
};

/// Diagnostic details attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GrammarContext {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<GrammarContext>>;

/// Classifier type used when the header carries no `<type>` tag.
const DEFAULT_TYPE: &str = "CLASS";

/// Deepest classifier nesting accepted before parsing stops with an error.
const MAX_NESTING: usize = 100;

/// Whitespace skipped around separators and before `]` or `|`.
const BLANK: [char; 4] = [' ', '\t', '\r', '\n'];

/// Build a Cut error carrying the given context
fn cut_error(input: &Input<'_>, context: GrammarContext) -> ErrMode<ContextError<GrammarContext>> {
    ErrMode::Cut(ContextError::new().add_context(input, &input.checkpoint(), context))
}

/// Parse spaces and tabs
fn spaces(input: &mut Input<'_>) -> IResult<()> {
    take_while(0.., [' ', '\t']).void().parse_next(input)
}

/// Parse a run of `;`/newline separators with surrounding spaces
///
/// Returns whether at least one separator was consumed.
fn separators(input: &mut Input<'_>) -> IResult<bool> {
    let count = repeat(0.., (spaces, one_of([';', '\n'])))
        .fold(|| 0usize, |count, _| count + 1)
        .parse_next(input)?;
    spaces(input)?;
    Ok(count > 0)
}

/// Check whether the current compartment ends here
fn at_boundary(input: &Input<'_>) -> bool {
    let rest = input.trim_start_matches(BLANK);
    rest.is_empty() || rest.starts_with([']', '|'])
}

/// Parse a run of text, honouring `\[`, `\]` and `\|` escapes
fn text<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    repeat::<_, _, (), _, _>(
        1..,
        alt((
            ('\\', one_of(['[', ']', '|'])).void(),
            none_of(['[', ']', '|', ';', '\n']).void(),
        )),
    )
    .take()
    .parse_next(input)
}

fn unescape(text: &str) -> String {
    text.replace("\\[", "[")
        .replace("\\]", "]")
        .replace("\\|", "|")
}

/// Split a `<type> Name` header into the uppercased type and the name
fn split_type_tag(header: &str) -> (String, String) {
    for (index, _) in header.match_indices('<') {
        let rest = &header[index + 1..];
        let tag_len = rest
            .find(|c: char| !c.is_ascii_lowercase())
            .unwrap_or(rest.len());
        if let Some(name) = rest[tag_len..].strip_prefix('>') {
            return (rest[..tag_len].to_uppercase(), name.trim().to_string());
        }
    }
    (DEFAULT_TYPE.to_string(), header.to_string())
}

/// Build a classifier from its parts; the first line of the first part is the header
fn build_classifier(mut parts: Vec<RawCompartment>) -> RawClassifier {
    let header = parts
        .first_mut()
        .and_then(|part| part.lines.first_mut());

    let Some(header) = header else {
        return RawClassifier::new(DEFAULT_TYPE, "", parts);
    };

    let (kind, name) = split_type_tag(header);
    header.clone_from(&name);
    RawClassifier::new(kind, name, parts)
}

/// Parse `|`-separated compartments
fn parts(input: &mut Input<'_>, depth: usize) -> IResult<Vec<RawCompartment>> {
    let mut parts = vec![compartment(input, depth)?];
    while opt((multispace0, '|', multispace0))
        .parse_next(input)?
        .is_some()
    {
        parts.push(compartment(input, depth)?);
    }
    Ok(parts)
}

/// Parse a classifier: `[` parts `]`
///
/// `depth` counts the classifiers enclosing this one.
fn classifier(input: &mut Input<'_>, depth: usize) -> IResult<RawClassifier> {
    let start = input.current_token_start();

    '['.parse_next(input)?;

    if depth >= MAX_NESTING {
        return Err(cut_error(
            input,
            GrammarContext {
                code: ErrorCode::E100,
                message: "classifiers nested too deeply",
                help: Some("flatten the diagram or split it into several documents"),
                start,
            },
        ));
    }

    let parts = cut_err((|i: &mut Input<'_>| parts(i, depth + 1), multispace0, ']'))
        .map(|(parts, _, _)| parts)
        .context(GrammarContext {
            code: ErrorCode::E101,
            message: "unclosed classifier",
            help: Some("add a closing `]`"),
            start,
        })
        .parse_next(input)?;

    Ok(build_classifier(parts))
}

/// Parse a classifier followed by any number of `label arrow label [Target]` links
fn linked_classifiers(
    input: &mut Input<'_>,
    compartment: &mut RawCompartment,
    depth: usize,
) -> IResult<()> {
    let mut source = classifier(input, depth)?;

    loop {
        let start = input.current_token_start();
        let checkpoint = input.checkpoint();

        let link = match opt(text).parse_next(input)? {
            Some(link) if !link.trim().is_empty() => unescape(link),
            _ => {
                input.reset(&checkpoint);
                break;
            }
        };

        let target = cut_err(|i: &mut Input<'_>| classifier(i, depth))
            .context(GrammarContext {
                code: ErrorCode::E103,
                message: "association has no target classifier",
                help: Some("end the association with a classifier such as `[Target]`"),
                start,
            })
            .parse_next(input)?;

        let Some(parts) = association::split_link(&link) else {
            return Err(cut_error(
                input,
                GrammarContext {
                    code: ErrorCode::E102,
                    message: "association has no arrow",
                    help: Some("connect the classifiers with an arrow such as `->`"),
                    start,
                },
            ));
        };

        compartment.rels.push(
            RawRelation::new(parts.assoc, source.name.clone(), target.name.clone())
                .with_labels(parts.start_label, parts.end_label),
        );
        compartment.nodes.push(source);
        source = target;
    }

    compartment.nodes.push(source);
    Ok(())
}

/// Parse one slot: a classifier, an association or a text line
fn slot(input: &mut Input<'_>, compartment: &mut RawCompartment, depth: usize) -> IResult<()> {
    if input.starts_with('[') {
        return linked_classifiers(input, compartment, depth);
    }

    let line = unescape(text(input)?.trim());
    if !line.is_empty() {
        compartment.lines.push(line);
    }
    Ok(())
}

/// Parse the slots of one compartment, up to `|`, `]` or end of input
fn compartment(input: &mut Input<'_>, depth: usize) -> IResult<RawCompartment> {
    let mut compartment = RawCompartment::default();

    separators(input)?;
    while !at_boundary(input) {
        slot(input, &mut compartment, depth)?;

        if !separators(input)? {
            if !at_boundary(input) {
                let start = input.current_token_start();
                return Err(cut_error(
                    input,
                    GrammarContext {
                        code: ErrorCode::E100,
                        message: "expected `;` or a line break",
                        help: Some("put each line, classifier and association in its own slot"),
                        start,
                    },
                ));
            }
            break;
        }
    }

    Ok(compartment)
}

/// Convert a winnow error at `error_pos` into a diagnostic.
///
/// Uses the innermost [`GrammarContext`] when present and falls back to a
/// generic E100 otherwise.
fn convert_error(
    err: ErrMode<ContextError<GrammarContext>>,
    error_pos: usize,
    text_len: usize,
) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    let span_from = |start: usize| Span::new(start..error_pos.max(start + 1).min(text_len));

    if let Some(GrammarContext {
        code,
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let mut diag = Diagnostic::error(*message)
            .with_code(*code)
            .with_label(span_from(*start), code.description());
        if let Some(h) = help {
            diag = diag.with_help(*h);
        }
        return diag;
    }

    Diagnostic::error("unexpected input")
        .with_code(ErrorCode::E100)
        .with_label(span_from(error_pos), ErrorCode::E100.description())
}

/// Diagnostic for structural characters left over after the root compartment
fn unexpected(found: char, offset: usize) -> Diagnostic {
    let span = Span::new(offset..offset + found.len_utf8());
    let diag = Diagnostic::error(format!("unexpected `{found}`"))
        .with_code(ErrorCode::E100)
        .with_label(span, ErrorCode::E100.description());

    match found {
        ']' => diag.with_help("remove it, or open a classifier with `[`"),
        '|' => diag.with_help("`|` separates compartments inside a classifier"),
        _ => diag,
    }
}

/// Parse cleaned diagram text into the root compartment.
pub(crate) fn parse_document(text: &str) -> Result<RawCompartment, Diagnostic> {
    let mut input = LocatingSlice::new(text);

    match compartment(&mut input, 0) {
        Ok(root) => {
            let rest = input.trim_start_matches(BLANK);
            match rest.chars().next() {
                None => Ok(root),
                Some(found) => Err(unexpected(found, text.len() - rest.len())),
            }
        }
        Err(err) => Err(convert_error(err, input.current_token_start(), text.len())),
    }
}
