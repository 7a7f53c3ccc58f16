//! Custom style definitions.
//!
//! A directive such as `#.Foo: bold dashed fill=#fff visual=note` defines a
//! style for classifiers of type `FOO`. Both halves of a definition are found
//! anywhere in the text. A `key=` pattern yields the value up to the next
//! space, and the last occurrence of a key wins. Flag keywords are matched as
//! substrings, so `bolder` also sets `bold` and `text-align=left` sets
//! `align`.

use indexmap::IndexMap;

use trellis_core::style::Style;

const ALIGN: &str = "align";
const FILL: &str = "fill";
const STROKE: &str = "stroke";
const VISUAL: &str = "visual";
const DIRECTION: &str = "direction";

const KEYS: [&str; 5] = [ALIGN, FILL, STROKE, VISUAL, DIRECTION];

/// Flag keywords recognized in a style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFlag {
    Bold,
    Underline,
    Italic,
    Dashed,
    Empty,
}

impl StyleFlag {
    /// The keyword that turns this flag on.
    pub fn keyword(self) -> &'static str {
        match self {
            StyleFlag::Bold => "bold",
            StyleFlag::Underline => "underline",
            StyleFlag::Italic => "italic",
            StyleFlag::Dashed => "dashed",
            StyleFlag::Empty => "empty",
        }
    }
}

/// A tokenized style definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDefinition<'a> {
    source: &'a str,
    values: IndexMap<&'a str, &'a str>,
}

impl<'a> StyleDefinition<'a> {
    pub fn new(source: &'a str) -> Self {
        let values = KEYS
            .into_iter()
            .filter_map(|key| last_value(source, key).map(|value| (key, value)))
            .collect();

        Self { source, values }
    }

    /// Whether the flag keyword occurs anywhere in the definition.
    pub fn has_flag(&self, flag: StyleFlag) -> bool {
        self.source.contains(flag.keyword())
    }

    /// The last non-empty value given for `key`.
    pub fn value(&self, key: &str) -> Option<&'a str> {
        self.values
            .get(key)
            .copied()
            .filter(|value| !value.is_empty())
    }

    /// Convert the definition into a [`Style`].
    ///
    /// Unknown `visual` and `direction` values fall back to their defaults.
    pub fn to_style(&self) -> Style {
        Style {
            bold: self.has_flag(StyleFlag::Bold),
            underline: self.has_flag(StyleFlag::Underline),
            italic: self.has_flag(StyleFlag::Italic),
            dashed: self.has_flag(StyleFlag::Dashed),
            empty: self.has_flag(StyleFlag::Empty),
            center: self.value(ALIGN) != Some("left"),
            fill: self.value(FILL).map(str::to_string),
            stroke: self.value(STROKE).map(str::to_string),
            visual: self
                .value(VISUAL)
                .and_then(|visual| visual.parse().ok())
                .unwrap_or_default(),
            direction: self
                .value(DIRECTION)
                .and_then(|direction| direction.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// The text after the last `key=` in `source`, up to the next space.
fn last_value<'a>(source: &'a str, key: &str) -> Option<&'a str> {
    let pattern = format!("{key}=");
    let (index, _) = source.rmatch_indices(pattern.as_str()).next()?;
    let rest = &source[index + pattern.len()..];
    Some(rest.find(' ').map_or(rest, |end| &rest[..end]))
}

/// Parse a custom style definition string.
pub fn parse_custom_style(definition: &str) -> Style {
    StyleDefinition::new(definition).to_style()
}
