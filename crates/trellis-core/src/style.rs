//! Per-classifier visual styles.
//!
//! A [`Style`] bundles the flags, colors and shape a renderer applies to every
//! classifier of a given type. Styles are looked up by the uppercased
//! classifier type in a [`StyleTable`]. The [`builtin_styles`] table covers the
//! standard classifier types and is shared read-only across all parses.

use std::{fmt, str::FromStr, sync::LazyLock};

use indexmap::IndexMap;
use serde::Serialize;

use crate::{UnknownVariant, config::Direction};

/// Mapping from uppercased classifier type to its [`Style`].
pub type StyleTable = IndexMap<String, Style>;

/// The shape a renderer draws for a classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visual {
    Actor,
    #[default]
    Class,
    Database,
    Ellipse,
    End,
    Frame,
    Hidden,
    Input,
    Lollipop,
    None,
    Note,
    Package,
    Pipe,
    Receiver,
    Rhomb,
    Roundrect,
    Sender,
    Socket,
    Start,
    Sync,
    Table,
    Transceiver,
}

impl Visual {
    /// Every visual, in keyword order.
    pub const ALL: [Visual; 22] = [
        Visual::Actor,
        Visual::Class,
        Visual::Database,
        Visual::Ellipse,
        Visual::End,
        Visual::Frame,
        Visual::Hidden,
        Visual::Input,
        Visual::Lollipop,
        Visual::None,
        Visual::Note,
        Visual::Package,
        Visual::Pipe,
        Visual::Receiver,
        Visual::Rhomb,
        Visual::Roundrect,
        Visual::Sender,
        Visual::Socket,
        Visual::Start,
        Visual::Sync,
        Visual::Table,
        Visual::Transceiver,
    ];

    /// The keyword used in style definitions, e.g. `visual=database`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visual::Actor => "actor",
            Visual::Class => "class",
            Visual::Database => "database",
            Visual::Ellipse => "ellipse",
            Visual::End => "end",
            Visual::Frame => "frame",
            Visual::Hidden => "hidden",
            Visual::Input => "input",
            Visual::Lollipop => "lollipop",
            Visual::None => "none",
            Visual::Note => "note",
            Visual::Package => "package",
            Visual::Pipe => "pipe",
            Visual::Receiver => "receiver",
            Visual::Rhomb => "rhomb",
            Visual::Roundrect => "roundrect",
            Visual::Sender => "sender",
            Visual::Socket => "socket",
            Visual::Start => "start",
            Visual::Sync => "sync",
            Visual::Table => "table",
            Visual::Transceiver => "transceiver",
        }
    }
}

impl FromStr for Visual {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Visual::ALL
            .into_iter()
            .find(|visual| visual.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("visual", s))
    }
}

impl fmt::Display for Visual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual attributes for one classifier type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Style {
    pub bold: bool,
    pub underline: bool,
    pub italic: bool,
    pub dashed: bool,
    pub empty: bool,
    pub center: bool,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub visual: Visual,
    pub direction: Direction,
}

impl Style {
    fn builtin(visual: Visual) -> Self {
        Self {
            visual,
            ..Self::default()
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    fn empty(mut self) -> Self {
        self.empty = true;
        self
    }

    fn centered(mut self) -> Self {
        self.center = true;
        self
    }
}

static BUILTIN_STYLES: LazyLock<StyleTable> = LazyLock::new(|| {
    [
        ("ABSTRACT", Style::builtin(Visual::Class).italic().centered()),
        ("ACTOR", Style::builtin(Visual::Actor).centered()),
        ("CHOICE", Style::builtin(Visual::Rhomb).centered()),
        ("CLASS", Style::builtin(Visual::Class).bold().centered()),
        ("DATABASE", Style::builtin(Visual::Database).bold().centered()),
        ("END", Style::builtin(Visual::End).empty()),
        ("FRAME", Style::builtin(Visual::Frame)),
        ("HIDDEN", Style::builtin(Visual::Hidden).empty()),
        ("INPUT", Style::builtin(Visual::Input).centered()),
        ("INSTANCE", Style::builtin(Visual::Class).underline().centered()),
        ("LABEL", Style::builtin(Visual::None)),
        ("NOTE", Style::builtin(Visual::Note)),
        ("PACKAGE", Style::builtin(Visual::Package)),
        ("RECEIVER", Style::builtin(Visual::Receiver)),
        ("REFERENCE", Style::builtin(Visual::Class).dashed().centered()),
        ("SENDER", Style::builtin(Visual::Sender)),
        ("START", Style::builtin(Visual::Start).empty()),
        ("STATE", Style::builtin(Visual::Roundrect).centered()),
        ("TABLE", Style::builtin(Visual::Table).centered()),
        ("TRANSCEIVER", Style::builtin(Visual::Transceiver)),
        ("USECASE", Style::builtin(Visual::Ellipse).centered()),
    ]
    .into_iter()
    .map(|(name, style)| (name.to_string(), style))
    .collect()
});

/// The built-in style table, keyed by uppercased classifier type.
///
/// The table is a process-wide constant. Parsers merge it into a fresh map per
/// document and never write into it.
pub fn builtin_styles() -> &'static StyleTable {
    &BUILTIN_STYLES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_round_trips_through_keyword() {
        for visual in Visual::ALL {
            assert_eq!(visual.as_str().parse::<Visual>(), Ok(visual));
        }
    }

    #[test]
    fn test_unknown_visual_is_rejected() {
        let err = "hexagon".parse::<Visual>().unwrap_err();
        assert_eq!(err.kind(), "visual");
        assert_eq!(err.value(), "hexagon");
        assert_eq!(err.to_string(), "unknown visual `hexagon`");
    }

    #[test]
    fn test_builtin_class_style() {
        let class = &builtin_styles()["CLASS"];
        assert!(class.bold);
        assert!(class.center);
        assert!(!class.italic);
        assert_eq!(class.visual, Visual::Class);
        assert_eq!(class.direction, Direction::TopToBottom);
        assert!(class.fill.is_none());
    }

    #[test]
    fn test_builtin_table_keys_are_uppercase() {
        assert_eq!(builtin_styles().len(), 21);
        for key in builtin_styles().keys() {
            assert_eq!(key, &key.to_uppercase());
        }
    }

    #[test]
    fn test_builtin_flags() {
        let styles = builtin_styles();
        assert!(styles["ABSTRACT"].italic);
        assert!(styles["INSTANCE"].underline);
        assert!(styles["REFERENCE"].dashed);
        assert!(styles["START"].empty);
        assert!(!styles["NOTE"].center);
        assert_eq!(styles["USECASE"].visual, Visual::Ellipse);
        assert_eq!(styles["LABEL"].visual, Visual::None);
    }

    #[test]
    fn test_visual_serializes_lowercase() {
        let json = serde_json::to_value(Visual::Roundrect).unwrap();
        assert_eq!(json, "roundrect");
    }
}
