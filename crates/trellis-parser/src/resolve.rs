//! Directive-driven configuration resolution.
//!
//! Every field of [`Config`] has a documented default. A directive only
//! replaces that default when its value makes sense for the field; anything
//! else degrades silently, matching how authors expect a sketching tool to
//! behave when a directive is misspelled.

use log::{debug, trace};

use trellis_core::{
    config::{Config, DEFAULT_BACKGROUND, DEFAULT_FILL, DEFAULT_FONT, DEFAULT_STROKE},
    style::StyleTable,
};

use crate::{preprocess::Directives, style_def::parse_custom_style};

/// Prefix of directive keys that define a per-class style.
const STYLE_PREFIX: char = '.';

/// Resolve the directive map against the defaults.
///
/// `builtin_styles` is merged into a fresh table; user styles from `.Name`
/// directives override built-ins of the same uppercased name.
pub fn resolve_config(directives: &Directives, builtin_styles: &StyleTable) -> Config {
    let defaults = Config::default();
    let lookup = |key: &str| directives.get(key).map(String::as_str);

    let config = Config {
        arrow_size: number_or(lookup("arrowSize"), defaults.arrow_size),
        bend_size: number_or(lookup("bendSize"), defaults.bend_size),
        direction: lookup("direction")
            .and_then(|direction| direction.parse().ok())
            .unwrap_or_default(),
        gutter: number_or(lookup("gutter"), defaults.gutter),
        edge_margin: number_or(lookup("edgeMargin"), defaults.edge_margin),
        gravity: gravity(lookup("gravity"), defaults.gravity),
        edges: lookup("edges")
            .and_then(|edges| edges.parse().ok())
            .unwrap_or_default(),
        fill: fill(lookup("fill")),
        background: text_or(lookup("background"), DEFAULT_BACKGROUND),
        fill_arrows: lookup("fillArrows") == Some("true"),
        font: text_or(lookup("font"), DEFAULT_FONT),
        font_size: number_or(lookup("fontSize"), defaults.font_size),
        leading: number_or(lookup("leading"), defaults.leading),
        line_width: number_or(lookup("lineWidth"), defaults.line_width),
        padding: number_or(lookup("padding"), defaults.padding),
        spacing: number_or(lookup("spacing"), defaults.spacing),
        stroke: text_or(lookup("stroke"), DEFAULT_STROKE),
        title: text_or(lookup("title"), &defaults.title),
        zoom: number_or(lookup("zoom"), defaults.zoom),
        acyclicer: lookup("acyclicer").and_then(|acyclicer| acyclicer.parse().ok()),
        ranker: lookup("ranker")
            .and_then(|ranker| ranker.parse().ok())
            .unwrap_or_default(),
        styles: styles(directives, builtin_styles),
    };

    debug!(
        directives = directives.len(),
        styles = config.styles.len();
        "Resolved configuration"
    );
    trace!(config:? = config; "Resolved configuration");

    config
}

/// A finite, non-zero number, or `default`.
///
/// Zero counts as unset so `#padding:0` and `#padding:` behave alike.
fn number_or(value: Option<&str>, default: f64) -> f64 {
    value
        .and_then(parse_number)
        .filter(|number| *number != 0.0)
        .unwrap_or(default)
}

/// Gravity keeps an explicit zero; only a missing or unreadable value
/// falls back to the default.
fn gravity(value: Option<&str>, default: f64) -> f64 {
    value.and_then(parse_number).unwrap_or(default)
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn text_or(value: Option<&str>, default: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn fill(value: Option<&str>) -> Vec<String> {
    match value.filter(|value| !value.is_empty()) {
        Some(palette) => palette.split(';').map(str::to_string).collect(),
        None => DEFAULT_FILL.iter().map(|color| color.to_string()).collect(),
    }
}

fn styles(directives: &Directives, builtin_styles: &StyleTable) -> StyleTable {
    let mut styles = builtin_styles.clone();

    for (key, definition) in directives {
        let Some(class_name) = key.strip_prefix(STYLE_PREFIX) else {
            continue;
        };

        let class_name = class_name.to_uppercase();
        trace!(class = class_name, definition = definition; "Custom style");
        styles.insert(class_name, parse_custom_style(definition));
    }

    styles
}
