//! Resolved rendering configuration.
//!
//! [`Config`] is the strongly-typed record a downstream layout engine and
//! renderer consume. Layout reads `direction`, `ranker`, `acyclicer`,
//! `spacing`, `gutter`, `edge_margin`, `gravity`, `arrow_size` and
//! `bend_size`; everything else is typography and styling.
//!
//! # Example
//!
//! ```
//! # use trellis_core::config::{Config, Direction, Ranker};
//! let config = Config::default();
//! assert_eq!(config.direction, Direction::TopToBottom);
//! assert_eq!(config.ranker, Ranker::NetworkSimplex);
//! assert_eq!(config.font, "Helvetica");
//! ```

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{
    UnknownVariant,
    style::{StyleTable, builtin_styles},
};

/// Default alternating fill palette for nested compartments.
pub const DEFAULT_FILL: [&str; 4] = ["#eee8d5", "#fdf6e3", "#eee8d5", "#fdf6e3"];

/// Default stroke color.
pub const DEFAULT_STROKE: &str = "#33322E";

/// Default font family.
pub const DEFAULT_FONT: &str = "Helvetica";

/// Default background color.
pub const DEFAULT_BACKGROUND: &str = "transparent";

/// Graph flow direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "LR")]
    LeftToRight,
}

impl FromStr for Direction {
    type Err = UnknownVariant;

    /// Parses the directive keywords `down` and `right`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "down" => Ok(Direction::TopToBottom),
            "right" => Ok(Direction::LeftToRight),
            _ => Err(UnknownVariant::new("direction", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopToBottom => f.write_str("TB"),
            Direction::LeftToRight => f.write_str("LR"),
        }
    }
}

/// Node ranking algorithm for the layout engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranker {
    #[default]
    NetworkSimplex,
    TightTree,
    LongestPath,
}

impl FromStr for Ranker {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "network-simplex" => Ok(Ranker::NetworkSimplex),
            "tight-tree" => Ok(Ranker::TightTree),
            "longest-path" => Ok(Ranker::LongestPath),
            _ => Err(UnknownVariant::new("ranker", s)),
        }
    }
}

/// Edge corner rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    Hard,
    #[default]
    Rounded,
}

impl FromStr for EdgeStyle {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hard" => Ok(EdgeStyle::Hard),
            "rounded" => Ok(EdgeStyle::Rounded),
            _ => Err(UnknownVariant::new("edges", s)),
        }
    }
}

/// Cycle-breaking strategy for the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Acyclicer {
    Greedy,
}

impl FromStr for Acyclicer {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(Acyclicer::Greedy),
            _ => Err(UnknownVariant::new("acyclicer", s)),
        }
    }
}

/// Fully-resolved rendering and layout parameters for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub arrow_size: f64,
    pub bend_size: f64,
    pub direction: Direction,
    pub gutter: f64,
    pub edge_margin: f64,
    pub gravity: f64,
    pub edges: EdgeStyle,
    pub fill: Vec<String>,
    pub background: String,
    pub fill_arrows: bool,
    pub font: String,
    pub font_size: f64,
    pub leading: f64,
    pub line_width: f64,
    pub padding: f64,
    pub spacing: f64,
    pub stroke: String,
    pub title: String,
    pub zoom: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acyclicer: Option<Acyclicer>,
    pub ranker: Ranker,
    pub styles: StyleTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arrow_size: 1.0,
            bend_size: 0.3,
            direction: Direction::default(),
            gutter: 5.0,
            edge_margin: 0.0,
            gravity: 1.0,
            edges: EdgeStyle::default(),
            fill: DEFAULT_FILL.iter().map(|color| color.to_string()).collect(),
            background: DEFAULT_BACKGROUND.to_string(),
            fill_arrows: false,
            font: DEFAULT_FONT.to_string(),
            font_size: 12.0,
            leading: 1.25,
            line_width: 3.0,
            padding: 8.0,
            spacing: 40.0,
            stroke: DEFAULT_STROKE.to_string(),
            title: String::new(),
            zoom: 1.0,
            acyclicer: None,
            ranker: Ranker::default(),
            styles: builtin_styles().clone(),
        }
    }
}
