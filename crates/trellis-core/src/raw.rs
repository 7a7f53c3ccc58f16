//! Raw parse tree produced by a grammar adapter.
//!
//! These types mirror exactly what a grammar hands to the canonicalizer:
//! compartments holding text lines, classifiers and relations, with no
//! identifiers assigned and duplicates still present.

use serde::Serialize;

/// A compartment as emitted by the grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawCompartment {
    pub lines: Vec<String>,
    pub nodes: Vec<RawClassifier>,
    pub rels: Vec<RawRelation>,
}

impl RawCompartment {
    /// Returns `true` if the compartment holds no lines, nodes or relations.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.nodes.is_empty() && self.rels.is_empty()
    }
}

/// A classifier as emitted by the grammar, with its nested parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawClassifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub parts: Vec<RawCompartment>,
}

impl RawClassifier {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, parts: Vec<RawCompartment>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            parts,
        }
    }
}

/// A relation between two classifier names as emitted by the grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRelation {
    pub assoc: String,
    pub start: String,
    pub end: String,
    pub start_label: String,
    pub end_label: String,
}

impl RawRelation {
    /// Create an unlabelled relation.
    pub fn new(assoc: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            assoc: assoc.into(),
            start: start.into(),
            end: end.into(),
            start_label: String::new(),
            end_label: String::new(),
        }
    }

    /// Set both endpoint labels.
    pub fn with_labels(mut self, start_label: impl Into<String>, end_label: impl Into<String>) -> Self {
        self.start_label = start_label.into();
        self.end_label = end_label.into();
        self
    }
}
