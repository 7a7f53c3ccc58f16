//! Canonical syntax tree.
//!
//! The canonical tree is what downstream layout and rendering consume. Within
//! every [`Compartment`], classifier names are unique among siblings and no
//! two relations share a `(start, end)` pair. Relation identifiers are unique
//! across the whole tree.

use serde::Serialize;

/// A container of text lines, classifiers and relations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Compartment {
    lines: Vec<String>,
    classifiers: Vec<Classifier>,
    relations: Vec<Relation>,
}

impl Compartment {
    pub fn new(lines: Vec<String>, classifiers: Vec<Classifier>, relations: Vec<Relation>) -> Self {
        Self {
            lines,
            classifiers,
            relations,
        }
    }

    /// Literal text lines, in source order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Child classifiers, deduplicated by name.
    pub fn classifiers(&self) -> &[Classifier] {
        &self.classifiers
    }

    /// Relations, deduplicated by endpoint pair.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Find a direct child classifier by name.
    pub fn classifier(&self, name: &str) -> Option<&Classifier> {
        self.classifiers.iter().find(|c| c.name == name)
    }

    /// Returns `true` if the compartment holds no lines, classifiers or relations.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.classifiers.is_empty() && self.relations.is_empty()
    }
}

/// A named diagram node, possibly holding nested compartments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classifier {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    compartments: Vec<Compartment>,
}

impl Classifier {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, compartments: Vec<Compartment>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            compartments,
        }
    }

    /// The classifier type, e.g. `CLASS` or `DATABASE`.
    ///
    /// Style lookup uses this value uppercased.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }
}

/// Text attached to one end of a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A link between two classifier names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    id: usize,
    assoc: String,
    start: String,
    end: String,
    start_label: Label,
    end_label: Label,
}

impl Relation {
    pub fn new(
        id: usize,
        assoc: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        start_label: Label,
        end_label: Label,
    ) -> Self {
        Self {
            id,
            assoc: assoc.into(),
            start: start.into(),
            end: end.into(),
            start_label,
            end_label,
        }
    }

    /// Identifier assigned in traversal order, unique within one document.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The association kind, i.e. the arrow text such as `->` or `o-<>`.
    pub fn assoc(&self) -> &str {
        &self.assoc
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn start_label(&self) -> &Label {
        &self.start_label
    }

    pub fn end_label(&self) -> &Label {
        &self.end_label
    }

    /// The `(start, end)` endpoint pair used for deduplication.
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.start, &self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_serializes_camel_case_labels() {
        let relation = Relation::new(3, "->", "A", "B", Label::new("uses"), Label::default());

        let json = serde_json::to_value(&relation).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["startLabel"]["text"], "uses");
        assert_eq!(json["endLabel"]["text"], "");
    }

    #[test]
    fn test_classifier_serializes_kind_as_type() {
        let classifier = Classifier::new("CLASS", "Foo", vec![Compartment::default()]);

        let json = serde_json::to_value(&classifier).unwrap();

        assert_eq!(json["type"], "CLASS");
        assert_eq!(json["compartments"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_compartment_lookup_by_name() {
        let root = Compartment::new(
            vec![],
            vec![
                Classifier::new("CLASS", "A", vec![]),
                Classifier::new("DATABASE", "B", vec![]),
            ],
            vec![],
        );

        assert_eq!(root.classifier("B").map(Classifier::kind), Some("DATABASE"));
        assert!(root.classifier("C").is_none());
        assert!(!root.is_empty());
        assert!(Compartment::default().is_empty());
    }
}
