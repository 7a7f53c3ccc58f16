//! Raw parse tree canonicalization.
//!
//! Walks the raw tree depth-first, visiting compartments in pre-order, and
//! produces the canonical [`Compartment`] tree:
//!
//! 1. Relations of the visited compartment get the next identifiers, in order.
//! 2. Child classifiers are canonicalized, which visits their compartments.
//! 3. Classifiers are stably sorted by descending compartment count, then
//!    deduplicated by name keeping the first survivor.
//! 4. Relations are deduplicated by `(start, end)` keeping the first in
//!    document order.
//!
//! The identifier counter lives in state created per call, so
//! independent documents always number their relations from zero.

use std::{cmp::Reverse, collections::HashSet, hash::Hash};

use log::debug;

use trellis_core::{
    raw::{RawClassifier, RawCompartment, RawRelation},
    syntax::{Classifier, Compartment, Label, Relation},
};

/// Canonicalize a raw tree rooted at `root`.
pub fn canonicalize(root: RawCompartment) -> Compartment {
    let mut canonicalizer = Canonicalizer::default();
    let root = canonicalizer.compartment(root);

    debug!(
        relations = canonicalizer.next_relation_id,
        dropped_classifiers = canonicalizer.dropped_classifiers,
        dropped_relations = canonicalizer.dropped_relations;
        "Canonicalized syntax tree"
    );

    root
}

/// State for one canonicalization pass.
#[derive(Debug, Default)]
struct Canonicalizer {
    next_relation_id: usize,
    dropped_classifiers: usize,
    dropped_relations: usize,
}

impl Canonicalizer {
    fn compartment(&mut self, raw: RawCompartment) -> Compartment {
        let RawCompartment { lines, nodes, rels } = raw;

        let relations: Vec<Relation> = rels.into_iter().map(|rel| self.relation(rel)).collect();

        let mut classifiers: Vec<Classifier> =
            nodes.into_iter().map(|node| self.classifier(node)).collect();
        classifiers.sort_by_key(|classifier| Reverse(classifier.compartments().len()));

        let classifier_count = classifiers.len();
        let classifiers = first_by_key(classifiers, |c| c.name().to_string());
        self.dropped_classifiers += classifier_count - classifiers.len();

        let relation_count = relations.len();
        let relations = first_by_key(relations, |r| (r.start().to_string(), r.end().to_string()));
        self.dropped_relations += relation_count - relations.len();

        Compartment::new(lines, classifiers, relations)
    }

    fn classifier(&mut self, raw: RawClassifier) -> Classifier {
        let compartments = raw
            .parts
            .into_iter()
            .map(|part| self.compartment(part))
            .collect();
        Classifier::new(raw.kind, raw.name, compartments)
    }

    fn relation(&mut self, raw: RawRelation) -> Relation {
        let id = self.next_relation_id;
        self.next_relation_id += 1;

        Relation::new(
            id,
            raw.assoc,
            raw.start,
            raw.end,
            Label::new(raw.start_label),
            Label::new(raw.end_label),
        )
    }
}

/// Keep the first item for each distinct key, preserving order.
fn first_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn class(name: &str, parts: Vec<RawCompartment>) -> RawClassifier {
        RawClassifier::new("CLASS", name, parts)
    }

    fn part(lines: &[&str]) -> RawCompartment {
        RawCompartment {
            lines: lines.iter().map(|line| line.to_string()).collect(),
            ..RawCompartment::default()
        }
    }

    fn rel(start: &str, end: &str) -> RawRelation {
        RawRelation::new("->", start, end)
    }

    fn all_relation_ids(compartment: &Compartment, ids: &mut Vec<usize>) {
        ids.extend(compartment.relations().iter().map(Relation::id));
        for classifier in compartment.classifiers() {
            for nested in classifier.compartments() {
                all_relation_ids(nested, ids);
            }
        }
    }

    #[test]
    fn test_lines_are_copied_verbatim() {
        let root = canonicalize(part(&["  first", "second"]));
        assert_eq!(root.lines(), ["  first", "second"]);
    }

    #[test]
    fn test_relation_ids_follow_document_order() {
        let root = canonicalize(RawCompartment {
            rels: vec![rel("A", "B"), rel("B", "C"), rel("C", "A")],
            ..RawCompartment::default()
        });

        let ids: Vec<_> = root.relations().iter().map(Relation::id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_relation_ids_are_preorder_over_compartments() {
        let nested = RawCompartment {
            rels: vec![rel("X", "Y")],
            ..RawCompartment::default()
        };
        let root = canonicalize(RawCompartment {
            nodes: vec![class("Pkg", vec![part(&["Pkg"]), nested])],
            rels: vec![rel("A", "B"), rel("B", "C")],
            ..RawCompartment::default()
        });

        assert_eq!(root.relations()[0].id(), 0);
        assert_eq!(root.relations()[1].id(), 1);
        let pkg = root.classifier("Pkg").unwrap();
        assert_eq!(pkg.compartments()[1].relations()[0].id(), 2);
    }

    #[test]
    fn test_counter_restarts_per_invocation() {
        let document = RawCompartment {
            rels: vec![rel("A", "B"), rel("B", "C")],
            ..RawCompartment::default()
        };

        let first = canonicalize(document.clone());
        let second = canonicalize(document);

        assert_eq!(first, second);
        assert_eq!(second.relations()[0].id(), 0);
    }

    #[test]
    fn test_duplicate_relations_keep_first() {
        let root = canonicalize(RawCompartment {
            rels: vec![
                rel("A", "B").with_labels("first", ""),
                rel("B", "A"),
                RawRelation::new("-:>", "A", "B").with_labels("second", "x"),
            ],
            ..RawCompartment::default()
        });

        assert_eq!(root.relations().len(), 2);
        let kept = &root.relations()[0];
        assert_eq!(kept.endpoints(), ("A", "B"));
        assert_eq!(kept.assoc(), "->");
        assert_eq!(kept.start_label().text(), "first");
        assert_eq!(root.relations()[1].endpoints(), ("B", "A"));
    }

    #[test]
    fn test_discarded_relations_still_consume_ids() {
        let root = canonicalize(RawCompartment {
            rels: vec![rel("A", "B"), rel("A", "B"), rel("B", "C")],
            ..RawCompartment::default()
        });

        let ids: Vec<_> = root.relations().iter().map(Relation::id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_richest_classifier_wins() {
        let root = canonicalize(RawCompartment {
            nodes: vec![
                class("Foo", vec![]),
                class("Bar", vec![part(&["Bar"])]),
                class("Foo", vec![part(&["Foo"]), part(&["x: int"])]),
            ],
            ..RawCompartment::default()
        });

        assert_eq!(root.classifiers().len(), 2);
        let foo = root.classifier("Foo").unwrap();
        assert_eq!(foo.compartments().len(), 2);
        assert_eq!(foo.compartments()[1].lines(), ["x: int"]);
    }

    #[test]
    fn test_classifiers_sorted_by_compartment_count_stably() {
        let root = canonicalize(RawCompartment {
            nodes: vec![
                class("A", vec![part(&["A"])]),
                class("B", vec![part(&["B"]), part(&[])]),
                class("C", vec![part(&["C"])]),
            ],
            ..RawCompartment::default()
        });

        let names: Vec<_> = root.classifiers().iter().map(Classifier::name).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_equal_duplicates_keep_first_occurrence() {
        let root = canonicalize(RawCompartment {
            nodes: vec![
                RawClassifier::new("CLASS", "Foo", vec![part(&["Foo"])]),
                RawClassifier::new("DATABASE", "Foo", vec![part(&["Foo"])]),
            ],
            ..RawCompartment::default()
        });

        assert_eq!(root.classifiers().len(), 1);
        assert_eq!(root.classifiers()[0].kind(), "CLASS");
    }

    #[test]
    fn test_nested_compartments_are_deduplicated() {
        let inner = RawCompartment {
            nodes: vec![class("X", vec![]), class("X", vec![])],
            rels: vec![rel("X", "X"), rel("X", "X")],
            ..RawCompartment::default()
        };
        let root = canonicalize(RawCompartment {
            nodes: vec![class("Outer", vec![part(&["Outer"]), inner])],
            ..RawCompartment::default()
        });

        let nested = &root.classifiers()[0].compartments()[1];
        assert_eq!(nested.classifiers().len(), 1);
        assert_eq!(nested.relations().len(), 1);
    }

    #[test]
    fn test_relation_dedup_is_scoped_to_its_compartment() {
        let inner = RawCompartment {
            rels: vec![rel("A", "B")],
            ..RawCompartment::default()
        };
        let root = canonicalize(RawCompartment {
            nodes: vec![class("Pkg", vec![part(&["Pkg"]), inner])],
            rels: vec![rel("A", "B")],
            ..RawCompartment::default()
        });

        assert_eq!(root.relations().len(), 1);
        assert_eq!(root.relations()[0].endpoints(), ("A", "B"));
        let nested = &root.classifier("Pkg").unwrap().compartments()[1];
        assert_eq!(nested.relations().len(), 1);
        assert_eq!(nested.relations()[0].endpoints(), ("A", "B"));
        assert_ne!(nested.relations()[0].id(), root.relations()[0].id());
    }

    fn arb_name() -> impl Strategy<Value = String> {
        prop_oneof![Just("A"), Just("B"), Just("C"), Just("D")].prop_map(String::from)
    }

    fn arb_relation() -> impl Strategy<Value = RawRelation> {
        (arb_name(), arb_name()).prop_map(|(start, end)| RawRelation::new("->", start, end))
    }

    fn arb_compartment() -> impl Strategy<Value = RawCompartment> {
        let leaf = prop::collection::vec(arb_relation(), 0..4).prop_map(|rels| RawCompartment {
            rels,
            ..RawCompartment::default()
        });

        leaf.prop_recursive(3, 32, 4, |inner| {
            (
                prop::collection::vec(
                    (arb_name(), prop::collection::vec(inner, 0..3))
                        .prop_map(|(name, parts)| RawClassifier::new("CLASS", name, parts)),
                    0..4,
                ),
                prop::collection::vec(arb_relation(), 0..4),
            )
                .prop_map(|(nodes, rels)| RawCompartment {
                    lines: Vec::new(),
                    nodes,
                    rels,
                })
        })
    }

    fn assert_siblings_unique(compartment: &Compartment) {
        let names: HashSet<_> = compartment.classifiers().iter().map(Classifier::name).collect();
        assert_eq!(names.len(), compartment.classifiers().len());

        let pairs: HashSet<_> = compartment.relations().iter().map(Relation::endpoints).collect();
        assert_eq!(pairs.len(), compartment.relations().len());

        for classifier in compartment.classifiers() {
            for nested in classifier.compartments() {
                assert_siblings_unique(nested);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_siblings_are_unique(raw in arb_compartment()) {
            assert_siblings_unique(&canonicalize(raw));
        }

        #[test]
        fn prop_relation_ids_are_distinct(raw in arb_compartment()) {
            let mut ids = Vec::new();
            all_relation_ids(&canonicalize(raw), &mut ids);

            let distinct: HashSet<_> = ids.iter().copied().collect();
            prop_assert_eq!(distinct.len(), ids.len());
        }

        #[test]
        fn prop_canonicalization_is_deterministic(raw in arb_compartment()) {
            prop_assert_eq!(canonicalize(raw.clone()), canonicalize(raw));
        }
    }
}
