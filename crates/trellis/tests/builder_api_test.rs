//! Integration tests for the DiagramBuilder API
//!
//! These tests verify that the public API works and is usable.

use indexmap::IndexMap;

use trellis::{
    DiagramBuilder, TrellisError,
    config::{AppConfig, ExportConfig},
    render_config::Direction,
};

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_parse_simple_diagram() {
    let source = r#"
        [Customer|name: String]
        [Customer] places -> * [Order]
    "#;

    let builder = DiagramBuilder::default();
    let result = builder.parse(source);
    assert!(
        result.is_ok(),
        "Should parse valid diagram: {:?}",
        result.err()
    );

    let diagram = result.unwrap();
    assert_eq!(diagram.root().classifiers().len(), 2);
    assert_eq!(diagram.root().relations().len(), 1);
}

#[test]
fn test_export_json_shape() {
    let source = "#direction: right\n[A] uses -> [B]";

    let builder = DiagramBuilder::default();
    let diagram = builder.parse(source).expect("Failed to parse diagram");
    let json = builder.export_json(&diagram).expect("Failed to export");

    let value: serde_json::Value = serde_json::from_str(&json).expect("Export is not JSON");
    assert_eq!(value["config"]["direction"], "LR");
    assert_eq!(value["root"]["relations"][0]["id"], 0);
    assert_eq!(value["root"]["relations"][0]["startLabel"]["text"], "uses");
    assert_eq!(value["root"]["classifiers"][0]["type"], "CLASS");
}

#[test]
fn test_compact_export() {
    let config = AppConfig::new(IndexMap::new(), ExportConfig::new(false));
    let builder = DiagramBuilder::new(config);

    let diagram = builder.parse("[A]").expect("Failed to parse diagram");
    let json = builder.export_json(&diagram).expect("Failed to export");

    assert!(!json.contains('\n'));
}

#[test]
fn test_builder_with_default_directives() {
    let mut directives = IndexMap::new();
    directives.insert("direction".to_string(), "right".to_string());
    directives.insert("title".to_string(), "Defaults".to_string());
    let builder = DiagramBuilder::new(AppConfig::new(directives, ExportConfig::default()));

    let diagram = builder
        .parse("#title: Document\n[A]")
        .expect("Failed to parse diagram");

    assert_eq!(diagram.config().direction, Direction::LeftToRight);
    assert_eq!(diagram.config().title, "Document");
}

#[test]
fn test_malformed_directive_keeps_original_source() {
    let source = "[A]\n#broken";

    let builder = DiagramBuilder::default();
    match builder.parse(source) {
        Err(TrellisError::Parse { err, src }) => {
            assert_eq!(err.to_string(), "line 2: Malformed directive");
            assert_eq!(src, source);
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_grammar_error_keeps_cleaned_source() {
    let source = "#fontSize: 14\n  [Unclosed|field";

    let builder = DiagramBuilder::default();
    match builder.parse(source) {
        Err(TrellisError::Parse { err, src }) => {
            assert!(err.grammar_error().is_some());
            assert_eq!(src, "\n[Unclosed|field");
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_builder_reusability() {
    let source = "[A] -> [B]\n[B] -> [C]";

    let builder = DiagramBuilder::default();

    let first = builder.parse(source).expect("Failed to parse first");
    let second = builder.parse(source).expect("Failed to parse second");

    assert_eq!(first, second);
    assert_eq!(
        builder.export_json(&first).expect("Failed to export first"),
        builder.export_json(&second).expect("Failed to export second")
    );
}
