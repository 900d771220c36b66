//! Tests for ElementBuilder and ElementDocument

use std::io::Cursor;

use rstest::rstest;
use serde_json::json;

use uitree::domain::{
    Attributes, Children, Class, DomainError, Element, ElementBuilder, ElementDocument,
    ElementNode, Identity, SequentialIdGenerator, Text,
};

const PANEL: &str = r#"{"id":"p","type":"panel","children":[
    {"id":"c1","type":"item","text":"A"},
    {"id":"c2","type":"item","text":"B"}
]}"#;

fn order(node: &ElementNode) -> Vec<&str> {
    node.children_by_order().into_iter().map(|c| c.id()).collect()
}

#[test]
fn given_panel_document_when_building_then_children_follow_document_order() {
    // Act
    let root = ElementBuilder::new().build_from_json_str(PANEL).unwrap();

    // Assert
    assert_eq!(root.id(), "p");
    assert_eq!(root.content_type(), "panel");
    assert_eq!(root.child_count(), 2);
    assert_eq!(order(&root), vec!["c1", "c2"]);
    assert_eq!(root.get_child_by_id("c2").map(|c| c.text()), Some("B"));
}

#[test]
fn given_built_panel_when_reordering_then_order_changes_and_unknown_is_noop() {
    // Arrange
    let mut root = ElementBuilder::new().build_from_json_str(PANEL).unwrap();

    // Act
    root.set_child_order("c2", "c1");
    let after_move = order(&root).join(",");
    root.set_child_order("c9", "c1");

    // Assert
    assert_eq!(after_move, "c2,c1");
    assert_eq!(order(&root), vec!["c2", "c1"]);
}

#[test]
fn given_full_document_when_building_then_all_fields_are_mapped() {
    let json = r#"{"text":"A", "id":"button1", "type":"button", "class":"btn-primary",
                   "attributes":{"href":"/", "data-toggle":"f1"}}"#;

    let e = ElementBuilder::new().build_from_json_str(json).unwrap();

    assert_eq!(e.text(), "A");
    assert_eq!(e.id(), "button1");
    assert_eq!(e.content_type(), "button");
    assert_eq!(e.class(), "btn-primary");
    assert_eq!(e.get_attribute("href"), "/");
    assert_eq!(e.attributes(), r#"data-toggle="f1" href="/""#);
}

#[test]
fn given_empty_document_when_building_then_node_has_empty_defaults() {
    let e = ElementBuilder::new().build_from_json_str("{}").unwrap();

    assert_eq!(e.id(), "");
    assert_eq!(e.text(), "");
    assert_eq!(e.class(), "");
    assert_eq!(e.content_type(), "");
    assert_eq!(e.attributes(), "");
    assert_eq!(e.child_count(), 0);
}

#[rstest]
#[case::null_collections(r#"{"id":"p","type":"panel","attributes":null,"children":null}"#)]
#[case::null_text(r#"{"id":"p","type":"panel","text":null}"#)]
#[case::all_null_but_id(
    r#"{"id":"p","type":"panel","text":null,"class":null,"attributes":null,"children":null}"#
)]
fn given_null_fields_when_building_then_fields_take_defaults(#[case] json: &str) {
    let e = ElementBuilder::new().build_from_json_str(json).unwrap();

    assert_eq!(e.id(), "p");
    assert_eq!(e.content_type(), "panel");
    assert_eq!(e.text(), "");
    assert_eq!(e.class(), "");
    assert_eq!(e.attributes(), "");
    assert_eq!(e.child_count(), 0);
}

#[test]
fn given_null_identity_on_child_when_building_then_identity_is_generated() {
    let json = r#"{"id":"p","children":[{"id":null,"type":"link","children":null}]}"#;

    let root = ElementBuilder::with_id_generator(SequentialIdGenerator::new())
        .build_from_json_str(json)
        .unwrap();

    assert_eq!(order(&root), vec!["link#0"]);
}

#[test]
fn given_nested_children_when_building_then_grandchildren_are_attached() {
    let value = json!({
        "id": "nav", "type": "menu",
        "children": [
            {"id": "file", "type": "menu", "children": [
                {"type": "link", "text": "Open"},
                {"type": "separator"},
                {"type": "link", "text": "Quit"}
            ]}
        ]
    });

    let root = ElementBuilder::with_id_generator(SequentialIdGenerator::new())
        .build_from_value(value)
        .unwrap();

    let file = root.get_child_by_id("file").expect("file menu");
    assert_eq!(order(file), vec!["link#0", "separator#1", "link#2"]);
    assert_eq!(
        root.search_children_by_id("link#2").map(|n| n.text()),
        Some("Quit")
    );
    assert!(root.check_invariants().is_ok());
}

#[test]
fn given_reader_when_building_then_same_as_string() {
    let root = ElementBuilder::new()
        .build_from_reader(Cursor::new(PANEL.as_bytes()))
        .unwrap();
    assert_eq!(order(&root), vec!["c1", "c2"]);
}

#[rstest]
#[case::not_json("{not json")]
#[case::truncated(r#"{"id":"p","children":[{"id":"c1"}"#)]
#[case::wrong_text_type(r#"{"text": 12}"#)]
#[case::wrong_attribute_value(r#"{"attributes": {"href": 1}}"#)]
#[case::children_not_list(r#"{"children": {"id": "c1"}}"#)]
fn given_malformed_json_when_building_then_deserialization_error(#[case] json: &str) {
    let err = ElementBuilder::new().build_from_json_str(json).unwrap_err();
    assert!(
        matches!(err, DomainError::Deserialization(_)),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[case::top_level_array(r#"[{"id":"p"}]"#)]
#[case::top_level_string(r#""panel""#)]
#[case::scalar_child(r#"{"children":[{"id":"ok"}, 3]}"#)]
fn given_non_object_element_when_building_then_invalid_document(#[case] json: &str) {
    let err = ElementBuilder::new().build_from_json_str(json).unwrap_err();
    assert!(
        matches!(err, DomainError::InvalidDocument { .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn given_tree_when_exporting_then_document_mirrors_tree() {
    let mut root = ElementBuilder::new().build_from_json_str(PANEL).unwrap();
    root.add_css_class("wide").add_attribute("role", "region");
    root.set_child_order("c2", "c1");

    let doc = ElementDocument::from_element(&root);

    assert_eq!(doc.id, "p");
    assert_eq!(doc.element_type, "panel");
    assert_eq!(doc.class_name, "wide");
    assert_eq!(doc.attributes.get("role"), "region");
    let child_ids: Vec<&str> = doc.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(child_ids, vec!["c2", "c1"]);

    let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    assert_eq!(json["type"], "panel");
    assert_eq!(json["class"], "wide");
    assert_eq!(json["children"][0]["text"], "B");
}
