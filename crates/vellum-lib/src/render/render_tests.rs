use indoc::indoc;
use serde_json::json;
use vellum_core::{Colors, Value};

use super::{PrintTracer, RenderError, Renderer, render};
use crate::infer::infer;
use crate::parser::parse;
use crate::shape::ShapeTree;
use crate::template::SourceId;

fn shape_of(fragments: &[&str]) -> ShapeTree {
    let mut tree = ShapeTree::new();
    for fragment in fragments {
        let parsed = parse(fragment, SourceId::default()).unwrap();
        assert!(parsed.diagnostics.is_empty(), "fragment must parse: {fragment}");
        let diagnostics = infer(&mut tree, &parsed.root, SourceId::default());
        assert!(diagnostics.is_empty(), "{:?}", diagnostics.kinds());
    }
    tree
}

fn render_json(fragments: &[&str], data: serde_json::Value) -> serde_json::Value {
    let tree = shape_of(fragments);
    render(&tree, &data).unwrap().into()
}

fn render_err(fragments: &[&str], data: serde_json::Value) -> RenderError {
    let tree = shape_of(fragments);
    render(&tree, &data).unwrap_err()
}

#[test]
fn direct_access_array_is_copied() {
    let input = indoc! {"
        for i in numbers:
            i
    "};
    let out = render_json(&[input], json!({ "numbers": [0, 1, 2, 3, 4] }));
    assert_eq!(out, json!({ "numbers": [0, 1, 2, 3, 4] }));
}

#[test]
fn array_of_records_is_projected() {
    let input = indoc! {"
        for item in items:
            item.val
    "};
    let data = json!({
        "items": [{ "val": 0, "noise": "x" }, { "val": 1 }],
        "unused": true,
    });
    let out = render_json(&[input], data);
    assert_eq!(out, json!({ "items": [{ "val": 0 }, { "val": 1 }] }));
}

#[test]
fn nested_loops_render_nested_lists() {
    let input = indoc! {"
        for outer in my10list:
            for inner in outer.my_list:
                inner.val
    "};
    let data = json!({
        "my10list": [
            { "my_list": [{ "val": 1 }, { "val": 2, "extra": 0 }], "junk": 1 },
            { "my_list": [] },
        ],
    });
    let out = render_json(&[input], data);
    assert_eq!(
        out,
        json!({
            "my10list": [
                { "my_list": [{ "val": 1 }, { "val": 2 }] },
                { "my_list": [] },
            ],
        })
    );
}

#[test]
fn loops_over_attributes_of_one_variable_render_independently() {
    let first = indoc! {"
        for x in foo.my2list:
            x
    "};
    let second = indoc! {"
        for y in foo.my3list:
            y.val
    "};
    let data = json!({
        "foo": {
            "my2list": ["a", "b"],
            "my3list": [{ "val": 1, "skip": 2 }],
            "other": 3,
        },
    });
    let out = render_json(&[first, second], data);
    assert_eq!(
        out,
        json!({ "foo": { "my2list": ["a", "b"], "my3list": [{ "val": 1 }] } })
    );
}

#[test]
fn bare_scalar_passes_through() {
    let out = render_json(&["total"], json!({ "total": { "nested": [1, 2] } }));
    assert_eq!(out, json!({ "total": { "nested": [1, 2] } }));
}

#[test]
fn empty_record_copies_the_value() {
    let out = render_json(&["doc.meta"], json!({ "doc": { "meta": [1, "two"], "x": 0 } }));
    assert_eq!(out, json!({ "doc": { "meta": [1, "two"] } }));
}

#[test]
fn array_without_attributes_is_omitted() {
    let input = indoc! {"
        for _ in rows:
            total
    "};
    let out = render_json(&[input], json!({ "rows": [1, 2], "total": 3 }));
    assert_eq!(out, json!({ "total": 3 }));
}

#[test]
fn keys_follow_declaration_order() {
    let tree = shape_of(&["second\nfirst"]);
    let data = json!({ "first": 1, "second": 2 });
    let out = render(&tree, &data).unwrap();
    let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["second", "first"]);
}

#[test]
fn array_order_is_preserved() {
    let input = indoc! {"
        for row in rows:
            row.id
    "};
    let out = render_json(&[input], json!({ "rows": [{ "id": 3 }, { "id": 1 }, { "id": 2 }] }));
    assert_eq!(out, json!({ "rows": [{ "id": 3 }, { "id": 1 }, { "id": 2 }] }));
}

#[test]
fn satisfied_keys_render_without_error() {
    let tree = shape_of(&["a.b", "c"]);
    let data = json!({ "a": { "b": 1 }, "c": 2 });
    assert!(render(&tree, &data).is_ok());
}

#[test]
fn missing_top_level_key() {
    let err = render_err(&["a.b", "c"], json!({ "a": { "b": 1 } }));
    assert_eq!(
        err,
        RenderError::MissingKey {
            key: "c".to_owned()
        }
    );
    insta::assert_snapshot!(err, @"the key 'c' must be present in your data dictionary");
}

#[test]
fn null_top_level_key_counts_as_missing() {
    let err = render_err(&["total"], json!({ "total": null }));
    assert_eq!(
        err,
        RenderError::MissingKey {
            key: "total".to_owned()
        }
    );
}

#[test]
fn non_object_payload_reports_first_key() {
    let err = render_err(&["a", "b"], json!([1, 2]));
    assert_eq!(
        err,
        RenderError::MissingKey {
            key: "a".to_owned()
        }
    );
}

#[test]
fn missing_nested_attribute() {
    let err = render_err(&["doc.title"], json!({ "doc": {} }));
    insta::assert_snapshot!(err, @"`doc` has no attribute `title`");
}

#[test]
fn missing_attribute_on_element_names_the_index() {
    let input = indoc! {"
        for item in items:
            item.val
    "};
    let err = render_err(&[input], json!({ "items": [{ "val": 0 }, { "other": 1 }] }));
    assert_eq!(
        err,
        RenderError::AttributeLookup {
            path: "items[1]".to_owned(),
            attr: "val".to_owned(),
        }
    );
}

#[test]
fn non_sequence_for_iterated_array() {
    let input = indoc! {"
        for item in doc.items:
            item.val
    "};
    let err = render_err(&[input], json!({ "doc": { "items": 5 } }));
    insta::assert_snapshot!(err, @"`doc.items` is not a sequence (found number)");
}

#[test]
fn renders_native_values() {
    let input = indoc! {"
        for item in items:
            item.val
    "};
    let tree = shape_of(&[input]);
    let data = Value::from(json!({ "items": [{ "val": "a", "x": 1 }] }));
    let out = render(&tree, &data).unwrap();
    assert_eq!(out, Value::from(json!({ "items": [{ "val": "a" }] })));
}

#[test]
fn empty_shape_renders_empty_object() {
    let tree = ShapeTree::new();
    let out = render(&tree, &json!({ "anything": 1 })).unwrap();
    assert_eq!(serde_json::Value::from(out), json!({}));
}

#[test]
fn print_tracer_logs_every_step() {
    let input = indoc! {"
        for item in items:
            item.val
        total
    "};
    let tree = shape_of(&[input]);
    let data = json!({ "items": [{ "val": 1 }], "total": 2 });
    let mut renderer = Renderer::new(&tree).with_tracer(PrintTracer::new(Colors::OFF));
    renderer.render(&data).unwrap();
    insta::assert_snapshot!(renderer.tracer().dump(), @r"
    Module <root>
      Array items
        element items[0]
          Record items[0].val
            copy items[0].val
      copy total
    ");
}

#[test]
fn print_tracer_logs_failure() {
    let tree = shape_of(&["doc.title"]);
    let mut renderer = Renderer::new(&tree).with_tracer(PrintTracer::new(Colors::OFF));
    assert!(renderer.render(&json!({ "doc": {} })).is_err());
    insta::assert_snapshot!(renderer.into_tracer().dump(), @r"
    Module <root>
      Record doc
    error: `doc` has no attribute `title`
    ");
}
