use indoc::indoc;
use serde_json::json;

use super::{SourceMap, Template, TemplateBuilder};
use crate::diagnostics::DiagnosticKind;
use crate::render::RenderError;
use crate::{Error, shot_error, shot_shape};

fn build(fragments: &[&str]) -> crate::Result<Template> {
    TemplateBuilder::new(SourceMap::from_fragments(fragments)).build()
}

#[test]
fn one_liner_shape() {
    shot_shape!("invoice.customer.name", @r"
    Module
      invoice: Record
        customer: Record
          name: Record
    ");
}

#[test]
fn loop_shape() {
    shot_shape!("
        for line in invoice.lines:
            line.amount
            line.label
        invoice.total
    ", @r"
    Module
      invoice: Record
        lines: Array
          amount: Record
          label: Record
        total: Record
    ");
}

#[test]
fn fragments_are_merged_in_order() {
    let template = build(&[
        indoc! {"
            for x in foo.my2list:
                x
        "},
        indoc! {"
            for y in foo.my3list:
                y.val
        "},
        "title",
    ])
    .unwrap();
    insta::assert_snapshot!(template.shape().dump(), @r"
    Module
      foo: Record
        my2list: Array (direct)
        my3list: Array
          val: Record
      title: Scalar
    ");
}

#[test]
fn bare_read_in_another_fragment_keeps_the_list_whole() {
    let template = build(&["for x in items:\n    x.val", "items"]).unwrap();
    insta::assert_snapshot!(template.shape().dump(), @r"
    Module
      items: Array (direct)
        val: Record
    ");
}

#[test]
fn list_read_whole_and_iterated_in_any_order() {
    let looped = "for l in doc.lines:\n    l.a\n";
    let read = "doc.lines\n";

    let expected = build(&[&format!("{looped}{read}")]).unwrap();
    insta::assert_snapshot!(expected.shape().dump(), @r"
    Module
      doc: Record
        lines: Array (direct)
          a: Record
    ");

    let variants = [
        build(&[&format!("{read}{looped}")]).unwrap(),
        build(&[looped, read]).unwrap(),
        build(&[read, looped]).unwrap(),
    ];
    for template in &variants {
        assert!(template.shape().same_shape(expected.shape()));
    }

    let data = json!({"doc": {"lines": [{"a": 1, "b": 2}], "title": "x"}});
    let out = variants[2].render(&data).unwrap();
    assert_eq!(
        serde_json::Value::from(out),
        json!({"doc": {"lines": [{"a": 1, "b": 2}]}})
    );
}

#[test]
fn object_read_whole_and_by_attribute_keeps_only_attributes() {
    let template = build(&["doc", "doc.title"]).unwrap();
    let data = json!({"doc": {"title": "T", "body": "B"}});
    let out = template.render(&data).unwrap();
    assert_eq!(serde_json::Value::from(out), json!({"doc": {"title": "T"}}));
}

#[test]
fn iterating_a_loop_variable_is_rejected() {
    shot_error!("
        for row in rows:
            for cell in row:
                cell.x
    ", @"error at 33..36: unsupported expression: cannot iterate over loop variable `row` (hint: lists of lists are not supported; iterate over an attribute of each element)");
}

#[test]
fn merging_a_fragment_with_itself_changes_nothing() {
    let fragment = "for row in rows:\n    row.id\ntotal";
    let once = build(&[fragment]).unwrap();
    let twice = build(&[fragment, fragment]).unwrap();
    assert!(once.shape().same_shape(twice.shape()));
}

#[test]
fn user_variables_and_instructions() {
    let template = Template::expect_valid(indoc! {"
        for line in doc.lines:
            line.amount
            for tax in line.taxes:
                tax.rate
        doc.total
        currency
    "});
    assert_eq!(
        template.user_variables(),
        [
            "doc.lines.amount",
            "doc.lines.taxes.rate",
            "doc.total",
            "currency",
        ]
    );
    assert_eq!(
        template.instructions(),
        ["for line in doc.lines", "for tax in line.taxes"]
    );
}

#[test]
fn render_through_template() {
    let template = Template::expect_valid(indoc! {"
        for i in numbers:
            i
        for item in items:
            item.val
    "});
    let data = json!({
        "numbers": [0, 1, 2, 3, 4],
        "items": [{ "val": 0 }, { "val": 1, "skip": true }],
    });
    let out = serde_json::Value::from(template.render(&data).unwrap());
    assert_eq!(
        out,
        json!({ "numbers": [0, 1, 2, 3, 4], "items": [{ "val": 0 }, { "val": 1 }] })
    );

    let err = template.render(&json!({ "numbers": [] })).unwrap_err();
    assert_eq!(
        err,
        RenderError::MissingKey {
            key: "items".to_owned()
        }
    );
}

#[test]
fn tuple_target_error() {
    shot_error!("
        for a, b in pairs:
            a
    ", @"error at 4..8: unsupported loop target: tuple unpacking is not supported (hint: bind a single name, e.g. `for item in items:`)");
}

#[test]
fn parse_errors_fail_the_build() {
    let err = build(&["for x in:\n    x"]).unwrap_err();
    assert!(matches!(err, Error::TemplateParseError(_)));
    insta::assert_snapshot!(err, @"template parsing failed with 1 errors");
    assert_eq!(
        err.diagnostics().unwrap().kinds(),
        [DiagnosticKind::ExpectedExpression]
    );
}

#[test]
fn conflict_between_fragments() {
    let err = build(&["for x in doc:\n    x.a", "doc.title"]).unwrap_err();
    assert!(matches!(err, Error::TemplateAnalyzeError(_)));
    let diagnostics = err.diagnostics().unwrap();
    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.source().index(), 1);
    insta::assert_snapshot!(message, @"error at 0..9: conflicting uses of the same variable: `doc` is used both as a list and as an object");
}

#[test]
fn fragment_with_parse_error_is_not_inferred() {
    let err = build(&["a.b", "(c"]).unwrap_err();
    let diagnostics = err.diagnostics().unwrap();
    assert_eq!(diagnostics.kinds(), [DiagnosticKind::UnclosedParen]);
}

#[test]
fn strict_mode() {
    let sources = SourceMap::from_fragments(["invoice.total", "other"]);
    let err = TemplateBuilder::new(sources)
        .declare(["invoice"])
        .build()
        .unwrap_err();
    let diagnostics = err.diagnostics().unwrap();
    assert_eq!(diagnostics.kinds(), [DiagnosticKind::UnboundName]);

    let sources = SourceMap::from_fragments(["invoice.total", "other"]);
    let template = TemplateBuilder::new(sources)
        .declare(["invoice", "other"])
        .build()
        .unwrap();
    assert_eq!(template.user_variables(), ["invoice.total", "other"]);
}

#[test]
fn warnings_are_kept_on_the_template() {
    let template = Template::expect_valid(indoc! {"
        for x in outer:
            for x in x.inner:
                x.val
    "});
    assert_eq!(
        template.diagnostics().kinds(),
        [DiagnosticKind::ShadowedLoopVariable]
    );
}

#[test]
fn fuel_exhaustion_is_an_error() {
    let err = TemplateBuilder::one_liner("a.b.c.d.e.f")
        .with_exec_fuel(Some(2))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::ExecFuelExhausted));
    assert!(err.diagnostics().is_none());

    let nested = format!("{}x{}", "(".repeat(50), ")".repeat(50));
    let err = TemplateBuilder::one_liner(&nested)
        .with_recursion_fuel(Some(10))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::RecursionLimitExceeded));
}

#[test]
fn empty_template() {
    let template = Template::expect_valid("");
    assert!(template.shape().is_empty());
    assert!(template.user_variables().is_empty());
    let out = template.render(&json!({})).unwrap();
    assert_eq!(serde_json::Value::from(out), json!({}));
}
