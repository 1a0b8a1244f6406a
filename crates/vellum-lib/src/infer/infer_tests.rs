use indexmap::IndexSet;
use indoc::indoc;

use super::{Inferrer, infer};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::parse;
use crate::shape::ShapeTree;
use crate::template::SourceId;

fn run(tree: &mut ShapeTree, source: &str) -> Diagnostics {
    let parsed = parse(source, SourceId::default()).unwrap();
    assert!(parsed.diagnostics.is_empty(), "fragment must parse: {source}");
    infer(tree, &parsed.root, SourceId::default())
}

fn shape(source: &str) -> String {
    let mut tree = ShapeTree::new();
    let diagnostics = run(&mut tree, source);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        diagnostics.kinds()
    );
    tree.dump()
}

fn errors(source: &str) -> Diagnostics {
    let mut tree = ShapeTree::new();
    run(&mut tree, source)
}

#[test]
fn attribute_chain_builds_records() {
    insta::assert_snapshot!(shape("a.b.c"), @r"
    Module
      a: Record
        b: Record
          c: Record
    ");
}

#[test]
fn bare_name_is_a_scalar() {
    insta::assert_snapshot!(shape("total"), @r"
    Module
      total: Scalar
    ");
}

#[test]
fn loop_over_records() {
    let input = indoc! {"
        for item in items:
            item.val
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      items: Array
        val: Record
    ");
}

#[test]
fn loop_variable_read_whole_marks_direct_access() {
    let input = indoc! {"
        for i in numbers:
            i
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      numbers: Array (direct)
    ");
}

#[test]
fn loop_over_attribute_path() {
    let input = indoc! {"
        for line in doc.lines:
            line.amount
        doc.title
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      doc: Record
        lines: Array
          amount: Record
        title: Record
    ");
}

#[test]
fn nested_loops() {
    let input = indoc! {"
        for a in my10list:
            for b in a.my_list:
                b.val
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      my10list: Array
        my_list: Array
          val: Record
    ");
}

#[test]
fn loop_over_loop_variable_is_unsupported() {
    let input = indoc! {"
        for row in rows:
            for cell in row:
                cell.x
    "};
    let diagnostics = errors(input);
    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::UnsupportedExpression]
    );
    insta::assert_snapshot!(
        diagnostics.iter().next().unwrap().message(),
        @"unsupported expression: cannot iterate over loop variable `row`"
    );
}

#[test]
fn discarded_loop_variable() {
    let input = indoc! {"
        for _ in items:
            _.ignored
            total
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      items: Array
      total: Scalar
    ");
}

#[test]
fn scalar_is_upgraded_by_attribute_access() {
    insta::assert_snapshot!(shape("total\ntotal.amount"), @r"
    Module
      total: Record
        amount: Record
    ");
    insta::assert_snapshot!(shape("total.amount\ntotal"), @r"
    Module
      total: Record
        amount: Record
    ");
}

#[test]
fn bare_read_then_loop_keeps_list_whole() {
    let input = indoc! {"
        rows
        for r in rows:
            r.id
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      rows: Array (direct)
        id: Record
    ");
}

#[test]
fn loop_bindings_do_not_leak() {
    let input = indoc! {"
        for x in xs:
            x.a
        x.b
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      xs: Array
        a: Record
      x: Record
        b: Record
    ");
}

#[test]
fn call_arguments_and_receivers_are_read() {
    insta::assert_snapshot!(shape("format_date(doc.date, fmt)"), @r"
    Module
      doc: Record
        date: Record
      fmt: Scalar
    ");
    insta::assert_snapshot!(shape("line.total.round(2)"), @r"
    Module
      line: Record
        total: Record
    ");
}

#[test]
fn reading_a_list_attribute_whole_marks_direct_access() {
    let input = indoc! {"
        for l in doc.lines:
            l.a
        doc.lines
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      doc: Record
        lines: Array (direct)
          a: Record
    ");
}

#[test]
fn inference_accumulates_across_calls() {
    let mut tree = ShapeTree::new();
    assert!(run(&mut tree, "for x in foo.my2list:\n    x\n").is_empty());
    assert!(run(&mut tree, "for y in foo.my3list:\n    y.val\n").is_empty());
    insta::assert_snapshot!(tree.dump(), @r"
    Module
      foo: Record
        my2list: Array (direct)
        my3list: Array
          val: Record
    ");
}

#[test]
fn tuple_target_is_unsupported() {
    let diagnostics = errors("for i, j in pairs:\n    i\n");
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::UnsupportedTarget]);
    insta::assert_snapshot!(
        diagnostics.iter().next().unwrap().message(),
        @"unsupported loop target: tuple unpacking is not supported"
    );
}

#[test]
fn call_and_literal_iterables_are_unsupported() {
    assert_eq!(
        errors("for i in range(3):\n    i\n").kinds(),
        vec![DiagnosticKind::UnsupportedExpression]
    );
    assert_eq!(
        errors("for c in 'abc':\n    c\n").kinds(),
        vec![DiagnosticKind::UnsupportedExpression]
    );
}

#[test]
fn list_used_as_object_conflicts() {
    let input = indoc! {"
        for x in doc.items:
            x
        doc.items.count
    "};
    let diagnostics = errors(input);
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::ShapeConflict]);
    insta::assert_snapshot!(
        diagnostics.iter().next().unwrap().message(),
        @"conflicting uses of the same variable: `doc.items` is used both as a list and as an object"
    );
}

#[test]
fn list_read_whole_before_loop() {
    let input = indoc! {"
        doc.lines
        for l in doc.lines:
            l.a
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      doc: Record
        lines: Array (direct)
          a: Record
    ");
}

#[test]
fn list_read_whole_after_loop() {
    let input = indoc! {"
        for l in doc.lines:
            l.a
        doc.lines
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      doc: Record
        lines: Array (direct)
          a: Record
    ");
}

#[test]
fn object_with_attributes_iterated_conflicts() {
    let input = indoc! {"
        doc.items.count
        for x in doc.items:
            x
    "};
    assert_eq!(
        errors(input).kinds(),
        vec![DiagnosticKind::ShapeConflict]
    );
}

#[test]
fn object_read_whole_and_by_attribute() {
    let input = indoc! {"
        doc
        doc.title
    "};
    insta::assert_snapshot!(shape(input), @r"
    Module
      doc: Record
        title: Record
    ");
}

#[test]
fn strict_mode_rejects_undeclared_names() {
    let declared: IndexSet<String> = ["doc".to_string()].into_iter().collect();
    let parsed = parse("doc.a\nother\nfor x in doc.items:\n    x.b\n", SourceId::default()).unwrap();
    let mut tree = ShapeTree::new();
    let (_, diagnostics) = Inferrer::new(&mut tree, SourceId::default())
        .with_declared(&declared)
        .infer(&parsed.root);

    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::UnboundName]);
    insta::assert_snapshot!(diagnostics.iter().next().unwrap().message(), @"`other` is not bound");
    insta::assert_snapshot!(tree.dump(), @r"
    Module
      doc: Record
        a: Record
        items: Array
          b: Record
    ");
}

#[test]
fn shadowed_loop_variable_is_a_warning() {
    let input = indoc! {"
        for x in xs:
            for x in x.inner:
                x
    "};
    let diagnostics = errors(input);
    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::ShadowedLoopVariable]
    );
    assert!(!diagnostics.has_errors());
}
