use crate::utils::{dedent, is_identifier};

#[test]
fn dedent_removes_common_margin() {
    let text = "    for line in items:\n        line.val\n";
    assert_eq!(dedent(text), "for line in items:\n    line.val\n");
}

#[test]
fn dedent_keeps_relative_indentation() {
    let text = "  a\n    b\n  c";
    assert_eq!(dedent(text), "a\n  b\nc");
}

#[test]
fn dedent_ignores_blank_lines() {
    let text = "    a.b\n\n   \n    c.d\n";
    assert_eq!(dedent(text), "a.b\n\n\nc.d\n");
}

#[test]
fn dedent_mixed_tabs_and_spaces_share_only_exact_prefix() {
    let text = "\t a\n\t  b\n";
    assert_eq!(dedent(text), "a\n b\n");
}

#[test]
fn dedent_without_margin_is_identity() {
    assert_eq!(dedent("a\n  b\n"), "a\n  b\n");
    assert_eq!(dedent(""), "");
}

#[test]
fn identifiers() {
    assert!(is_identifier("x"));
    assert!(is_identifier("_"));
    assert!(is_identifier("my10list"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("a.b"));
    assert!(!is_identifier("9"));
}
