use super::cst::SyntaxKind::{self, *};
use super::lexer::{lex, token_text};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

#[test]
fn attribute_chain() {
    assert_eq!(kinds("doc.total"), vec![Id, Dot, Id]);
}

#[test]
fn keywords_need_whole_words() {
    assert_eq!(kinds("for in format inside"), vec![KwFor, KwIn, Id, Id]);
}

#[test]
fn literals() {
    assert_eq!(
        kinds(r#"f(1, "a\"b", 'c')"#),
        vec![Id, ParenOpen, Int, Comma, Str, Comma, Str, ParenClose]
    );
}

#[test]
fn loop_body_is_indented() {
    let source = "for x in xs:\n    x.val\n";
    assert_eq!(
        kinds(source),
        vec![KwFor, Id, KwIn, Id, Colon, Indent, Id, Dot, Id, Dedent]
    );
}

#[test]
fn dedent_closes_every_level() {
    let source = "for a in b:\n    for c in a:\n        c\nd\n";
    assert_eq!(
        kinds(source),
        vec![
            KwFor, Id, KwIn, Id, Colon, Indent, KwFor, Id, KwIn, Id, Colon, Indent, Id, Dedent,
            Dedent, Id
        ]
    );
}

#[test]
fn blank_and_comment_lines_ignore_layout() {
    let source = "for a in b:\n\n    # note\n    a\n";
    assert_eq!(
        kinds(source),
        vec![KwFor, Id, KwIn, Id, Colon, Indent, Id, Dedent]
    );
}

#[test]
fn layout_tokens_are_zero_width() {
    let source = "for a in b:\n    a\n";
    let tokens = lex(source);
    let indent = tokens.iter().find(|t| t.kind == Indent).unwrap();
    assert!(indent.span.is_empty());
    assert_eq!(u32::from(indent.span.start()), 16);
    let dedent = tokens.iter().find(|t| t.kind == Dedent).unwrap();
    assert_eq!(usize::from(dedent.span.start()), source.len());
}

#[test]
fn mismatched_dedent_is_marked() {
    let source = "for a in b:\n    a\n  c\n";
    assert_eq!(
        kinds(source),
        vec![KwFor, Id, KwIn, Id, Colon, Indent, Id, BadIndent, Dedent, Id]
    );
}

#[test]
fn parentheses_suspend_layout() {
    let source = "f(a,\n      b)\nc";
    assert_eq!(
        kinds(source),
        vec![Id, ParenOpen, Id, Comma, Id, ParenClose, Id]
    );
}

#[test]
fn tabs_advance_to_next_stop() {
    let source = "for a in b:\n\ta\n        a\n";
    assert_eq!(
        kinds(source),
        vec![KwFor, Id, KwIn, Id, Colon, Indent, Id, Id, Dedent]
    );
}

#[test]
fn garbage_is_coalesced() {
    let source = "a $$ b";
    let tokens = lex(source);
    let garbage: Vec<_> = tokens.iter().filter(|t| t.kind == Garbage).collect();
    assert_eq!(garbage.len(), 1);
    assert_eq!(token_text(source, garbage[0]), "$$");
}

#[test]
fn comment_runs_to_end_of_line() {
    let source = "a # trailing . words\nb";
    let tokens = lex(source);
    let comment = tokens.iter().find(|t| t.kind == Comment).unwrap();
    assert_eq!(token_text(source, comment), "# trailing . words");
    assert_eq!(kinds(source), vec![Id, Id]);
}
