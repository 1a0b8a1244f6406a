//! Lexer for template fragments.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Layout
//!
//! Fragments are indentation-sensitive. After Logos tokenization a layout pass
//! inserts zero-width `Indent`/`Dedent` tokens at the first significant token of
//! each logical line, and closes all open blocks at end of input. Lines holding
//! only whitespace or a comment do not affect layout, and neither do line breaks
//! inside parentheses.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive error characters into single `Garbage` tokens rather
//! than producing one error per character. Leading whitespace that returns to a
//! column no enclosing block started at becomes a `BadIndent` token.

use logos::Logos;
use rowan::{TextRange, TextSize};
use std::ops::Range;

use super::cst::SyntaxKind;

/// Columns advanced by a tab character.
const TAB_WIDTH: usize = 8;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }

    fn empty_at(kind: SyntaxKind, offset: TextSize) -> Self {
        Self::new(kind, TextRange::empty(offset))
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens, layout tokens included.
pub fn lex(source: &str) -> Vec<Token> {
    layout(source, lex_raw(source))
}

/// Raw Logos pass with garbage coalescing.
fn lex_raw(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }
                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Inserts `Indent`/`Dedent` tokens and marks inconsistent dedents.
fn layout(source: &str, raw: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(raw.len() + 8);
    let mut levels: Vec<usize> = vec![0];
    let mut paren_depth = 0usize;
    let mut at_line_start = true;
    let mut pending_ws: Option<usize> = None;

    for token in raw {
        match token.kind {
            SyntaxKind::Newline => {
                at_line_start = true;
                pending_ws = None;
                out.push(token);
                continue;
            }
            SyntaxKind::Whitespace if at_line_start => {
                pending_ws = Some(out.len());
                out.push(token);
                continue;
            }
            SyntaxKind::Whitespace | SyntaxKind::Comment => {
                out.push(token);
                continue;
            }
            _ => {}
        }

        if at_line_start && paren_depth == 0 {
            let column = pending_ws
                .map(|idx| indent_width(token_text(source, &out[idx])))
                .unwrap_or(0);
            let offset = token.span.start();
            let top = levels.last().copied().unwrap_or(0);

            if column > top {
                levels.push(column);
                out.push(Token::empty_at(SyntaxKind::Indent, offset));
            } else if column < top {
                while levels.last().is_some_and(|&level| level > column) {
                    levels.pop();
                    out.push(Token::empty_at(SyntaxKind::Dedent, offset));
                }
                if levels.last().copied() != Some(column)
                    && let Some(idx) = pending_ws
                {
                    out[idx].kind = SyntaxKind::BadIndent;
                }
            }
        }
        at_line_start = false;
        pending_ws = None;

        match token.kind {
            SyntaxKind::ParenOpen => paren_depth += 1,
            SyntaxKind::ParenClose => paren_depth = paren_depth.saturating_sub(1),
            _ => {}
        }
        out.push(token);
    }

    let end = TextSize::from(source.len() as u32);
    for _ in 1..levels.len() {
        out.push(Token::empty_at(SyntaxKind::Dedent, end));
    }

    out
}

fn indent_width(text: &str) -> usize {
    text.chars().fold(0, |col, c| match c {
        '\t' => (col / TAB_WIDTH + 1) * TAB_WIDTH,
        _ => col + 1,
    })
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
