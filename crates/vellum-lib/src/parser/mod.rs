//! Parser infrastructure for template fragments.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy lexing: tokens carry spans, text sliced only when building tree nodes
//! - Layout tokens: the lexer turns indentation into zero-width `Indent`/`Dedent`
//! - Trivia buffering: whitespace, newlines, and comments attach as leading trivia
//! - Checkpoint-based wrapping: attribute and call suffixes wrap the preceding expression
//!
//! # Recovery Strategy
//!
//! The parser is resilient and always produces a tree:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume
//! 3. Statement-level recovery skips to the end of the current line
//!
//! Fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod printer;

#[cfg(test)]
mod lexer_tests;

pub use ast::{
    ArgList, Attribute, Body, Call, Expr, ExprStmt, ForStmt, Literal, Name, Paren, Root, Stmt,
    Tuple,
};
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use core::{ParseResult, Parser};
pub use printer::SyntaxPrinter;

use crate::template::SourceId;
use lexer::lex;

/// Parses one fragment with no fuel limits. Returns `Err` only on fuel exhaustion.
pub fn parse(source: &str, source_id: SourceId) -> crate::Result<ParseResult> {
    Parser::new(source, source_id, lex(source)).parse()
}
