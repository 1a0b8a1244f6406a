//! Grammar productions for template fragments.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! The language is a small indentation-sensitive statement language:
//! `for` loops with indented (or inline) bodies, and expression statements
//! made of names, attribute chains, calls, literals, and tuples.

use super::core::Parser;

use super::cst::SyntaxKind;
use super::cst::token_sets::{EXPR_FIRST, FOR_HEADER_RECOVERY, STMT_FIRST, TARGET_FIRST};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);
        while !self.should_stop() {
            self.parse_stmt();
        }
        self.eat_trivia();
        self.finish_node();
    }

    fn parse_stmt(&mut self) {
        match self.current() {
            SyntaxKind::KwFor => self.parse_for(),
            SyntaxKind::Indent => self.parse_stray_block(),
            SyntaxKind::BadIndent => self.error_and_bump(DiagnosticKind::InconsistentIndentation),
            kind if EXPR_FIRST.contains(kind) => self.parse_expr_stmt(),
            SyntaxKind::Garbage => {
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "unrecognized characters")
            }
            _ => {
                let text = self.current_text();
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, format!("`{text}`"));
            }
        }
    }

    /// A block indented without an opening `for` header. Reported once, then
    /// parsed as ordinary statements so its `Dedent` doesn't close the outer block.
    fn parse_stray_block(&mut self) {
        self.error_and_bump(DiagnosticKind::UnexpectedIndent);
        while !self.currently_is(SyntaxKind::Dedent) && !self.should_stop() {
            self.parse_stmt();
        }
        self.eat_token(SyntaxKind::Dedent);
    }

    fn parse_expr_stmt(&mut self) {
        self.start_node(SyntaxKind::ExprStmt);
        self.parse_expr();
        self.finish_node();
        self.expect_line_end();
    }

    fn expect_line_end(&mut self) {
        if self.should_stop() || self.at_line_break() {
            return;
        }
        self.error_recover(DiagnosticKind::ExpectedLineEnd, STMT_FIRST.union(EXPR_FIRST));
    }

    /// `for target in iterable: body`
    fn parse_for(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        self.start_node(SyntaxKind::ForStmt);
        self.bump();

        self.parse_target();

        let has_in = self.eat_token(SyntaxKind::KwIn) || {
            self.error_recover(DiagnosticKind::ExpectedIn, FOR_HEADER_RECOVERY);
            self.eat_token(SyntaxKind::KwIn)
        };

        if !self.at_line_break() && self.currently_is_one_of(EXPR_FIRST) {
            self.parse_expr();
        } else if has_in {
            self.error(DiagnosticKind::ExpectedExpression);
        }

        if !self.eat_token(SyntaxKind::Colon) {
            self.error_recover(DiagnosticKind::ExpectedColon, FOR_HEADER_RECOVERY);
            self.eat_token(SyntaxKind::Colon);
        }

        self.parse_body();
        self.finish_node();
        self.exit_recursion();
    }

    /// Loop variable: a name, a comma-separated list, or a parenthesized form.
    fn parse_target(&mut self) {
        if self.at_line_break() || !self.currently_is_one_of(TARGET_FIRST) {
            self.error(DiagnosticKind::ExpectedTarget);
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_primary();
        if !self.currently_is(SyntaxKind::Comma) {
            return;
        }
        while self.eat_token(SyntaxKind::Comma) {
            if self.at_line_break() || !self.currently_is_one_of(TARGET_FIRST) {
                break;
            }
            self.parse_primary();
        }
        self.start_node_at(checkpoint, SyntaxKind::Tuple);
        self.finish_node();
    }

    fn parse_body(&mut self) {
        if !self.at_line_break() && self.currently_is_one_of(STMT_FIRST) {
            self.start_node(SyntaxKind::Body);
            self.parse_stmt();
            self.finish_node();
            return;
        }

        if !self.currently_is(SyntaxKind::Indent) {
            self.error(DiagnosticKind::ExpectedBody);
            return;
        }

        self.start_node(SyntaxKind::Body);
        self.bump();
        while !self.currently_is(SyntaxKind::Dedent) && !self.should_stop() {
            self.parse_stmt();
        }
        self.eat_token(SyntaxKind::Dedent);
        self.finish_node();
    }

    /// Primary followed by any number of `.attr` and `(args)` suffixes.
    pub(super) fn parse_expr(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        let checkpoint = self.checkpoint();
        self.parse_primary();

        loop {
            // Inside parentheses line breaks carry no meaning.
            if self.delimiter_stack.is_empty() && self.at_line_break() {
                break;
            }
            match self.current() {
                SyntaxKind::Dot => {
                    self.start_node_at(checkpoint, SyntaxKind::Attribute);
                    self.bump();
                    if self.currently_is(SyntaxKind::Id) {
                        self.bump();
                    } else {
                        self.error(DiagnosticKind::ExpectedAttributeName);
                    }
                    self.finish_node();
                }
                SyntaxKind::ParenOpen => {
                    self.start_node_at(checkpoint, SyntaxKind::Call);
                    self.parse_arg_list();
                    self.finish_node();
                }
                _ => break,
            }
        }
        self.exit_recursion();
    }

    fn parse_primary(&mut self) {
        match self.current() {
            SyntaxKind::Id => {
                self.start_node(SyntaxKind::Name);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::Int | SyntaxKind::Str => {
                self.start_node(SyntaxKind::Literal);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::ParenOpen => self.parse_paren(),
            _ => self.error(DiagnosticKind::ExpectedExpression),
        }
    }

    /// `(expr)` or a tuple: `()`, `(a,)`, `(a, b)`.
    fn parse_paren(&mut self) {
        let checkpoint = self.checkpoint();
        let open = self.current_span();
        self.push_delimiter();
        self.bump();

        let mut is_tuple = false;
        if self.currently_is(SyntaxKind::ParenClose) {
            is_tuple = true;
        } else {
            self.parse_expr();
            while self.eat_token(SyntaxKind::Comma) {
                is_tuple = true;
                if self.currently_is(SyntaxKind::ParenClose) {
                    break;
                }
                if !self.currently_is_one_of(EXPR_FIRST) {
                    self.error(DiagnosticKind::ExpectedExpression);
                    break;
                }
                self.parse_expr();
            }
        }

        self.pop_delimiter();
        if !self.eat_token(SyntaxKind::ParenClose) {
            self.error_unclosed_delimiter(open);
        }

        let kind = if is_tuple {
            SyntaxKind::Tuple
        } else {
            SyntaxKind::Paren
        };
        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ArgList);
        let open = self.current_span();
        self.push_delimiter();
        self.bump();

        while !self.currently_is(SyntaxKind::ParenClose) && !self.should_stop() {
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_expr();
            } else {
                let text = self.current_text();
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, format!("`{text}`"));
                continue;
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }

        self.pop_delimiter();
        if !self.eat_token(SyntaxKind::ParenClose) {
            self.error_unclosed_delimiter(open);
        }
        self.finish_node();
    }
}
