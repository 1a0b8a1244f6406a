//! Text dumps of fragment syntax trees.

use std::fmt::Write;

use rowan::NodeOrToken;

use super::ast::{Expr, Root, Stmt};
use super::cst::SyntaxNode;

pub struct SyntaxPrinter<'r> {
    root: &'r Root,
    raw: bool,
    trivia: bool,
}

impl<'r> SyntaxPrinter<'r> {
    pub fn new(root: &'r Root) -> Self {
        Self {
            root,
            raw: false,
            trivia: false,
        }
    }

    /// Print the lossless CST instead of the typed AST.
    pub fn raw(mut self, value: bool) -> Self {
        self.raw = value;
        self
    }

    /// Include whitespace, newline, and comment tokens in the CST dump.
    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.raw {
            return self.format_cst(self.root.as_cst(), 0, w);
        }
        writeln!(w, "Root")?;
        for stmt in self.root.stmts() {
            self.format_stmt(&stmt, 1, w)?;
        }
        Ok(())
    }

    fn format_cst(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        writeln!(w, "{}{:?}", prefix, node.kind())?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_cst(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        writeln!(w, "{}  {:?} {:?}", prefix, t.kind(), t.text())?;
                    }
                }
            }
        }
        Ok(())
    }

    fn format_stmt(&self, stmt: &Stmt, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        match stmt {
            Stmt::For(f) => {
                writeln!(w, "{prefix}For")?;
                if let Some(target) = f.target() {
                    self.format_expr(&target, indent + 1, w)?;
                }
                if let Some(iterable) = f.iterable() {
                    self.format_expr(&iterable, indent + 1, w)?;
                }
                if let Some(body) = f.body() {
                    writeln!(w, "{prefix}  Body")?;
                    for stmt in body.stmts() {
                        self.format_stmt(&stmt, indent + 2, w)?;
                    }
                }
            }
            Stmt::Expr(e) => {
                writeln!(w, "{prefix}Expr")?;
                if let Some(expr) = e.expr() {
                    self.format_expr(&expr, indent + 1, w)?;
                }
            }
        }
        Ok(())
    }

    fn format_expr(&self, expr: &Expr, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        match expr {
            Expr::Name(n) => writeln!(w, "{prefix}Name {}", n.text().unwrap_or_default())?,
            Expr::Attribute(a) => {
                let attr = a.attr().map(|t| t.text().to_string()).unwrap_or_default();
                writeln!(w, "{prefix}Attribute .{attr}")?;
                if let Some(value) = a.value() {
                    self.format_expr(&value, indent + 1, w)?;
                }
            }
            Expr::Call(c) => {
                writeln!(w, "{prefix}Call")?;
                if let Some(callee) = c.callee() {
                    self.format_expr(&callee, indent + 1, w)?;
                }
                for arg in c.args() {
                    self.format_expr(&arg, indent + 1, w)?;
                }
            }
            Expr::Tuple(t) => {
                writeln!(w, "{prefix}Tuple")?;
                for element in t.elements() {
                    self.format_expr(&element, indent + 1, w)?;
                }
            }
            Expr::Paren(p) => {
                writeln!(w, "{prefix}Paren")?;
                if let Some(inner) = p.inner() {
                    self.format_expr(&inner, indent + 1, w)?;
                }
            }
            Expr::Literal(l) => {
                let text = l.token().map(|t| t.text().to_string()).unwrap_or_default();
                writeln!(w, "{prefix}Literal {text}")?;
            }
        }
        Ok(())
    }
}
