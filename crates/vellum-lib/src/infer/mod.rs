//! Shape inference over parsed fragments.
//!
//! The inferrer walks a fragment and records, in a [`ShapeTree`], every
//! top-level variable, attribute path, and loop it reads. Problems are
//! reported as diagnostics; any error makes the template invalid.
//!
//! Resolution rules:
//! - a name resolves to a loop variable in scope, then to the module
//! - `a.b.c` builds records along the path, ending in an empty record
//! - `for x in a.b` builds records along the path, ending in an array, and
//!   binds `x` to that array, so `x.attr` lands on the array's elements
//! - reading a whole array (`x` or `a.b`) marks it as directly accessed,
//!   whether the read comes before or after the loop
//! - iterating a loop variable itself (`for c in row`) is unsupported:
//!   elements are records, never lists

mod context;

#[cfg(test)]
mod infer_tests;

use indexmap::IndexSet;
use rowan::TextRange;

pub use context::Context;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::{Expr, ForStmt, Root, Stmt};
use crate::shape::{MergeError, ShapeId, ShapeKind, ShapeTree};
use crate::template::SourceId;

/// Name of a loop variable that is never used.
pub const DISCARD: &str = "_";

/// Runs inference for one fragment in open mode.
pub fn infer(tree: &mut ShapeTree, root: &Root, source: SourceId) -> Diagnostics {
    Inferrer::new(tree, source).infer(root).1
}

/// What a path segment must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Want {
    /// Intermediate segment: an object.
    Record,
    /// Final segment of a read: an object, or a whole list.
    Leaf,
    /// Final segment of a loop iterable.
    Array,
}

impl Want {
    fn fresh_kind(self) -> ShapeKind {
        match self {
            Want::Record | Want::Leaf => ShapeKind::Record,
            Want::Array => ShapeKind::Array {
                direct_access: false,
            },
        }
    }
}

/// How the first name of a path resolves.
enum Resolved {
    /// Loop variable in scope.
    Bound(ShapeId),
    /// Known module entry; `None` is a bare value.
    Module(Option<ShapeId>),
    /// Not seen before.
    Fresh,
}

pub struct Inferrer<'t> {
    tree: &'t mut ShapeTree,
    declared: Option<&'t IndexSet<String>>,
    source: SourceId,
    diagnostics: Diagnostics,
}

impl<'t> Inferrer<'t> {
    pub fn new(tree: &'t mut ShapeTree, source: SourceId) -> Self {
        Self {
            tree,
            declared: None,
            source,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Strict mode: only these top-level names may be introduced.
    pub fn with_declared(mut self, declared: &'t IndexSet<String>) -> Self {
        self.declared = Some(declared);
        self
    }

    /// Walks one fragment, accumulating into the tree's module root.
    pub fn infer(mut self, root: &Root) -> (ShapeId, Diagnostics) {
        let ctx = Context::new(self.tree.root());
        for stmt in root.stmts() {
            self.visit_stmt(&stmt, &ctx);
        }
        (ctx.module(), self.diagnostics)
    }

    fn visit_stmt(&mut self, stmt: &Stmt, ctx: &Context) {
        match stmt {
            Stmt::For(f) => self.visit_for(f, ctx),
            Stmt::Expr(e) => {
                if let Some(expr) = e.expr() {
                    self.visit_expr(expr, ctx);
                }
            }
        }
    }

    fn visit_expr(&mut self, expr: Expr, ctx: &Context) {
        let Some(expr) = expr.unparenthesized() else {
            return;
        };
        match &expr {
            Expr::Name(name) => {
                if let Some(text) = name.text() {
                    self.read_name(&text, name.text_range(), ctx);
                }
            }
            Expr::Attribute(attr) => match attr.path() {
                Some(path) => self.read_path(&path, attr.text_range(), ctx),
                // `f(x).y`: only the call's inputs are data
                None => {
                    if let Some(value) = attr.value() {
                        self.visit_expr(value, ctx);
                    }
                }
            },
            Expr::Call(call) => {
                // `obj.method(..)` reads `obj`; a plain function name is not data
                if let Some(Expr::Attribute(method)) =
                    call.callee().and_then(Expr::unparenthesized)
                    && let Some(receiver) = method.value()
                {
                    self.visit_expr(receiver, ctx);
                }
                for arg in call.args() {
                    self.visit_expr(arg, ctx);
                }
            }
            Expr::Tuple(tuple) => {
                for element in tuple.elements() {
                    self.visit_expr(element, ctx);
                }
            }
            Expr::Literal(_) | Expr::Paren(_) => {}
        }
    }

    fn visit_for(&mut self, stmt: &ForStmt, ctx: &Context) {
        // Missing parts were already reported by the parser.
        let (Some(target), Some(iterable)) = (stmt.target(), stmt.iterable()) else {
            return;
        };
        let Some(name) = self.loop_target(target) else {
            return;
        };
        let Some(array) = self.loop_iterable(iterable, ctx) else {
            return;
        };

        let bound = if name == DISCARD {
            self.tree.alloc(ShapeKind::Dummy)
        } else {
            if ctx.is_bound(&name) {
                self.diagnostics
                    .report(
                        self.source,
                        DiagnosticKind::ShadowedLoopVariable,
                        stmt.target().map_or(stmt.text_range(), |t| t.text_range()),
                    )
                    .message(&name)
                    .emit();
            }
            array
        };

        let scope = ctx.with_binding(name, bound);
        if let Some(body) = stmt.body() {
            for stmt in body.stmts() {
                self.visit_stmt(&stmt, &scope);
            }
        }
    }

    fn loop_target(&mut self, target: Expr) -> Option<String> {
        let range = target.text_range();
        let detail = match target.unparenthesized() {
            Some(Expr::Name(name)) => return name.text(),
            Some(Expr::Tuple(_)) => "tuple unpacking is not supported",
            _ => "only a single name can be bound",
        };
        self.diagnostics
            .report(self.source, DiagnosticKind::UnsupportedTarget, range)
            .message(detail)
            .emit();
        None
    }

    fn loop_iterable(&mut self, iterable: Expr, ctx: &Context) -> Option<ShapeId> {
        let range = iterable.text_range();
        let path = match iterable.clone().unparenthesized() {
            Some(expr @ (Expr::Name(_) | Expr::Attribute(_))) => expr.path(),
            _ => None,
        };
        let Some(path) = path else {
            self.diagnostics
                .report(self.source, DiagnosticKind::UnsupportedExpression, range)
                .message(format!("cannot iterate over `{}`", iterable.source_text()))
                .hint("iterate over a variable or an attribute path")
                .emit();
            return None;
        };
        if let [name] = path.as_slice()
            && ctx.is_bound(name)
        {
            self.diagnostics
                .report(self.source, DiagnosticKind::UnsupportedExpression, range)
                .message(format!("cannot iterate over loop variable `{name}`"))
                .hint("lists of lists are not supported; iterate over an attribute of each element")
                .emit();
            return None;
        }
        self.walk_path(&path, Want::Array, range, ctx)
    }

    fn resolve(&self, name: &str, ctx: &Context) -> Resolved {
        if let Some(id) = ctx.lookup(name) {
            return Resolved::Bound(id);
        }
        match self.tree.field(ctx.module(), name) {
            Some(child) => Resolved::Module(child),
            None => Resolved::Fresh,
        }
    }

    /// In strict mode, reports a fresh top-level name that was not declared.
    fn allow_fresh(&mut self, name: &str, range: TextRange) -> bool {
        let Some(declared) = self.declared else {
            return true;
        };
        if declared.contains(name) {
            return true;
        }
        self.diagnostics
            .report(self.source, DiagnosticKind::UnboundName, range)
            .message(name)
            .emit();
        false
    }

    /// A bare read of a name.
    ///
    /// A list read whole is copied whole even when its elements' attributes
    /// are read too. An object is not: once any of its attributes is read,
    /// only those attributes are rendered, and a bare read adds nothing.
    fn read_name(&mut self, name: &str, range: TextRange, ctx: &Context) {
        match self.resolve(name, ctx) {
            Resolved::Bound(id) | Resolved::Module(Some(id)) => self.tree.set_direct_access(id),
            Resolved::Module(None) => {}
            Resolved::Fresh => {
                if self.allow_fresh(name, range) {
                    self.tree.set_field(ctx.module(), name, None);
                }
            }
        }
    }

    fn read_path(&mut self, path: &[String], range: TextRange, ctx: &Context) {
        self.walk_path(path, Want::Leaf, range, ctx);
    }

    /// Gets or creates every segment of `path`; the last one as `last`.
    fn walk_path(
        &mut self,
        path: &[String],
        last: Want,
        range: TextRange,
        ctx: &Context,
    ) -> Option<ShapeId> {
        let first = path.first()?;
        let (mut current, start) = match self.resolve(first, ctx) {
            Resolved::Bound(id) => (id, 1),
            Resolved::Module(_) => (ctx.module(), 0),
            Resolved::Fresh => {
                if !self.allow_fresh(first, range) {
                    return None;
                }
                (ctx.module(), 0)
            }
        };

        for i in start..path.len() {
            let want = if i + 1 == path.len() {
                last
            } else {
                Want::Record
            };
            current = self.descend(current, path, i, want, range)?;
        }
        Some(current)
    }

    fn descend(
        &mut self,
        parent: ShapeId,
        path: &[String],
        i: usize,
        want: Want,
        range: TextRange,
    ) -> Option<ShapeId> {
        // Attributes of an unused loop variable are not data.
        if self.tree.kind(parent) == ShapeKind::Dummy {
            return Some(parent);
        }

        let name = &path[i];
        let existing = match self.tree.field(parent, name) {
            Some(Some(id)) => id,
            bare => {
                let id = self.tree.alloc(want.fresh_kind());
                self.tree.set_field(parent, name.as_str(), Some(id));
                // A list that was already read whole stays readable whole.
                if bare.is_some() {
                    self.tree.set_direct_access(id);
                }
                return Some(id);
            }
        };

        let kind = self.tree.kind(existing);
        match (want, kind) {
            (_, ShapeKind::Dummy)
            | (Want::Record | Want::Leaf, ShapeKind::Record)
            | (Want::Array, ShapeKind::Array { .. }) => Some(existing),
            (Want::Leaf, ShapeKind::Array { .. }) => {
                self.tree.set_direct_access(existing);
                Some(existing)
            }
            // Read whole earlier, iterated now.
            (Want::Array, ShapeKind::Record) if self.tree.is_leaf_record(existing) => {
                self.tree.promote_to_array(existing);
                Some(existing)
            }
            _ => {
                let err = MergeError::conflict(&path[..=i], kind, want.fresh_kind());
                self.diagnostics
                    .report(self.source, DiagnosticKind::ShapeConflict, range)
                    .message(err.to_string())
                    .emit();
                None
            }
        }
    }
}
